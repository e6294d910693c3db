pub mod cli;
pub mod config;
pub mod event;
pub mod interrupt;
pub mod ping;
pub mod ping_executor;
pub mod probe_loop;
pub mod render;
pub mod rolling_log;
pub mod stats;
pub mod tier;

pub use config::{AppConfig, LoopSettings};
pub use ping::{ProbeError, ProbeOutcome, ProbeRequest, Prober};
pub use ping_executor::IcmpProber;
pub use probe_loop::{LoopState, ProbeLoop, RunSummary};
pub use render::{Frame, Renderer, TerminalRenderer};
pub use rolling_log::RollingLog;
pub use stats::{StatsAggregator, StatsView};
pub use tier::{Thresholds, Tier};
