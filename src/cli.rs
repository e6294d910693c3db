//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, LoopSettings, seconds};

/// A ping alternative with a live view of recent replies and running statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "pong", version, about)]
pub struct Args {
    /// The host to ping
    pub host: String,

    /// Number of packets to send
    #[arg(short, long, default_value_t = 4)]
    pub count: u32,

    /// Interval between packets (seconds)
    #[arg(short, long, default_value_t = 1.0)]
    pub interval: f64,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 1.0)]
    pub timeout: f64,

    /// Size of each packet (bytes)
    #[arg(short, long, default_value_t = 56)]
    pub size: usize,

    /// Ping the host infinitely
    #[arg(long)]
    pub infinite: bool,

    /// Read thresholds from this JSON file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn settings(&self) -> Result<LoopSettings, ConfigError> {
        let settings = LoopSettings {
            host: self.host.clone(),
            count: self.count,
            interval: seconds("interval", self.interval)?,
            timeout: seconds("timeout", self.timeout)?,
            size: self.size,
            infinite: self.infinite,
        };
        settings.validate()?;
        Ok(settings)
    }
}
