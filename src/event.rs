use std::fmt;

use chrono::NaiveTime;

use crate::ping::ProbeOutcome;
use crate::tier::{Thresholds, Tier};

/// One line of the rolling log, formatted from a probe outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    Reply {
        at: NaiveTime,
        host: String,
        bytes: usize,
        rtt_ms: f64,
        tier: Tier,
    },
    TimedOut {
        at: NaiveTime,
    },
}

impl LogLine {
    pub fn from_outcome(outcome: &ProbeOutcome, host: &str, bytes: usize, thresholds: Thresholds) -> Self {
        let at = outcome.timestamp.time();
        match outcome.elapsed_ms() {
            Some(rtt_ms) => LogLine::Reply {
                at,
                host: host.to_string(),
                bytes,
                rtt_ms,
                tier: thresholds.classify(rtt_ms),
            },
            None => LogLine::TimedOut { at },
        }
    }

    pub fn timed_out(at: NaiveTime) -> Self {
        LogLine::TimedOut { at }
    }

    /// Text before the colorized RTT, or the whole line for a timeout.
    pub fn prefix(&self) -> String {
        match self {
            LogLine::Reply { at, host, bytes, .. } => {
                format!("{} - Reply from {host}: bytes={bytes} time=", at.format("%H:%M:%S"))
            }
            LogLine::TimedOut { at } => format!("{} - Request timed out", at.format("%H:%M:%S")),
        }
    }

    /// The RTT segment with its unit, and its tier.
    pub fn rtt(&self) -> Option<(String, Tier)> {
        match self {
            LogLine::Reply { rtt_ms, tier, .. } => Some((format!("{}ms", format_value(*rtt_ms)), *tier)),
            LogLine::TimedOut { .. } => None,
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())?;
        if let Some((rtt, _)) = self.rtt() {
            f.write_str(&rtt)?;
        }
        Ok(())
    }
}

/// Formats a measurement with at least one decimal place (`40.0`, `12.3456`).
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
