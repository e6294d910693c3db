use std::io;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use thiserror::Error;

/// Result of one probe attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub timestamp: DateTime<Local>,
    pub response_time: Option<f64>,
    pub success: bool,
}

impl ProbeOutcome {
    pub fn success(timestamp: DateTime<Local>, response_time_ms: f64) -> Self {
        Self {
            timestamp,
            response_time: Some(response_time_ms),
            success: true,
        }
    }

    pub fn failure(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            response_time: None,
            success: false,
        }
    }

    /// Elapsed milliseconds, present only for a successful reply.
    pub fn elapsed_ms(&self) -> Option<f64> {
        if self.success { self.response_time } else { None }
    }
}

/// Parameters handed to a [`Prober`] for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub host: String,
    pub count: u32,
    pub interval: Duration,
    pub timeout: Duration,
    pub size: usize,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid host '{0}'")]
    InvalidHost(String),
    #[error("cannot resolve host '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("host '{0}' resolved to no addresses")]
    NoAddress(String),
    #[error("cannot open ICMP socket: {0}")]
    Socket(#[source] io::Error),
}

/// Capability that sends probes to a host.
///
/// A probe that gets no reply within `request.timeout` must come back as a failed
/// outcome; only conditions that make the host unprobable at all are errors.
#[async_trait]
pub trait Prober {
    async fn probe(&mut self, request: &ProbeRequest) -> Result<Vec<ProbeOutcome>, ProbeError>;
}
