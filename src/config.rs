use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::ping::ProbeRequest;
use crate::tier::Thresholds;

/// Largest ICMP payload accepted on the command line.
pub const MAX_PAYLOAD_SIZE: usize = 65_500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{name} thresholds must satisfy low < high (got {low} and {high})")]
    InvalidThresholds { name: &'static str, low: f64, high: f64 },
    #[error("invalid {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

fn default_rtt_thresholds() -> Thresholds {
    Thresholds::RTT_MS
}

fn default_loss_thresholds() -> Thresholds {
    Thresholds::LOSS_PCT
}

/// Display settings read from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_rtt_thresholds")]
    pub rtt_thresholds: Thresholds,
    #[serde(default = "default_loss_thresholds")]
    pub loss_thresholds: Thresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rtt_thresholds: Thresholds::RTT_MS,
            loss_thresholds: Thresholds::LOSS_PCT,
        }
    }
}

impl AppConfig {
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pong").join("config.json"))
    }

    /// Loads the config from an explicit path, or from the default location if it exists.
    ///
    /// An explicit path must be readable; a broken default file only logs a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::get_config_path() {
            Some(path) if path.exists() => Self::from_file(&path).or_else(|e| {
                warn!("{e}; using defaults");
                Ok(Self::default())
            }),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, t) in [("rtt", self.rtt_thresholds), ("loss", self.loss_thresholds)] {
            if !t.is_ordered() {
                return Err(ConfigError::InvalidThresholds {
                    name,
                    low: t.low,
                    high: t.high,
                });
            }
        }
        Ok(())
    }
}

/// Parameters of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSettings {
    pub host: String,
    pub count: u32,
    pub interval: Duration,
    pub timeout: Duration,
    pub size: usize,
    pub infinite: bool,
}

impl LoopSettings {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            count: 4,
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(1),
            size: 56,
            infinite: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name, reason: &str| {
            Err(ConfigError::InvalidSetting {
                name,
                reason: reason.to_string(),
            })
        };

        if self.host.trim().is_empty() {
            return invalid("host", "must not be empty");
        }
        if self.count == 0 && !self.infinite {
            return invalid("count", "must be at least 1");
        }
        if self.timeout.is_zero() {
            return invalid("timeout", "must be greater than zero");
        }
        if self.size > MAX_PAYLOAD_SIZE {
            return invalid("size", "exceeds the maximum ICMP payload");
        }
        Ok(())
    }

    /// One probe per iteration; batching is left to the prober.
    pub fn request(&self) -> ProbeRequest {
        ProbeRequest {
            host: self.host.clone(),
            count: 1,
            interval: self.interval,
            timeout: self.timeout,
            size: self.size,
        }
    }
}

/// Converts a seconds value from the command line into a `Duration`.
pub fn seconds(name: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|e| ConfigError::InvalidSetting {
        name,
        reason: e.to_string(),
    })
}
