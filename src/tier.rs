use serde::Deserialize;

/// Classification bucket for a measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Good,
    Warn,
    Bad,
}

/// A pair of cut-off points: values below `low` are good, values at or above `high` are bad.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Thresholds {
    /// Round-trip time thresholds in milliseconds.
    pub const RTT_MS: Thresholds = Thresholds { low: 50.0, high: 100.0 };
    /// Packet loss thresholds in percent.
    pub const LOSS_PCT: Thresholds = Thresholds { low: 10.0, high: 20.0 };

    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_ordered(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low < self.high
    }

    pub fn classify(&self, value: f64) -> Tier {
        classify(value, *self)
    }
}

pub fn classify(value: f64, thresholds: Thresholds) -> Tier {
    if value < thresholds.low {
        Tier::Good
    } else if value < thresholds.high {
        Tier::Warn
    } else {
        Tier::Bad
    }
}

/// Rounds to two decimal places, the precision used for the displayed average.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
