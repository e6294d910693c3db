use crate::ping::ProbeOutcome;
use crate::tier::{Thresholds, Tier, round2};

/// Running aggregate over every probe of a run.
///
/// Updates are O(1) and no history is kept, so memory stays flat in infinite mode.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsAggregator {
    sent: u64,
    received: u64,
    rtt_min: f64,
    rtt_max: f64,
    rtt_sum: f64,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self {
            sent: 0,
            received: 0,
            rtt_min: f64::INFINITY,
            rtt_max: 0.0,
            rtt_sum: 0.0,
        }
    }
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &ProbeOutcome) {
        self.sent += 1;
        if let Some(rtt) = outcome.elapsed_ms() {
            self.received += 1;
            self.rtt_sum += rtt;
            self.rtt_min = self.rtt_min.min(rtt);
            self.rtt_max = self.rtt_max.max(rtt);
        }
    }

    /// Counts a probe that produced no outcome at all.
    pub fn record_missing(&mut self) {
        self.sent += 1;
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn loss_percentage(&self) -> f64 {
        if self.sent == 0 {
            return 0.0;
        }
        (self.sent - self.received) as f64 / self.sent as f64 * 100.0
    }

    pub fn average_rtt(&self) -> f64 {
        if self.received == 0 {
            return 0.0;
        }
        self.rtt_sum / self.received as f64
    }

    /// Smallest RTT seen; `None` until the first reply.
    pub fn min_rtt(&self) -> Option<f64> {
        (self.received > 0).then_some(self.rtt_min)
    }

    pub fn max_rtt(&self) -> Option<f64> {
        (self.received > 0).then_some(self.rtt_max)
    }

    pub fn view(&self, rtt: Thresholds, loss: Thresholds) -> StatsView {
        let tiered = |value: f64, thresholds: Thresholds| Tiered {
            value,
            tier: thresholds.classify(value),
        };
        let loss_pct = self.loss_percentage();

        StatsView {
            sent: self.sent,
            received: self.received,
            loss_pct: tiered(loss_pct, loss),
            rtt_min: self.min_rtt().map(|v| tiered(v, rtt)),
            rtt_max: self.max_rtt().map(|v| tiered(v, rtt)),
            rtt_avg: tiered(round2(self.average_rtt()), rtt),
        }
    }
}

/// A displayed value together with its tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tiered {
    pub value: f64,
    pub tier: Tier,
}

/// Read-only projection of the aggregate handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub sent: u64,
    pub received: u64,
    pub loss_pct: Tiered,
    pub rtt_min: Option<Tiered>,
    pub rtt_max: Option<Tiered>,
    /// Rounded to two decimals before classification.
    pub rtt_avg: Tiered,
}
