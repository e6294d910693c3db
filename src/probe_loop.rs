//! The sequential probe → record → render → pace loop.

use std::io;

use chrono::Local;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, LoopSettings};
use crate::event::LogLine;
use crate::ping::{ProbeOutcome, Prober};
use crate::render::{Frame, Renderer};
use crate::rolling_log::RollingLog;
use crate::stats::{StatsAggregator, StatsView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Interrupted,
    Completed,
}

/// How a run ended and what it measured.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub state: LoopState,
    pub stats: StatsAggregator,
}

pub struct ProbeLoop<P, R> {
    settings: LoopSettings,
    config: AppConfig,
    prober: P,
    renderer: R,
    stats: StatsAggregator,
    log: RollingLog<LogLine>,
    state: LoopState,
}

impl<P: Prober, R: Renderer> ProbeLoop<P, R> {
    pub fn new(settings: LoopSettings, config: AppConfig, prober: P, renderer: R) -> Self {
        Self {
            settings,
            config,
            prober,
            renderer,
            stats: StatsAggregator::new(),
            log: RollingLog::new(),
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn view(&self) -> StatsView {
        self.stats.view(self.config.rtt_thresholds, self.config.loss_thresholds)
    }

    /// Runs until the configured count is reached or `cancel` fires.
    ///
    /// The final statistics are rendered on every exit path, including a render failure.
    pub async fn run(&mut self, cancel: &CancellationToken) -> io::Result<RunSummary> {
        info!(
            "probing {} (count={}, infinite={})",
            self.settings.host, self.settings.count, self.settings.infinite
        );

        let driven = self.drive(cancel).await;
        if self.state == LoopState::Running {
            self.state = LoopState::Interrupted;
        }

        let view = self.view();
        let finished = self.renderer.render_final(&view, self.state);
        info!(
            "stopped ({:?}) after {} sent, {} received",
            self.state,
            self.stats.sent(),
            self.stats.received()
        );

        driven.and(finished)?;
        Ok(RunSummary {
            state: self.state,
            stats: self.stats.clone(),
        })
    }

    async fn drive(&mut self, cancel: &CancellationToken) -> io::Result<()> {
        let request = self.settings.request();

        loop {
            if cancel.is_cancelled() {
                self.state = LoopState::Interrupted;
                return Ok(());
            }

            let probed = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                result = self.prober.probe(&request) => Some(result),
            };
            let Some(result) = probed else {
                debug!("interrupted while a probe was in flight");
                self.state = LoopState::Interrupted;
                return Ok(());
            };

            let outcome = match result {
                Ok(outcomes) => outcomes.into_iter().next(),
                Err(e) => {
                    warn!("probe failed: {e}");
                    None
                }
            };
            self.ingest(outcome.as_ref());

            let frame = Frame {
                log: self.log.entries().collect(),
                stats: self.view(),
            };
            self.renderer.render(&frame)?;

            if !self.settings.infinite && self.stats.sent() >= u64::from(self.settings.count) {
                self.state = LoopState::Completed;
                return Ok(());
            }

            if !self.settings.interval.is_zero() {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        self.state = LoopState::Interrupted;
                        return Ok(());
                    }
                    () = tokio::time::sleep(self.settings.interval) => {}
                }
            }
        }
    }

    /// Records one probe's result; an empty batch counts as a timeout.
    fn ingest(&mut self, outcome: Option<&ProbeOutcome>) {
        let line = match outcome {
            Some(outcome) => {
                self.stats.record(outcome);
                LogLine::from_outcome(
                    outcome,
                    &self.settings.host,
                    self.settings.size,
                    self.config.rtt_thresholds,
                )
            }
            None => {
                self.stats.record_missing();
                LogLine::timed_out(Local::now().time())
            }
        };
        debug!("{line}");
        self.log.append(line);
    }
}
