//! Screen output for the probe loop.
//!
//! [`Renderer`] is the seam the loop draws through; [`TerminalRenderer`] is the
//! crossterm implementation used by the binary.

use std::io::{self, Stdout, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{self, Clear, ClearType};

use crate::event::{LogLine, format_value};
use crate::probe_loop::LoopState;
use crate::stats::{StatsView, Tiered};
use crate::tier::Tier;

const FALLBACK_WIDTH: u16 = 80;

/// Everything drawn after one probe: recent log lines oldest first and the current stats.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub log: Vec<&'a LogLine>,
    pub stats: StatsView,
}

pub trait Renderer {
    /// Redraws the whole display. Nothing from a previous frame may remain visible.
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Prints the closing summary once the loop has stopped for `reason`.
    fn render_final(&mut self, stats: &StatsView, reason: LoopState) -> io::Result<()>;
}

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Good => Color::Green,
        Tier::Warn => Color::Yellow,
        Tier::Bad => Color::Red,
    }
}

fn paint(text: String, tier: Tier) -> String {
    text.with(tier_color(tier)).to_string()
}

fn tiered_text(value: Option<Tiered>, unit: &str) -> String {
    match value {
        Some(Tiered { value, tier }) => paint(format!("{}{unit}", format_value(value)), tier),
        None => "-".to_string(),
    }
}

/// Renders a log line with its RTT colored by tier.
pub fn log_line_text(line: &LogLine) -> String {
    match line.rtt() {
        Some((rtt, tier)) => format!("{}{}", line.prefix(), paint(rtt, tier)),
        None => line.prefix(),
    }
}

/// Builds the "Current Stats" panel.
pub fn stats_table(stats: &StatsView) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec!["Sent".to_string(), stats.sent.to_string()]);
    table.add_row(vec!["Received".to_string(), stats.received.to_string()]);
    table.add_row(vec!["Loss".to_string(), tiered_text(Some(stats.loss_pct), "%")]);
    table.add_row(vec!["RTT Min".to_string(), tiered_text(stats.rtt_min, "ms")]);
    table.add_row(vec!["RTT Max".to_string(), tiered_text(stats.rtt_max, "ms")]);
    table.add_row(vec!["RTT Avg".to_string(), tiered_text(Some(stats.rtt_avg), "ms")]);
    table
}

fn log_table(log: &[&LogLine], width: u16) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_width(width);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for line in log {
        table.add_row(vec![log_line_text(line)]);
    }
    table
}

/// Clear-then-paint renderer writing ANSI output to a terminal.
pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
    width: Option<u16>,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            width: None,
        }
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer with a fixed width, for writers that are not a terminal.
    pub fn with_width(out: W, width: u16) -> Self {
        Self {
            out,
            width: Some(width),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn width(&self) -> u16 {
        self.width
            .or_else(|| terminal::size().ok().map(|(cols, _)| cols))
            .unwrap_or(FALLBACK_WIDTH)
    }

    fn write_stats(&mut self, stats: &StatsView) -> io::Result<()> {
        writeln!(self.out, "{}", "Current Stats".italic())?;
        writeln!(self.out, "{}", stats_table(stats))
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let width = self.width();
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        if !frame.log.is_empty() {
            writeln!(self.out, "{}", log_table(&frame.log, width))?;
        }
        self.write_stats(&frame.stats)?;
        self.out.flush()
    }

    fn render_final(&mut self, stats: &StatsView, reason: LoopState) -> io::Result<()> {
        if reason == LoopState::Interrupted {
            writeln!(self.out, "\n{}", "Ping interrupted.".bold().yellow())?;
        }
        writeln!(self.out, "\n{}", "Final statistics:".bold().yellow())?;
        writeln!(self.out, "{}", stats_table(stats))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveTime};

    use super::*;
    use crate::ping::ProbeOutcome;
    use crate::stats::StatsAggregator;
    use crate::tier::Thresholds;

    fn view() -> StatsView {
        StatsAggregator::new().view(Thresholds::RTT_MS, Thresholds::LOSS_PCT)
    }

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn frame_contains_log_and_stats() {
        let at = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let line = LogLine::timed_out(at);
        let frame = Frame {
            log: vec![&line],
            stats: view(),
        };

        let mut renderer = TerminalRenderer::with_width(Vec::new(), 80);
        renderer.render(&frame).unwrap();
        let text = output(renderer);

        assert!(text.contains("10:00:00 - Request timed out"));
        assert!(text.contains("Current Stats"));
        assert!(text.contains("Received"));
        assert!(text.contains("RTT Avg"));
    }

    #[test]
    fn missing_extrema_render_as_dash() {
        let table = stats_table(&view()).to_string();
        assert!(table.contains('-'));
        assert!(!table.contains("inf"));
        assert!(!table.contains("NaN"));
    }

    #[test]
    fn final_render_announces_interruption() {
        let mut renderer = TerminalRenderer::with_width(Vec::new(), 80);
        renderer.render_final(&view(), LoopState::Interrupted).unwrap();
        let text = output(renderer);
        assert!(text.contains("Ping interrupted."));
        assert!(text.contains("Final statistics:"));

        let mut renderer = TerminalRenderer::with_width(Vec::new(), 80);
        renderer.render_final(&view(), LoopState::Completed).unwrap();
        let text = output(renderer);
        assert!(!text.contains("Ping interrupted."));
        assert!(text.contains("Final statistics:"));
    }

    #[test]
    fn tiers_reach_the_output_as_colors() {
        let mut stats = StatsAggregator::new();
        stats.record(&ProbeOutcome::success(Local::now(), 75.0));
        for _ in 0..3 {
            stats.record(&ProbeOutcome::failure(Local::now()));
        }
        let view = stats.view(Thresholds::RTT_MS, Thresholds::LOSS_PCT);
        assert_eq!(view.rtt_avg.tier, Tier::Warn);
        assert_eq!(view.loss_pct.tier, Tier::Bad);

        let table = stats_table(&view).to_string();
        assert!(table.contains(&"75.0ms".with(Color::Yellow).to_string()));
        assert!(table.contains(&"75.0%".with(Color::Red).to_string()));

        let line = LogLine::from_outcome(
            &ProbeOutcome::success(Local::now(), 75.0),
            "example.com",
            56,
            Thresholds::RTT_MS,
        );
        assert!(log_line_text(&line).ends_with(&"75.0ms".with(Color::Yellow).to_string()));
    }

    #[test]
    fn log_line_keeps_rtt_text() {
        let at = NaiveTime::from_hms_opt(8, 30, 15).unwrap();
        let line = LogLine::Reply {
            at,
            host: "example.com".to_string(),
            bytes: 56,
            rtt_ms: 75.25,
            tier: Tier::Warn,
        };
        let text = log_line_text(&line);
        assert!(text.starts_with("08:30:15 - Reply from example.com: bytes=56 time="));
        assert!(text.contains("75.25ms"));
    }
}
