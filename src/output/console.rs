//! Terminal presentation of hits and the live status line.

use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::matcher::Pattern;
use crate::worker::VanityMatch;

use super::{MatchSink, OutputError, ProgressSink};

/// Spinner for the status line, with hits printed above it.
///
/// When stdout is not a terminal the bar is hidden and every line is printed
/// plainly instead.
pub struct Console {
    pattern: Pattern,
    bar: ProgressBar,
}

impl Console {
    /// Console on stdout. The spinner only ticks when stats are shown.
    pub fn stdout(pattern: Pattern, show_stats: bool) -> Arc<Self> {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        if show_stats && !bar.is_hidden() {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        Self::with_bar(pattern, bar)
    }

    pub fn with_bar(pattern: Pattern, bar: ProgressBar) -> Arc<Self> {
        Arc::new(Self { pattern, bar })
    }

    pub fn hit_sink(self: &Arc<Self>) -> ConsoleHits {
        ConsoleHits(Arc::clone(self))
    }

    pub fn progress_sink(self: &Arc<Self>) -> ConsoleProgress {
        ConsoleProgress(Arc::clone(self))
    }

    /// Colours the matched part of `address` green.
    pub fn highlight(&self, address: &str) -> String {
        match self.pattern.find(address) {
            Some(span) => format!(
                "{}{}{}",
                &address[..span.start],
                style(&address[span.clone()]).green().bold(),
                &address[span.end..]
            ),
            None => address.to_string(),
        }
    }

    pub fn hit_line(&self, index: u64, address: &str) -> String {
        format!(
            "{} {}",
            style(format!("[hit {index}]")).green(),
            self.highlight(address)
        )
    }

    pub fn stats_line(total: u64, rate: u64) -> String {
        format!(
            "{} generated={total}, rate≈{rate} addresses/sec",
            style("[stats]").cyan()
        )
    }

    pub fn print_hit(&self, index: u64, address: &str) {
        let line = self.hit_line(index, address);
        if self.bar.is_hidden() {
            println!("{line}");
        } else {
            self.bar.println(line);
        }
    }

    pub fn print_stats(&self, total: u64, rate: u64) {
        let line = Self::stats_line(total, rate);
        if self.bar.is_hidden() {
            println!("{line}");
        } else {
            self.bar.set_message(line);
        }
    }

    /// Removes the status line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

/// Match sink printing hits to the console.
pub struct ConsoleHits(Arc<Console>);

impl MatchSink for ConsoleHits {
    fn on_match(&mut self, index: u64, found: &VanityMatch) -> Result<(), OutputError> {
        self.0.print_hit(index, &found.address);
        Ok(())
    }
}

/// Progress sink updating the console status line.
pub struct ConsoleProgress(Arc<Console>);

impl ProgressSink for ConsoleProgress {
    fn on_progress(&mut self, total_generated: u64, per_second: u64) {
        self.0.print_stats(total_generated, per_second);
    }
}
