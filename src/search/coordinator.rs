//! Run lifecycle: spawn, collect, cancel, join.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::crypto::CandidateSource;
use crate::matcher::{Pattern, PatternError};
use crate::output::{MatchSink, ProgressSink};
use crate::worker::{CancellationToken, GenerationCounter, ProgressAggregator, WorkerPool};

use super::ResultCollector;

/// Immutable parameters of one search run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pattern: Pattern,
    workers: usize,
    max_hits: u64,
}

impl RunConfig {
    /// `max_hits == 0` searches until cancelled from outside.
    pub fn new(
        pattern: &str,
        case_sensitive: bool,
        workers: usize,
        max_hits: u64,
    ) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(
            Pattern::new(pattern, case_sensitive)?,
            workers,
            max_hits,
        ))
    }

    /// A worker count of zero is raised to one.
    pub fn from_pattern(pattern: Pattern, workers: usize, max_hits: u64) -> Self {
        if workers == 0 {
            warn!("worker count must be at least 1, using 1");
        }
        Self {
            pattern,
            workers: workers.max(1),
            max_hits,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn max_hits(&self) -> u64 {
        self.max_hits
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidates successfully derived by all workers
    pub total_generated: u64,
    /// Matches received by the collector
    pub total_matches: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Average candidates per second over the whole run.
    pub fn average_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_generated as f64 / secs
        } else {
            0.0
        }
    }
}

/// Owns one search run.
///
/// The counter and cancellation token are created here rather than globally,
/// so independent runs never share state.
pub struct Coordinator {
    config: RunConfig,
    counter: Arc<GenerationCounter>,
    cancel: Arc<CancellationToken>,
    progress: Option<(Duration, Box<dyn ProgressSink>)>,
}

impl Coordinator {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            counter: Arc::new(GenerationCounter::new()),
            cancel: Arc::new(CancellationToken::new()),
            progress: None,
        }
    }

    /// Publishes throughput to `sink` every `interval` while the run lasts.
    pub fn with_progress(mut self, interval: Duration, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some((interval, Box::new(sink)));
        self
    }

    /// Handle for stopping the run from outside, e.g. on Ctrl+C.
    pub fn cancel_token(&self) -> Arc<CancellationToken> {
        Arc::clone(&self.cancel)
    }

    pub fn counter(&self) -> Arc<GenerationCounter> {
        Arc::clone(&self.counter)
    }

    /// Searches until the hit limit is reached or the run is cancelled.
    ///
    /// Blocks the calling thread, which acts as the result collector. Every
    /// spawned thread has exited by the time this returns.
    pub fn run<S, M>(self, source: S, sink: &mut M) -> RunSummary
    where
        S: CandidateSource + 'static,
        M: MatchSink + ?Sized,
    {
        let Coordinator {
            config,
            counter,
            cancel,
            progress,
        } = self;

        info!(
            pattern = %config.pattern,
            case_sensitive = config.pattern.is_case_sensitive(),
            workers = config.workers,
            max_hits = config.max_hits,
            "search started"
        );
        let start_time = Instant::now();

        let pool = WorkerPool::spawn(
            config.workers,
            &config.pattern,
            Arc::new(source),
            counter.clone(),
            cancel.clone(),
        );
        let aggregator = progress.map(|(interval, sink)| {
            ProgressAggregator::spawn(interval, counter.clone(), cancel.clone(), sink)
        });

        let total_matches = ResultCollector::new(sink, config.max_hits, &cancel).drain(pool.results());

        pool.join();
        if let Some(aggregator) = aggregator {
            aggregator.join();
        }

        let summary = RunSummary {
            total_generated: counter.total(),
            total_matches,
            elapsed: start_time.elapsed(),
        };
        info!(
            generated = summary.total_generated,
            matches = summary.total_matches,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "search finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_clamps_workers() {
        let config = RunConfig::new("ab", false, 0, 3).unwrap();
        assert_eq!(config.workers(), 1);
        assert_eq!(config.max_hits(), 3);
        assert_eq!(config.pattern().upper(), "AB");
    }

    #[test]
    fn test_run_config_rejects_empty_pattern() {
        assert_eq!(
            RunConfig::new("", true, 4, 0).unwrap_err(),
            PatternError::Empty
        );
    }

    #[test]
    fn test_average_rate() {
        let summary = RunSummary {
            total_generated: 1000,
            total_matches: 1,
            elapsed: Duration::from_secs(4),
        };
        assert_eq!(summary.average_rate(), 250.0);

        let instant = RunSummary {
            elapsed: Duration::ZERO,
            ..summary
        };
        assert_eq!(instant.average_rate(), 0.0);
    }
}
