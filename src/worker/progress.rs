//! Periodic throughput sampling.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{select, tick};
use tracing::debug;

use crate::output::ProgressSink;

use super::{CancellationToken, GenerationCounter};

/// Samples the generation counter on a fixed interval and publishes
/// `(total, rate)` until the run is cancelled.
pub struct ProgressAggregator {
    handle: Option<JoinHandle<()>>,
}

impl ProgressAggregator {
    pub fn spawn(
        interval: Duration,
        counter: Arc<GenerationCounter>,
        cancel: Arc<CancellationToken>,
        mut sink: Box<dyn ProgressSink>,
    ) -> Self {
        let handle = thread::Builder::new()
            .name("vanity-progress".into())
            .spawn(move || {
                let ticker = tick(interval);
                let mut last_count = counter.total();
                let mut last_at = Instant::now();

                loop {
                    select! {
                        recv(ticker) -> at => {
                            let now = at.unwrap_or_else(|_| Instant::now());
                            let current = counter.total();
                            let rate = throughput(
                                current.saturating_sub(last_count),
                                now.saturating_duration_since(last_at),
                            );
                            last_count = current;
                            last_at = now;
                            sink.on_progress(current, rate);
                        }
                        recv(cancel.listener()) -> _ => break,
                    }
                }

                debug!("progress aggregator stopped");
            })
            .expect("Failed to spawn progress thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Waits for the sampling thread. Only returns once the run is cancelled.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Candidates per second over `elapsed`, truncated.
pub fn throughput(delta: u64, elapsed: Duration) -> u64 {
    let micros = elapsed.as_micros();
    if micros == 0 {
        return 0;
    }
    (u128::from(delta) * 1_000_000 / micros) as u64
}
