//! Worker pool management.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver};

use crate::crypto::CandidateSource;
use crate::matcher::Pattern;

use super::cpu::{CpuWorker, GenerationCounter};
use super::CancellationToken;

/// Intake slots per worker, so bursts of matches do not block producers.
const INTAKE_SLOTS_PER_WORKER: usize = 4;

/// A generated address that contained the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityMatch {
    /// The address as it was matched
    pub address: String,
    /// Entropy needed to rebuild the identity (secret key hex for keypairs)
    pub entropy: String,
    /// The ID of the worker that found this match
    pub worker_id: usize,
}

/// A set of search threads feeding one bounded result intake.
pub struct WorkerPool {
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    result_rx: Receiver<VanityMatch>,
    cancel: Arc<CancellationToken>,
}

impl WorkerPool {
    /// Spawns `num_workers` threads sharing the source, pattern, counter and
    /// cancellation token.
    ///
    /// The pool keeps no sender of its own: the intake disconnects once the
    /// last worker exits.
    pub fn spawn<S>(
        num_workers: usize,
        pattern: &Pattern,
        source: Arc<S>,
        counter: Arc<GenerationCounter>,
        cancel: Arc<CancellationToken>,
    ) -> Self
    where
        S: CandidateSource + 'static,
    {
        let (result_tx, result_rx) = bounded(num_workers * INTAKE_SLOTS_PER_WORKER);

        let handles = (0..num_workers)
            .map(|id| {
                let worker = CpuWorker::new(
                    id,
                    pattern.clone(),
                    source.clone(),
                    result_tx.clone(),
                    cancel.clone(),
                    counter.clone(),
                );

                thread::Builder::new()
                    .name(format!("vanity-worker-{}", id))
                    .spawn(move || worker.run())
                    .expect("Failed to spawn worker thread")
            })
            .collect();

        Self {
            num_workers,
            handles: Some(handles),
            result_rx,
            cancel,
        }
    }

    /// The intake all workers deliver into.
    pub fn results(&self) -> &Receiver<VanityMatch> {
        &self.result_rx
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stops the workers and waits for every thread to exit.
    pub fn join(mut self) {
        self.stop();
        self.join_handles();
    }

    fn join_handles(&mut self) {
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
        self.join_handles();
    }
}
