//! CPU search worker: generate, count, match, deliver.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{select, Sender};
use tracing::debug;

use crate::crypto::CandidateSource;
use crate::matcher::Pattern;

use super::{CancellationToken, VanityMatch};

/// Candidates successfully derived during a run, across all workers.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    generated: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    /// Best-effort snapshot while workers run, exact once they are joined.
    pub fn total(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Searching,
    Terminated,
}

/// One search loop, run on its own thread.
pub struct CpuWorker<S> {
    id: usize,
    pattern: Pattern,
    source: Arc<S>,
    result_tx: Sender<VanityMatch>,
    cancel: Arc<CancellationToken>,
    counter: Arc<GenerationCounter>,
}

impl<S: CandidateSource> CpuWorker<S> {
    pub fn new(
        id: usize,
        pattern: Pattern,
        source: Arc<S>,
        result_tx: Sender<VanityMatch>,
        cancel: Arc<CancellationToken>,
        counter: Arc<GenerationCounter>,
    ) -> Self {
        Self {
            id,
            pattern,
            source,
            result_tx,
            cancel,
            counter,
        }
    }

    /// Runs until the run is cancelled or the result intake goes away.
    pub fn run(&self) {
        debug!(worker = self.id, "worker started");

        let mut state = WorkerState::Searching;
        while state == WorkerState::Searching {
            state = self.step();
        }

        debug!(worker = self.id, "worker stopped");
    }

    fn step(&self) -> WorkerState {
        if self.cancel.is_cancelled() {
            return WorkerState::Terminated;
        }

        let candidate = match self.source.generate() {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!(worker = self.id, error = %e, "candidate derivation failed");
                return WorkerState::Searching;
            }
        };
        self.counter.increment();

        if !self.pattern.matches(&candidate.address).is_match() {
            return WorkerState::Searching;
        }

        debug!(worker = self.id, address = %candidate.address, "match");
        self.deliver(VanityMatch {
            address: candidate.address,
            entropy: candidate.entropy,
            worker_id: self.id,
        })
    }

    /// Blocks on a full intake until there is room or the run is cancelled.
    /// A match that loses the race to cancellation is dropped.
    fn deliver(&self, found: VanityMatch) -> WorkerState {
        select! {
            send(self.result_tx, found) -> sent => match sent {
                Ok(()) => WorkerState::Searching,
                Err(_) => WorkerState::Terminated,
            },
            recv(self.cancel.listener()) -> _ => WorkerState::Terminated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Candidate, CandidateError};
    use crossbeam_channel::bounded;
    use std::sync::atomic::AtomicUsize;

    /// Yields `address-<n>` where every third call fails.
    struct Flaky {
        calls: AtomicUsize,
    }

    impl CandidateSource for Flaky {
        fn generate(&self) -> Result<Candidate, CandidateError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n % 3 == 2 {
                return Err(CandidateError::InvalidSecretKey);
            }
            Ok(Candidate {
                entropy: format!("{n:064x}"),
                address: format!("address-{n}"),
            })
        }
    }

    fn worker(
        pattern: &str,
        capacity: usize,
    ) -> (
        CpuWorker<Flaky>,
        crossbeam_channel::Receiver<VanityMatch>,
        Arc<CancellationToken>,
        Arc<GenerationCounter>,
    ) {
        let (tx, rx) = bounded(capacity);
        let cancel = Arc::new(CancellationToken::new());
        let counter = Arc::new(GenerationCounter::new());
        let worker = CpuWorker::new(
            7,
            Pattern::new(pattern, true).unwrap(),
            Arc::new(Flaky {
                calls: AtomicUsize::new(0),
            }),
            tx,
            cancel.clone(),
            counter.clone(),
        );
        (worker, rx, cancel, counter)
    }

    #[test]
    fn test_failed_derivations_not_counted() {
        let (worker, _rx, _cancel, counter) = worker("never", 1);
        for _ in 0..9 {
            assert_eq!(worker.step(), WorkerState::Searching);
        }
        assert_eq!(counter.total(), 6);
    }

    #[test]
    fn test_match_is_delivered() {
        let (worker, rx, _cancel, counter) = worker("address-1", 4);
        worker.step();
        worker.step();

        let found = rx.try_recv().unwrap();
        assert_eq!(found.address, "address-1");
        assert_eq!(found.entropy, format!("{:064x}", 1));
        assert_eq!(found.worker_id, 7);
        assert_eq!(counter.total(), 2);
    }

    #[test]
    fn test_cancelled_worker_does_nothing() {
        let (worker, rx, cancel, counter) = worker("address", 4);
        cancel.cancel();
        worker.run();
        assert_eq!(counter.total(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_blocked_send_yields_to_cancellation() {
        // Capacity 1 with nobody receiving: the second match blocks.
        let (worker, rx, cancel, _counter) = worker("address", 1);
        let canceller = {
            let cancel = cancel.clone();
            std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(50));
                cancel.cancel();
            })
        };

        worker.run();
        canceller.join().unwrap();
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_closed_intake_terminates() {
        let (worker, rx, _cancel, _counter) = worker("address", 1);
        drop(rx);
        assert_eq!(worker.step(), WorkerState::Terminated);
    }
}
