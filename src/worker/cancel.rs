//! Run-wide cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crossbeam_channel::{bounded, Receiver, Sender};

/// Shared stop signal for one search run.
///
/// Observable two ways: a flag load for the top of a worker loop, and a
/// receiver that becomes ready (disconnected) once cancelled, so blocking
/// operations can `select!` against it.
#[derive(Debug)]
pub struct CancellationToken {
    cancelled: AtomicBool,
    closer: Mutex<Option<Sender<()>>>,
    listener: Receiver<()>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (closer, listener) = bounded(0);
        Self {
            cancelled: AtomicBool::new(false),
            closer: Mutex::new(Some(closer)),
            listener,
        }
    }

    /// Sets the signal. Returns `true` only for the call that flipped it;
    /// later calls are no-ops.
    pub fn cancel(&self) -> bool {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return false;
        }
        // Dropping the only sender wakes every `recv` on the listener.
        self.closer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        true
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Receiver that never yields a message and disconnects on cancel.
    pub fn listener(&self) -> &Receiver<()> {
        &self.listener
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
