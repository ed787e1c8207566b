//! Numbers incoming matches and applies the hit limit.

use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

use crate::output::MatchSink;
use crate::worker::{CancellationToken, VanityMatch};

/// Drains the result intake on the calling thread.
pub struct ResultCollector<'a, M: ?Sized> {
    sink: &'a mut M,
    max_hits: u64,
    cancel: &'a CancellationToken,
    hits: u64,
}

impl<'a, M: MatchSink + ?Sized> ResultCollector<'a, M> {
    /// `max_hits == 0` means no limit.
    pub fn new(sink: &'a mut M, max_hits: u64, cancel: &'a CancellationToken) -> Self {
        Self {
            sink,
            max_hits,
            cancel,
            hits: 0,
        }
    }

    /// Receives until the intake disconnects or the limit is reached, and
    /// returns the number of matches received.
    ///
    /// Every received match is forwarded and counted, even if the sink
    /// fails. Reaching the limit cancels the run; anything still in flight
    /// after that is left undelivered.
    pub fn drain(mut self, intake: &Receiver<VanityMatch>) -> u64 {
        while let Ok(found) = intake.recv() {
            if self.accept(&found) {
                break;
            }
        }
        self.hits
    }

    /// Returns `true` once the limit has been reached.
    fn accept(&mut self, found: &VanityMatch) -> bool {
        self.hits += 1;
        let index = self.hits;
        debug!(
            hit = index,
            worker = found.worker_id,
            address = %found.address,
            "match received"
        );

        if let Err(e) = self.sink.on_match(index, found) {
            warn!(hit = index, address = %found.address, error = %e, "failed to record match");
        }

        if self.max_hits > 0 && index == self.max_hits {
            info!(max_hits = self.max_hits, "match limit reached, stopping workers");
            self.cancel.cancel();
            return true;
        }
        false
    }
}
