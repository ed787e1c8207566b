//! Where matches and progress samples go.
//!
//! The search core only sees the two traits here; the binary wires them to a
//! results file and the terminal.

mod console;
mod file;

use std::io;
use std::path::PathBuf;

use crate::worker::VanityMatch;

pub use console::{Console, ConsoleHits, ConsoleProgress};
pub use file::FileSink;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot open output file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write match to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Receives each match once, numbered from 1 in arrival order.
///
/// An error is reported by the caller but never stops the search.
pub trait MatchSink {
    fn on_match(&mut self, index: u64, found: &VanityMatch) -> Result<(), OutputError>;
}

/// Receives throughput samples. Best effort: a dropped sample is harmless.
pub trait ProgressSink: Send {
    fn on_progress(&mut self, total_generated: u64, per_second: u64);
}

impl<F> ProgressSink for F
where
    F: FnMut(u64, u64) + Send,
{
    fn on_progress(&mut self, total_generated: u64, per_second: u64) {
        self(total_generated, per_second)
    }
}

/// Fans every match out to several sinks.
///
/// All sinks are tried even when one fails; the first error is returned.
#[derive(Default)]
pub struct Tee {
    sinks: Vec<Box<dyn MatchSink>>,
}

impl Tee {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl MatchSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl MatchSink for Tee {
    fn on_match(&mut self, index: u64, found: &VanityMatch) -> Result<(), OutputError> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.on_match(index, found) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
