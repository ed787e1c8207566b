//! Worker pool for parallel vanity address search.
//!
//! This module provides:
//! - CPU search workers and the shared generation counter
//! - The run-wide cancellation token
//! - Pool spawn/join with a bounded result intake
//! - Throughput sampling

mod cancel;
mod cpu;
mod pool;
mod progress;

pub use cancel::CancellationToken;
pub use cpu::{CpuWorker, GenerationCounter};
pub use pool::{VanityMatch, WorkerPool};
pub use progress::{throughput, ProgressAggregator};
