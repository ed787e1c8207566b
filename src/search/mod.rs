//! The search run: a coordinator driving the worker pool and collecting
//! results on the caller's thread.

mod collector;
mod coordinator;

pub use collector::ResultCollector;
pub use coordinator::{Coordinator, RunConfig, RunSummary};
