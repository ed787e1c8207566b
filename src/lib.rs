//! # vanity_search
//!
//! Multi-threaded search for addresses containing a pattern.
//!
//! ## Architecture
//!
//! - `crypto`: Candidate sources (random keys and their addresses)
//! - `matcher`: Substring matching with optional case folding
//! - `worker`: Search threads, cancellation, counters, progress sampling
//! - `search`: Run coordination and result collection
//! - `output`: Match and progress sinks (results file, terminal)
//! - `config`: Command-line configuration

pub mod config;
pub mod crypto;
pub mod matcher;
pub mod output;
pub mod search;
pub mod worker;

pub use config::{Config, ConfigError};
pub use crypto::{AddressFormat, Candidate, CandidateError, CandidateSource, KeypairSource};
pub use matcher::{MatchResult, Pattern, PatternError};
pub use output::{MatchSink, OutputError, ProgressSink};
pub use search::{Coordinator, RunConfig, RunSummary};
pub use worker::{CancellationToken, VanityMatch};
