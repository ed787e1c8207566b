//! Pattern matching for generated addresses.
//!
//! A match is the pattern occurring anywhere in the address, either exactly
//! or after uppercasing both sides.

mod pattern;

pub use pattern::{matches, MatchResult, Pattern, PatternError};
