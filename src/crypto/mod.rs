//! Candidate generation.
//!
//! - `source`: the `CandidateSource` capability the search engine consumes
//! - `keypair`: secp256k1 secret key → address derivation
//! - `address`: address encodings (lowercase hex, EIP-55 checksum)

mod address;
mod keypair;
mod source;

pub use address::{Address, AddressFormat, ADDRESS_HEX_LEN};
pub use keypair::Keypair;
pub use source::{Candidate, CandidateError, CandidateSource, KeypairSource};
