//! Candidate sources: where search workers get fresh identities from.

use rand::RngCore;
use secp256k1::{All, Secp256k1};

use super::{AddressFormat, Keypair};

/// One generated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Enough to rebuild the identity later (secret key hex for keypairs)
    pub entropy: String,
    /// Textual address the pattern is matched against, without any prefix
    pub address: String,
}

/// Why a source could not produce a candidate this time.
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error("random bytes are not a valid secret key")]
    InvalidSecretKey,

    #[error("candidate source exhausted")]
    Exhausted,
}

/// Produces random candidates on demand.
///
/// Shared by every worker of a run, so implementations must be callable
/// concurrently. Failures are treated as transient and retried by the caller.
pub trait CandidateSource: Send + Sync {
    fn generate(&self) -> Result<Candidate, CandidateError>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for std::sync::Arc<S> {
    fn generate(&self) -> Result<Candidate, CandidateError> {
        (**self).generate()
    }
}

/// Random secp256k1 keys rendered as account addresses.
pub struct KeypairSource {
    secp: Secp256k1<All>,
    format: AddressFormat,
}

impl KeypairSource {
    pub fn new(format: AddressFormat) -> Self {
        Self {
            secp: Secp256k1::new(),
            format,
        }
    }
}

impl Default for KeypairSource {
    fn default() -> Self {
        Self::new(AddressFormat::default())
    }
}

impl CandidateSource for KeypairSource {
    fn generate(&self) -> Result<Candidate, CandidateError> {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);

        let keypair = Keypair::from_secret_bytes(&self.secp, secret)?;
        Ok(Candidate {
            entropy: keypair.private_key_hex(),
            address: keypair.address().render(self.format),
        })
    }
}
