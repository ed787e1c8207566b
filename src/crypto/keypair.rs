//! secp256k1 keypair derivation.

use secp256k1::{PublicKey, Secp256k1, SecretKey, Signing};
use tiny_keccak::{Hasher, Keccak};

use super::{Address, CandidateError};

/// A secret key together with the address it controls.
#[derive(Debug, Clone)]
pub struct Keypair {
    secret_key: [u8; 32],
    address: Address,
}

impl Keypair {
    /// Derives the keypair for 32 bytes of entropy.
    ///
    /// Fails when the bytes are zero or not below the curve order; callers
    /// drawing random entropy should simply draw again.
    pub fn from_secret_bytes<C: Signing>(
        secp: &Secp256k1<C>,
        secret_bytes: [u8; 32],
    ) -> Result<Self, CandidateError> {
        let secret_key =
            SecretKey::from_slice(&secret_bytes).map_err(|_| CandidateError::InvalidSecretKey)?;
        let public_key = PublicKey::from_secret_key(secp, &secret_key);

        Ok(Self {
            secret_key: secret_bytes,
            address: Self::derive_address(&public_key),
        })
    }

    /// keccak256 of the 64-byte uncompressed point (0x04 tag dropped), last 20 bytes.
    #[inline]
    fn derive_address(public_key: &PublicKey) -> Address {
        let uncompressed = public_key.serialize_uncompressed();

        let mut hasher = Keccak::v256();
        hasher.update(&uncompressed[1..]);
        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        let mut address_bytes = [0u8; 20];
        address_bytes.copy_from_slice(&hash[12..]);
        Address::from_bytes(address_bytes)
    }

    /// Secret key as lowercase hex, no prefix.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }

    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}
