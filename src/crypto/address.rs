//! 20-byte account addresses and their textual renderings.

use std::fmt;

use clap::ValueEnum;
use tiny_keccak::{Hasher, Keccak};

/// Length of an address rendered as hex, without the `0x` prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// An account address (last 20 bytes of the public key hash).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    #[inline]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Lowercase hex, no prefix.
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// EIP-55 mixed-case checksum encoding with `0x` prefix.
    pub fn to_checksum(&self) -> String {
        format!("0x{}", self.checksum_hex())
    }

    /// EIP-55 mixed case, no prefix.
    ///
    /// A letter is uppercased when the matching nibble of
    /// `keccak256(lowercase_hex)` is 8 or above; digits are left alone.
    pub fn checksum_hex(&self) -> String {
        let lower = self.to_hex();
        let mut hasher = Keccak::v256();
        hasher.update(lower.as_bytes());
        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        lower
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let nibble = if i % 2 == 0 {
                    hash[i / 2] >> 4
                } else {
                    hash[i / 2] & 0x0f
                };
                if nibble >= 8 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    }

    /// The 40 hex digits searched by the matcher, in the requested case.
    ///
    /// No `0x` prefix, so a pattern can only ever match address digits.
    pub fn render(&self, format: AddressFormat) -> String {
        match format {
            AddressFormat::Checksum => self.checksum_hex(),
            AddressFormat::Lower => self.to_hex(),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

/// Textual form searched by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AddressFormat {
    /// EIP-55 mixed case (`5aAeb6...`)
    #[default]
    Checksum,
    /// All lowercase (`5aaeb6...`)
    Lower,
}

impl AddressFormat {
    /// Whether addresses in this form can contain uppercase letters.
    pub fn has_uppercase(self) -> bool {
        matches!(self, AddressFormat::Checksum)
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFormat::Checksum => f.write_str("checksum"),
            AddressFormat::Lower => f.write_str("lower"),
        }
    }
}
