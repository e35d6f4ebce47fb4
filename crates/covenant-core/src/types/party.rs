//! Ledger identities and signing keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Length of a public key in bytes.
const KEY_LEN: usize = 32;

/// An opaque 32-byte signing key.
///
/// The platform guarantees a stable binding between a party and its key;
/// this type never verifies signatures itself — the validator only checks
/// key *membership* in a transaction's signer set.
///
/// # Example
///
/// ```rust
/// use covenant_core::types::PublicKey;
///
/// let key = PublicKey::from_bytes([7u8; 32]);
/// let parsed = PublicKey::parse(&key.to_hex()).unwrap();
/// assert_eq!(key, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey([u8; KEY_LEN]);

impl PublicKey {
    /// Creates a key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses a key from a 64-character hex string.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidKey` if the string is not 64 hex digits.
    pub fn parse(hex: &str) -> CoreResult<Self> {
        if hex.len() != KEY_LEN * 2 {
            return Err(CoreError::invalid_key(format!(
                "expected {} hex digits, found {}",
                KEY_LEN * 2,
                hex.len()
            )));
        }

        let mut bytes = [0u8; KEY_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| CoreError::invalid_key(format!("invalid hex digits: {pair}")))?;
        }
        Ok(Self(bytes))
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Formats the key as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A named ledger identity bound to a signing key.
///
/// Parties are opaque handles supplied by the platform's identity model.
/// Two parties are the same entity exactly when name and key both match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    /// Display name of the party
    name: String,
    /// The party's signing key
    key: PublicKey,
}

impl Party {
    /// Creates a new party.
    #[must_use]
    pub fn new(name: impl Into<String>, key: PublicKey) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }

    /// Returns the party's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the party's signing key.
    #[must_use]
    pub fn key(&self) -> &PublicKey {
        &self.key
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
