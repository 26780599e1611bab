// pubkey.rs — 32-byte account/signer identity.

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const PUBKEY_BYTES: usize = 32;

/// A 32-byte public key. Encodes to 32 raw bytes under borsh, and to a base58
/// string under serde and `Display`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    pub const fn new(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }

    /// Read a key from the first 32 bytes of `input`.
    pub fn from_slice(input: &[u8]) -> Option<Self> {
        input
            .get(..PUBKEY_BYTES)
            .and_then(|slice| slice.try_into().ok())
            .map(Self)
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePubkeyError {
    #[error("base58 key decoded to {0} bytes, expected 32")]
    WrongLength(usize),
    #[error("key must be 64 hex chars or valid base58 (got len {0})")]
    Invalid(usize),
}

/// Accepts 64 hex chars (optionally `0x`-prefixed) or base58.
impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start_matches("0x");
        if trimmed.len() == PUBKEY_BYTES * 2 {
            if let Ok(bytes) = hex::decode(trimmed) {
                let mut arr = [0u8; PUBKEY_BYTES];
                arr.copy_from_slice(&bytes);
                return Ok(Self(arr));
            }
        }
        match bs58::decode(s).into_vec() {
            Ok(bytes) if bytes.len() == PUBKEY_BYTES => {
                let mut arr = [0u8; PUBKEY_BYTES];
                arr.copy_from_slice(&bytes);
                Ok(Self(arr))
            }
            Ok(bytes) => Err(ParsePubkeyError::WrongLength(bytes.len())),
            Err(_) => Err(ParsePubkeyError::Invalid(s.len())),
        }
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
