//! Strings paired with their length and polynomial hash.
//!
//! The registry compares identity strings field by field in the order
//! length, hash, bytes. Almost every mismatch is settled by the first two
//! integers, so the bytes are read only for real candidates.

use std::borrow::Cow;
use std::fmt;

use crate::error::{RegistryError, Result};

/// Multiplier of the rolling hash
pub const HASH_BASE: u64 = 31;

/// Prime modulus of the rolling hash
pub const HASH_MODULUS: u64 = 1_000_000_009;

/// Polynomial hash of a byte string.
///
/// `hash = sum(byte[i] * 31^i) mod 1_000_000_009`, with bytes taken as
/// unsigned. The empty string hashes to 0. Intermediate products stay well
/// inside `u64` and the result always fits in `u32`.
///
/// Strings longer than about six bytes do not hash like the legacy 32-bit
/// implementation, which let `hash * pow` wrap and read bytes as signed
/// `char`. Only values computed by this function are ever compared.
pub fn poly_hash(bytes: &[u8]) -> u32 {
    let mut hash: u64 = 0;
    let mut pow: u64 = 1;
    for &byte in bytes {
        hash = (hash + u64::from(byte) * pow) % HASH_MODULUS;
        pow = (pow * HASH_BASE) % HASH_MODULUS;
    }
    hash as u32
}

/// A string with its precomputed length and hash.
///
/// Query-side values borrow their text. Values stored in the registry own
/// a private copy, made with [`HashedStr::to_owned_copy`].
#[derive(Debug, Clone)]
pub struct HashedStr<'a> {
    len: usize,
    hash: u32,
    text: Cow<'a, str>,
}

impl<'a> HashedStr<'a> {
    /// Hash a borrowed string. An absent value is treated as empty.
    pub fn borrowed(text: Option<&'a str>) -> Self {
        let text = text.unwrap_or("");
        Self {
            len: text.len(),
            hash: poly_hash(text.as_bytes()),
            text: Cow::Borrowed(text),
        }
    }

    /// Hash a string and store a private copy of it.
    pub fn copied(text: Option<&str>) -> Result<HashedStr<'static>> {
        HashedStr::borrowed(text).to_owned_copy()
    }

    /// Detach from the borrowed text. Fails instead of aborting when the
    /// copy cannot be allocated.
    pub fn to_owned_copy(&self) -> Result<HashedStr<'static>> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(self.len)
            .map_err(|_| RegistryError::allocation(self.len))?;
        owned.push_str(&self.text);
        Ok(HashedStr {
            len: self.len,
            hash: self.hash,
            text: Cow::Owned(owned),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length and hash agree
    pub fn cheap_eq(&self, other: &HashedStr<'_>) -> bool {
        self.len == other.len && self.hash == other.hash
    }

    /// Full comparison: length, then hash, then bytes
    pub fn matches(&self, other: &HashedStr<'_>) -> bool {
        self.cheap_eq(other) && self.text.as_bytes() == other.text.as_bytes()
    }
}

impl PartialEq<HashedStr<'_>> for HashedStr<'_> {
    fn eq(&self, other: &HashedStr<'_>) -> bool {
        self.matches(other)
    }
}

impl Eq for HashedStr<'_> {}

impl fmt::Display for HashedStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
