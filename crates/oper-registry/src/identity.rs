//! Identity keys: the To/From user and host quadruple an operation is
//! indexed by.

use std::str::FromStr;

use uactl_sip_core::{Address, Uri};

use crate::error::{Party, RegistryError, Result};
use crate::hashed::HashedStr;

/// Text stored for an absent or empty identity field.
///
/// A real field spelled exactly `<nil>` is indistinguishable from an absent
/// one.
pub const NIL_PLACEHOLDER: &str = "<nil>";

/// Substitute [`NIL_PLACEHOLDER`] for an absent or empty value.
pub fn normalize(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NIL_PLACEHOLDER,
    }
}

/// Borrowed To/From user and host values, before hashing.
///
/// Any field may be absent. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityKey<'a> {
    pub to_user: Option<&'a str>,
    pub to_host: Option<&'a str>,
    pub from_user: Option<&'a str>,
    pub from_host: Option<&'a str>,
}

impl<'a> IdentityKey<'a> {
    pub fn new(
        to_user: Option<&'a str>,
        to_host: Option<&'a str>,
        from_user: Option<&'a str>,
        from_host: Option<&'a str>,
    ) -> Self {
        Self {
            to_user,
            to_host,
            from_user,
            from_host,
        }
    }

    /// Key from To and From header values
    pub fn from_addresses(to: Option<&'a Address>, from: Option<&'a Address>) -> Self {
        Self::from_uris(to.map(|a| &a.uri), from.map(|a| &a.uri))
    }

    /// Key from bare URIs
    pub fn from_uris(to: Option<&'a Uri>, from: Option<&'a Uri>) -> Self {
        Self {
            to_user: to.and_then(Uri::user),
            to_host: to.and_then(Uri::host),
            from_user: from.and_then(Uri::user),
            from_host: from.and_then(Uri::host),
        }
    }

    /// Normalize absent fields and hash all four.
    pub fn hashed(&self) -> Identity<'a> {
        Identity {
            to_user: HashedStr::borrowed(Some(normalize(self.to_user))),
            to_host: HashedStr::borrowed(Some(normalize(self.to_host))),
            from_user: HashedStr::borrowed(Some(normalize(self.from_user))),
            from_host: HashedStr::borrowed(Some(normalize(self.from_host))),
        }
    }
}

/// Four hashed identity fields, placeholders already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity<'a> {
    to_user: HashedStr<'a>,
    to_host: HashedStr<'a>,
    from_user: HashedStr<'a>,
    from_host: HashedStr<'a>,
}

impl<'a> Identity<'a> {
    pub fn to_user(&self) -> &HashedStr<'a> {
        &self.to_user
    }

    pub fn to_host(&self) -> &HashedStr<'a> {
        &self.to_host
    }

    pub fn from_user(&self) -> &HashedStr<'a> {
        &self.from_user
    }

    pub fn from_host(&self) -> &HashedStr<'a> {
        &self.from_host
    }

    /// Sum of the four field hashes. Never overflows: each term is below 2^32.
    pub fn bucket_seed(&self) -> u64 {
        u64::from(self.to_user.hash())
            + u64::from(self.to_host.hash())
            + u64::from(self.from_user.hash())
            + u64::from(self.from_host.hash())
    }

    /// Bucket this identity lands in for a table of `bucket_count` buckets.
    pub fn bucket_index(&self, bucket_count: usize) -> usize {
        debug_assert!(bucket_count > 0);
        (self.bucket_seed() % bucket_count as u64) as usize
    }

    /// Length and hash agree on all four fields
    pub fn cheap_eq(&self, other: &Identity<'_>) -> bool {
        self.to_user.cheap_eq(&other.to_user)
            && self.to_host.cheap_eq(&other.to_host)
            && self.from_user.cheap_eq(&other.from_user)
            && self.from_host.cheap_eq(&other.from_host)
    }

    /// Exact match of all four fields. Bytes are only compared once every
    /// field's length and hash agree.
    pub fn matches(&self, other: &Identity<'_>) -> bool {
        self.cheap_eq(other)
            && self.to_user.matches(&other.to_user)
            && self.to_host.matches(&other.to_host)
            && self.from_user.matches(&other.from_user)
            && self.from_host.matches(&other.from_host)
    }

    /// Copy all four fields into storage owned by the identity.
    pub fn to_owned_copy(&self) -> Result<Identity<'static>> {
        Ok(Identity {
            to_user: self.to_user.to_owned_copy()?,
            to_host: self.to_host.to_owned_copy()?,
            from_user: self.from_user.to_owned_copy()?,
            from_host: self.from_host.to_owned_copy()?,
        })
    }
}

/// Parse a raw To or From value. Absent or blank text means "no address".
pub fn parse_party(party: Party, raw: Option<&str>) -> Result<Option<Address>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Address::from_str(text)
            .map(Some)
            .map_err(|e| RegistryError::bad_identity(party, e.to_string())),
    }
}
