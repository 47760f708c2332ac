//! Finding operations by identity and method

use tracing::{debug, error};
use uactl_sip_core::{Address, Method, Uri};

use super::OperRegistry;
use crate::error::Party;
use crate::hashed::HashedStr;
use crate::identity::{IdentityKey, parse_party};
use crate::method_slot::MethodSlot;
use crate::operation::Operation;

/// Which lists of the identity's bucket a lookup scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode<'n> {
    /// Every method slot in ascending order; first match wins
    Any,
    /// One method slot
    Slot(MethodSlot),
    /// The unknown-method slot, restricted to one extension method name
    Name(&'n str),
}

impl<'n> MatchMode<'n> {
    /// Slot of a method. Any extension method selects the whole unknown
    /// slot regardless of its name.
    pub fn for_method(method: &Method) -> Self {
        MatchMode::Slot(MethodSlot::for_method(method))
    }

    /// Unknown-method lookup. An absent or empty name matches any
    /// extension method.
    pub fn unknown_named(name: Option<&'n str>) -> Self {
        match name {
            Some(name) if !name.is_empty() => MatchMode::Name(name),
            _ => MatchMode::Slot(MethodSlot::UNKNOWN),
        }
    }
}

impl<O: Operation> OperRegistry<O> {
    /// Most recently indexed operation with this identity, in any method.
    pub fn find(&self, to: Option<&Address>, from: Option<&Address>) -> Option<&O> {
        self.lookup(&IdentityKey::from_addresses(to, from), MatchMode::Any)
    }

    /// Most recently indexed operation with this identity and method.
    pub fn find_method(
        &self,
        to: Option<&Address>,
        from: Option<&Address>,
        method: &Method,
    ) -> Option<&O> {
        self.lookup(
            &IdentityKey::from_addresses(to, from),
            MatchMode::for_method(method),
        )
    }

    /// Most recently indexed extension-method operation with this identity
    /// and, if given, this method name.
    pub fn find_unknown_method(
        &self,
        to: Option<&Address>,
        from: Option<&Address>,
        name: Option<&str>,
    ) -> Option<&O> {
        self.lookup(
            &IdentityKey::from_addresses(to, from),
            MatchMode::unknown_named(name),
        )
    }

    /// Lookup by bare URIs.
    pub fn find_uri(&self, to: Option<&Uri>, from: Option<&Uri>, mode: MatchMode<'_>) -> Option<&O> {
        self.lookup(&IdentityKey::from_uris(to, from), mode)
    }

    /// [`find`](Self::find) on To/From header text. Unparseable text is
    /// logged and reported as not found.
    pub fn find_str(&self, to: Option<&str>, from: Option<&str>) -> Option<&O> {
        self.lookup_str(to, from, MatchMode::Any)
    }

    /// [`find_method`](Self::find_method) on To/From header text.
    pub fn find_method_str(&self, to: Option<&str>, from: Option<&str>, method: &Method) -> Option<&O> {
        self.lookup_str(to, from, MatchMode::for_method(method))
    }

    /// [`find_unknown_method`](Self::find_unknown_method) on To/From header
    /// text.
    pub fn find_unknown_method_str(
        &self,
        to: Option<&str>,
        from: Option<&str>,
        name: Option<&str>,
    ) -> Option<&O> {
        self.lookup_str(to, from, MatchMode::unknown_named(name))
    }

    /// Scan the identity's bucket in the lists selected by `mode` and
    /// return the first operation whose identity (and method name, for
    /// [`MatchMode::Name`]) matches exactly. An empty name matches any
    /// extension method, like [`MatchMode::Slot`] on the extension slot.
    pub fn lookup(&self, key: &IdentityKey<'_>, mode: MatchMode<'_>) -> Option<&O> {
        let Some(table) = &self.table else {
            debug!("Lookup in {} with no operation table", self.id);
            return None;
        };

        let query = key.hashed();
        let bucket = query.bucket_index(table.bucket_count());

        let node = match mode {
            MatchMode::Any => MethodSlot::all().find_map(|slot| {
                table
                    .list(bucket, slot)
                    .find(|node| node.matches(&query, None))
            }),
            MatchMode::Slot(slot) => table
                .list(bucket, slot)
                .find(|node| node.matches(&query, None)),
            MatchMode::Name("") => table
                .list(bucket, MethodSlot::UNKNOWN)
                .find(|node| node.matches(&query, None)),
            MatchMode::Name(name) => {
                let name = HashedStr::borrowed(Some(name));
                table
                    .list(bucket, MethodSlot::UNKNOWN)
                    .find(|node| node.matches(&query, Some(&name)))
            }
        };
        node.map(|node| &node.op)
    }

    fn lookup_str(&self, to: Option<&str>, from: Option<&str>, mode: MatchMode<'_>) -> Option<&O> {
        let (to, from) = match (parse_party(Party::To, to), parse_party(Party::From, from)) {
            (Ok(to), Ok(from)) => (to, from),
            (Err(e), _) | (_, Err(e)) => {
                error!("Lookup in {} with unreadable identity: {}", self.id, e);
                return None;
            }
        };
        self.lookup(&IdentityKey::from_addresses(to.as_ref(), from.as_ref()), mode)
    }
}
