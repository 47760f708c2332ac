//! Slot arena holding index nodes.
//!
//! Freed slots go on a free list and are reused. Each slot carries a
//! generation counter that is bumped on release, so `(slot, generation)`
//! pairs from before a release no longer resolve.

use uactl_sip_core::Method;

use crate::error::{RegistryError, Result};
use crate::hashed::HashedStr;
use crate::identity::Identity;
use crate::method_slot::MethodSlot;

/// One indexed operation with its owned identity copy and list links.
pub(crate) struct IndexNode<O> {
    pub(crate) op: O,
    pub(crate) identity: Identity<'static>,
    pub(crate) method: Method,
    pub(crate) method_slot: MethodSlot,
    /// Extension method name, kept only for nodes in the unknown slot
    pub(crate) method_name: Option<HashedStr<'static>>,
    pub(crate) bucket: usize,
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
}

impl<O> IndexNode<O> {
    pub(crate) fn new(
        op: O,
        identity: Identity<'static>,
        method: Method,
        method_slot: MethodSlot,
        method_name: Option<HashedStr<'static>>,
        bucket: usize,
    ) -> Self {
        Self {
            op,
            identity,
            method,
            method_slot,
            method_name,
            bucket,
            prev: None,
            next: None,
        }
    }

    /// Identity match, then (for named lookups) method name match.
    pub(crate) fn matches(&self, query: &Identity<'_>, name: Option<&HashedStr<'_>>) -> bool {
        if !self.identity.cheap_eq(query) {
            return false;
        }
        match name {
            None => self.identity.matches(query),
            Some(name) => {
                let stored = match &self.method_name {
                    Some(stored) => stored,
                    None => return false,
                };
                stored.cheap_eq(name) && self.identity.matches(query) && stored.matches(name)
            }
        }
    }
}

struct Slot<O> {
    generation: u32,
    node: Option<IndexNode<O>>,
}

pub(crate) struct NodeArena<O> {
    slots: Vec<Slot<O>>,
    free: Vec<u32>,
    live: usize,
}

impl<O> NodeArena<O> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Store a node, returning its slot and the slot's generation.
    ///
    /// Nothing changes if storage cannot be grown.
    pub(crate) fn insert(&mut self, node: IndexNode<O>) -> Result<(u32, u32)> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            self.live += 1;
            return Ok((index, slot.generation));
        }

        let index = u32::try_from(self.slots.len())
            .map_err(|_| RegistryError::allocation(std::mem::size_of::<Slot<O>>()))?;
        self.slots
            .try_reserve(1)
            .map_err(|_| RegistryError::allocation(std::mem::size_of::<Slot<O>>()))?;
        // Keep room for every slot on the free list so release never allocates.
        let wanted = self.slots.len() + 1 - self.free.len();
        self.free
            .try_reserve(wanted)
            .map_err(|_| RegistryError::allocation(wanted * std::mem::size_of::<u32>()))?;

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        self.live += 1;
        Ok((index, 0))
    }

    pub(crate) fn get(&self, index: u32) -> Option<&IndexNode<O>> {
        self.slots.get(index as usize)?.node.as_ref()
    }

    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut IndexNode<O>> {
        self.slots.get_mut(index as usize)?.node.as_mut()
    }

    pub(crate) fn is_live(&self, index: u32, generation: u32) -> bool {
        self.slots
            .get(index as usize)
            .is_some_and(|slot| slot.generation == generation && slot.node.is_some())
    }

    /// Take the node out of its slot and put the slot on the free list.
    pub(crate) fn release(&mut self, index: u32) -> Option<IndexNode<O>> {
        let slot = self.slots.get_mut(index as usize)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live -= 1;
        Some(node)
    }

    pub(crate) fn live(&self) -> usize {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityKey;

    fn node(tag: u32) -> IndexNode<u32> {
        let identity = IdentityKey::new(Some("a"), Some("b"), Some("c"), Some("d"))
            .hashed()
            .to_owned_copy()
            .unwrap();
        IndexNode::new(tag, identity, Method::Invite, MethodSlot::for_method(&Method::Invite), None, 0)
    }

    #[test]
    fn test_release_bumps_generation_and_reuses_slot() {
        let mut arena = NodeArena::new();
        let (first, gen0) = arena.insert(node(1)).unwrap();
        assert!(arena.is_live(first, gen0));

        let released = arena.release(first).unwrap();
        assert_eq!(released.op, 1);
        assert!(!arena.is_live(first, gen0));
        assert!(arena.release(first).is_none());

        let (reused, gen1) = arena.insert(node(2)).unwrap();
        assert_eq!(reused, first);
        assert_ne!(gen1, gen0);
        assert!(!arena.is_live(first, gen0));
        assert_eq!(arena.get(reused).map(|n| n.op), Some(2));
        assert_eq!(arena.live(), 1);
    }

    #[test]
    fn test_named_match_needs_stored_name() {
        let query = IdentityKey::new(Some("a"), Some("b"), Some("c"), Some("d")).hashed();
        let foo = HashedStr::borrowed(Some("FOO"));
        let plain = node(1);
        assert!(plain.matches(&query, None));
        assert!(!plain.matches(&query, Some(&foo)));

        let mut named = node(2);
        named.method_name = Some(HashedStr::copied(Some("FOO")).unwrap());
        assert!(named.matches(&query, Some(&foo)));
        assert!(!named.matches(&query, Some(&HashedStr::borrowed(Some("BAR")))));
    }
}
