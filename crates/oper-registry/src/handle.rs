//! Back-references from an operation into the registry that indexes it.
//!
//! An [`IndexHandle`] names one index node: the registry that issued it, the
//! table epoch, the arena slot holding the node, and the slot's generation at
//! the time of issue. Removing a node bumps the generation, and every table a
//! registry creates gets a new epoch, so a handle kept past its node's
//! lifetime is detected instead of silently pointing at a reused slot, even
//! after the registry was freed and refilled.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one registry instance, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryId(u64);

impl RegistryId {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        RegistryId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oc-{}", self.0)
    }
}

/// Handle an operation stores while it is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexHandle {
    registry: RegistryId,
    epoch: u32,
    slot: u32,
    generation: u32,
}

impl IndexHandle {
    pub(crate) fn new(registry: RegistryId, epoch: u32, slot: u32, generation: u32) -> Self {
        Self {
            registry,
            epoch,
            slot,
            generation,
        }
    }

    /// Registry that issued this handle
    pub fn registry(&self) -> RegistryId {
        self.registry
    }

    /// Table epoch of the registry when the handle was issued
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Arena slot of the index node
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation of the slot when the handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for IndexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}/{}#{}",
            self.registry, self.epoch, self.slot, self.generation
        )
    }
}
