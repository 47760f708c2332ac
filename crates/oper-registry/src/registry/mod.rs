//! # Operation Registry
//!
//! Each user agent owns one `OperRegistry`. It indexes the UA's in-flight
//! operations by the To/From identity of their protocol handle and by SIP
//! method, so an incoming message can be routed back to the operation it
//! belongs to.
//!
//! ## Layout
//!
//! A fixed array of buckets, each holding one list per method slot. The
//! bucket is the sum of the four identity hashes modulo the bucket count.
//! Lists are doubly linked so a node is unlinked in constant time through
//! the [`IndexHandle`] stored on its operation.
//!
//! The table is created by the first successful insertion and released by
//! [`free`](OperRegistry::free), [`free_no_destroy`](OperRegistry::free_no_destroy)
//! or drop.
//!
//! ## Threading
//!
//! The registry is not synchronized. Callers serialize access, typically
//! by keeping it inside the task that owns the user agent.

mod insert;
mod lookup;
mod remove;
mod teardown;

pub use lookup::MatchMode;

use std::fmt;

use serde::Serialize;
use uactl_sip_core::Method;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::handle::{IndexHandle, RegistryId};
use crate::method_slot::{METHOD_SLOTS, MethodSlot};
use crate::operation::Operation;
use crate::table::{BucketTable, IndexNode};

/// Occupancy figures for one registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Indexed operations
    pub total: usize,
    /// Indexed operations per method slot
    pub per_slot: [usize; METHOD_SLOTS],
    /// Non-empty (bucket, method) lists
    pub occupied_lists: usize,
    /// Length of the longest list
    pub longest_chain: usize,
    /// Bucket count of the table, 0 when unallocated
    pub bucket_count: usize,
}

pub struct OperRegistry<O: Operation> {
    id: RegistryId,
    config: RegistryConfig,
    table: Option<BucketTable<O>>,
    /// Epoch of the current (or most recent) table; bumped per table
    epoch: u32,
}

impl<O: Operation> OperRegistry<O> {
    /// Empty registry with the default configuration. No table is
    /// allocated until the first operation is added.
    pub fn new() -> Self {
        Self {
            id: RegistryId::next(),
            config: RegistryConfig::default(),
            table: None,
            epoch: 0,
        }
    }

    /// Empty registry with a validated configuration.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id: RegistryId::next(),
            config,
            table: None,
            epoch: 0,
        })
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Whether the bucket table currently exists
    pub fn is_allocated(&self) -> bool {
        self.table.is_some()
    }

    /// Number of indexed operations
    pub fn size(&self) -> usize {
        self.table.as_ref().map_or(0, BucketTable::count)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of indexed operations filed under a method's slot, or all of
    /// them for `None`. Every extension method counts toward the shared
    /// unknown slot.
    pub fn size_by_method(&self, method: Option<&Method>) -> usize {
        match method {
            None => self.count_all(),
            Some(method) => self.count_slot(MethodSlot::for_method(method)),
        }
    }

    /// Number of indexed operations in a numbered method slot.
    pub fn size_by_slot(&self, slot: usize) -> Result<usize> {
        let slot = MethodSlot::try_from(slot)?;
        Ok(self.count_slot(slot))
    }

    /// The operation an index handle refers to, if the handle is current.
    pub fn get(&self, handle: IndexHandle) -> Option<&O> {
        self.resolve(handle).ok().map(|node| &node.op)
    }

    /// Whether an operation's handle refers to a live node of this registry.
    pub fn contains(&self, op: &O) -> bool {
        op.index_handle()
            .is_some_and(|handle| self.resolve(handle).is_ok())
    }

    pub fn stats(&self) -> RegistryStats {
        let Some(table) = &self.table else {
            return RegistryStats::default();
        };
        let mut stats = RegistryStats {
            total: table.count(),
            bucket_count: table.bucket_count(),
            ..RegistryStats::default()
        };
        for (slot, len) in table.chain_lengths() {
            stats.per_slot[slot.index()] += len;
            stats.occupied_lists += 1;
            stats.longest_chain = stats.longest_chain.max(len);
        }
        stats
    }

    /// Check that a handle was issued here and its node is still live.
    fn resolve(&self, handle: IndexHandle) -> Result<&IndexNode<O>> {
        if handle.registry() != self.id {
            return Err(RegistryError::ForeignHandle {
                handle,
                registry: self.id,
            });
        }
        if handle.epoch() != self.epoch {
            return Err(RegistryError::StaleHandle(handle));
        }
        self.table
            .as_ref()
            .filter(|table| table.is_live(handle.slot(), handle.generation()))
            .and_then(|table| table.node(handle.slot()))
            .ok_or(RegistryError::StaleHandle(handle))
    }

    // Walks the slot's list in every bucket.
    fn count_slot(&self, slot: MethodSlot) -> usize {
        let Some(table) = &self.table else {
            return 0;
        };
        (0..table.bucket_count())
            .map(|bucket| table.list(bucket, slot).count())
            .sum()
    }

    fn count_all(&self) -> usize {
        MethodSlot::all().map(|slot| self.count_slot(slot)).sum()
    }
}

impl<O: Operation> Default for OperRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Operation> fmt::Debug for OperRegistry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperRegistry")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("allocated", &self.is_allocated())
            .field("size", &self.size())
            .finish()
    }
}

impl<O: Operation> Drop for OperRegistry<O> {
    fn drop(&mut self) {
        self.free_no_destroy();
    }
}
