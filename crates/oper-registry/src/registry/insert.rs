//! Indexing operations

use tracing::{debug, error};
use uactl_sip_core::{Address, Method, Uri};

use super::OperRegistry;
use crate::error::{Party, RegistryError, Result};
use crate::handle::IndexHandle;
use crate::hashed::HashedStr;
use crate::identity::{IdentityKey, parse_party};
use crate::method_slot::MethodSlot;
use crate::operation::Operation;
use crate::table::{BucketTable, IndexNode};

impl<O: Operation> OperRegistry<O> {
    /// Index an operation under the To/From values of its own protocol
    /// handle.
    pub fn add(&mut self, op: &O) -> Result<IndexHandle> {
        self.ensure_unindexed(op)?;

        let Some(endpoints) = op.endpoints() else {
            error!("Cannot index operation without a protocol handle");
            return Err(RegistryError::null_context("operation has no protocol handle"));
        };
        let Some(to) = endpoints.remote.as_ref() else {
            error!("Cannot index operation: protocol handle has no To value");
            return Err(RegistryError::bad_identity(Party::To, "missing"));
        };
        let Some(from) = endpoints.local.as_ref() else {
            error!("Cannot index operation: protocol handle has no From value");
            return Err(RegistryError::bad_identity(Party::From, "missing"));
        };

        self.insert(op, &IdentityKey::from_addresses(Some(to), Some(from)))
    }

    /// Index an operation under explicitly supplied addresses. Absent
    /// addresses index under placeholder fields.
    pub fn add_with_addrs(
        &mut self,
        op: &O,
        to: Option<&Address>,
        from: Option<&Address>,
    ) -> Result<IndexHandle> {
        self.ensure_unindexed(op)?;
        self.insert(op, &IdentityKey::from_addresses(to, from))
    }

    /// Index an operation under bare URIs.
    pub fn add_with_uris(
        &mut self,
        op: &O,
        to: Option<&Uri>,
        from: Option<&Uri>,
    ) -> Result<IndexHandle> {
        self.ensure_unindexed(op)?;
        self.insert(op, &IdentityKey::from_uris(to, from))
    }

    /// Index an operation under To/From header text.
    ///
    /// Absent or blank text indexes under placeholder fields. Text that is
    /// present but cannot be parsed is rejected with
    /// [`RegistryError::BadIdentity`].
    pub fn add_with_strs(
        &mut self,
        op: &O,
        to: Option<&str>,
        from: Option<&str>,
    ) -> Result<IndexHandle> {
        self.ensure_unindexed(op)?;
        let (to, from) = match (parse_party(Party::To, to), parse_party(Party::From, from)) {
            (Ok(to), Ok(from)) => (to, from),
            (Err(e), _) | (_, Err(e)) => {
                error!("Cannot index operation: {}", e);
                return Err(e);
            }
        };
        self.insert(op, &IdentityKey::from_addresses(to.as_ref(), from.as_ref()))
    }

    /// Index an operation under an already extracted identity key.
    pub fn add_with_key(&mut self, op: &O, key: &IdentityKey<'_>) -> Result<IndexHandle> {
        self.ensure_unindexed(op)?;
        self.insert(op, key)
    }

    fn ensure_unindexed(&self, op: &O) -> Result<()> {
        match op.index_handle() {
            Some(handle) => {
                error!("Operation is already indexed as {}", handle);
                Err(RegistryError::AlreadyIndexed { handle })
            }
            None => Ok(()),
        }
    }

    /// All fallible work happens before the node is linked, so a failed
    /// insert leaves the registry unchanged.
    fn insert(&mut self, op: &O, key: &IdentityKey<'_>) -> Result<IndexHandle> {
        let method = op.method();
        let node = match self.build_node(op, key, method) {
            Ok(node) => node,
            Err(e) => {
                error!("Failed to index operation in {}: {}", self.id, e);
                return Err(e);
            }
        };

        let created = self.table.is_none();
        if created {
            match BucketTable::with_buckets(self.config.bucket_count) {
                Ok(table) => {
                    self.table = Some(table);
                    self.epoch = self.epoch.wrapping_add(1);
                }
                Err(e) => {
                    error!("Failed to allocate operation table for {}: {}", self.id, e);
                    return Err(e);
                }
            }
            debug!(
                "Allocated operation table {} for {} with {} buckets",
                self.epoch, self.id, self.config.bucket_count
            );
        }
        let Some(table) = self.table.as_mut() else {
            return Err(RegistryError::null_context("operation table"));
        };

        let mut node = node;
        node.bucket = node.identity.bucket_index(table.bucket_count());
        let bucket = node.bucket;
        let slot = node.method_slot;

        match table.push_front(node) {
            Ok((index, generation)) => {
                let handle = IndexHandle::new(self.id, self.epoch, index, generation);
                op.set_index_handle(Some(handle));
                debug!(
                    "Indexed {} operation as {} (bucket {}, slot {})",
                    slot, handle, bucket, slot.index()
                );
                Ok(handle)
            }
            Err(e) => {
                if created {
                    self.table = None;
                }
                error!("Failed to index operation in {}: {}", self.id, e);
                Err(e)
            }
        }
    }

    fn build_node(&self, op: &O, key: &IdentityKey<'_>, method: Method) -> Result<IndexNode<O>> {
        let method_slot = MethodSlot::try_from(usize::from(method.code()))?;
        let method_name = match &method {
            Method::Extension(name) => Some(HashedStr::copied(Some(name.as_str()))?),
            _ => None,
        };
        let identity = key.hashed().to_owned_copy()?;
        Ok(IndexNode::new(
            op.clone(),
            identity,
            method,
            method_slot,
            method_name,
            0,
        ))
    }
}
