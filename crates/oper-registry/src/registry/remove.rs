//! Unindexing operations

use tracing::{debug, warn};

use super::OperRegistry;
use crate::error::{RegistryError, Result};
use crate::operation::Operation;

impl<O: Operation> OperRegistry<O> {
    /// Remove an operation from the index and clear its handle.
    ///
    /// Returns `Ok(false)` when the operation has no handle or the registry
    /// has no table, so repeated removal is harmless. A handle issued by
    /// another registry, by an earlier table of this one, or one whose node
    /// is already gone, is reported as an error. Neither case touches the
    /// registry or the operation.
    pub fn remove(&mut self, op: &O) -> Result<bool> {
        let Some(handle) = op.index_handle() else {
            return Ok(false);
        };

        if handle.registry() != self.id {
            warn!(
                "Refusing to remove operation {}: not indexed by {}",
                handle, self.id
            );
            return Err(RegistryError::ForeignHandle {
                handle,
                registry: self.id,
            });
        }

        let Some(table) = self.table.as_mut() else {
            debug!("Nothing to remove for {}: {} has no operation table", handle, self.id);
            return Ok(false);
        };

        if handle.epoch() != self.epoch || !table.is_live(handle.slot(), handle.generation()) {
            warn!("Operation {} refers to a node that no longer exists", handle);
            return Err(RegistryError::StaleHandle(handle));
        }

        let Some(node) = table.unlink(handle.slot()) else {
            return Err(RegistryError::StaleHandle(handle));
        };
        op.set_index_handle(None);
        debug!(
            "Removed {} operation {} ({} remaining)",
            node.method,
            handle,
            table.count()
        );
        Ok(true)
    }
}
