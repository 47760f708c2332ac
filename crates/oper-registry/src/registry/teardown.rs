//! Releasing the whole table

use tracing::debug;

use super::OperRegistry;
use crate::operation::Operation;

impl<O: Operation> OperRegistry<O> {
    /// Release the table, clearing every operation's handle and then
    /// calling [`Operation::destroy`] on it. Returns the number of
    /// operations released. A second call is a no-op.
    pub fn free(&mut self) -> usize {
        self.teardown(true)
    }

    /// Release the table and clear every operation's handle without
    /// destroying the operations. Used when the operations are owned and
    /// released elsewhere.
    pub fn free_no_destroy(&mut self) -> usize {
        self.teardown(false)
    }

    fn teardown(&mut self, destroy: bool) -> usize {
        let Some(mut table) = self.table.take() else {
            return 0;
        };

        let mut released = 0;
        table.drain_with(|node| {
            let op = node.op;
            op.set_index_handle(None);
            released += 1;
            if destroy {
                op.destroy();
            }
        });

        debug!(
            "Released operation table of {}: {} operations{}",
            self.id,
            released,
            if destroy { " destroyed" } else { "" }
        );
        released
    }
}
