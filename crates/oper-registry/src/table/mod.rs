//! Fixed-size bucket table with per-method intrusive lists.
//!
//! `buckets[b][m]` is the head of a doubly linked list threaded through
//! nodes in the arena. New nodes go to the front, so a scan returns the
//! most recently inserted match first.

mod arena;

pub(crate) use arena::IndexNode;

use arena::NodeArena;

use crate::error::{RegistryError, Result};
use crate::method_slot::{METHOD_SLOTS, MethodSlot};

type ListHeads = [Option<u32>; METHOD_SLOTS];

pub(crate) struct BucketTable<O> {
    buckets: Vec<ListHeads>,
    arena: NodeArena<O>,
    count: usize,
}

impl<O> BucketTable<O> {
    pub(crate) fn with_buckets(bucket_count: usize) -> Result<Self> {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(bucket_count).map_err(|_| {
            RegistryError::allocation(bucket_count * std::mem::size_of::<ListHeads>())
        })?;
        buckets.resize(bucket_count, [None; METHOD_SLOTS]);
        Ok(Self {
            buckets,
            arena: NodeArena::new(),
            count: 0,
        })
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn count(&self) -> usize {
        debug_assert_eq!(self.count, self.arena.live());
        self.count
    }

    /// Link a node at the front of its list.
    pub(crate) fn push_front(&mut self, node: IndexNode<O>) -> Result<(u32, u32)> {
        let bucket = node.bucket;
        let slot = node.method_slot.index();
        let (index, generation) = self.arena.insert(node)?;

        let old_head = self.buckets[bucket][slot];
        if let Some(inserted) = self.arena.get_mut(index) {
            inserted.prev = None;
            inserted.next = old_head;
        }
        if let Some(head) = old_head.and_then(|h| self.arena.get_mut(h)) {
            head.prev = Some(index);
        }
        self.buckets[bucket][slot] = Some(index);
        self.count += 1;
        Ok((index, generation))
    }

    /// Unlink a node in O(1) and release its slot.
    pub(crate) fn unlink(&mut self, index: u32) -> Option<IndexNode<O>> {
        let (bucket, slot, prev, next) = {
            let node = self.arena.get(index)?;
            (node.bucket, node.method_slot.index(), node.prev, node.next)
        };

        match prev {
            None => self.buckets[bucket][slot] = next,
            Some(prev) => {
                if let Some(prev_node) = self.arena.get_mut(prev) {
                    prev_node.next = next;
                }
            }
        }
        if let Some(next_node) = next.and_then(|n| self.arena.get_mut(n)) {
            next_node.prev = prev;
        }

        let mut node = self.arena.release(index)?;
        node.prev = None;
        node.next = None;
        self.count -= 1;
        Some(node)
    }

    pub(crate) fn is_live(&self, index: u32, generation: u32) -> bool {
        self.arena.is_live(index, generation)
    }

    pub(crate) fn node(&self, index: u32) -> Option<&IndexNode<O>> {
        self.arena.get(index)
    }

    /// Nodes of one list, front to back
    pub(crate) fn list(&self, bucket: usize, slot: MethodSlot) -> ListIter<'_, O> {
        ListIter {
            table: self,
            cursor: self
                .buckets
                .get(bucket)
                .and_then(|heads| heads[slot.index()]),
        }
    }

    /// Length of every non-empty list
    pub(crate) fn chain_lengths(&self) -> impl Iterator<Item = (MethodSlot, usize)> + '_ {
        (0..self.buckets.len()).flat_map(move |bucket| {
            MethodSlot::all().filter_map(move |slot| {
                let len = self.list(bucket, slot).count();
                (len > 0).then_some((slot, len))
            })
        })
    }

    /// Unlink every node, bucket by bucket and list by list, handing each
    /// to `f`.
    pub(crate) fn drain_with(&mut self, mut f: impl FnMut(IndexNode<O>)) {
        for bucket in 0..self.buckets.len() {
            for slot in 0..METHOD_SLOTS {
                let mut cursor = self.buckets[bucket][slot].take();
                while let Some(index) = cursor {
                    let Some(node) = self.arena.release(index) else {
                        break;
                    };
                    cursor = node.next;
                    self.count -= 1;
                    f(node);
                }
            }
        }
    }
}

pub(crate) struct ListIter<'t, O> {
    table: &'t BucketTable<O>,
    cursor: Option<u32>,
}

impl<'t, O> Iterator for ListIter<'t, O> {
    type Item = &'t IndexNode<O>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = self.table.arena.get(index)?;
        self.cursor = node.next;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityKey;
    use uactl_sip_core::Method;

    fn node(tag: u32, bucket: usize, method: Method) -> IndexNode<u32> {
        let identity = IdentityKey::new(Some("u"), Some("h"), Some("v"), Some("k"))
            .hashed()
            .to_owned_copy()
            .unwrap();
        let slot = MethodSlot::for_method(&method);
        IndexNode::new(tag, identity, method, slot, None, bucket)
    }

    fn tags(table: &BucketTable<u32>, bucket: usize, method: &Method) -> Vec<u32> {
        table.list(bucket, MethodSlot::for_method(method)).map(|n| n.op).collect()
    }

    #[test]
    fn test_push_front_order() {
        let mut table = BucketTable::with_buckets(8).unwrap();
        for tag in 1..=3 {
            table.push_front(node(tag, 2, Method::Invite)).unwrap();
        }
        assert_eq!(tags(&table, 2, &Method::Invite), vec![3, 2, 1]);
        assert_eq!(tags(&table, 2, &Method::Bye), Vec::<u32>::new());
        assert_eq!(table.count(), 3);
    }

    #[test]
    fn test_unlink_head_middle_tail() {
        let mut table = BucketTable::with_buckets(4).unwrap();
        let handles: Vec<_> = (1..=4)
            .map(|tag| table.push_front(node(tag, 1, Method::Options)).unwrap().0)
            .collect();
        // list is 4, 3, 2, 1
        assert_eq!(table.unlink(handles[2]).map(|n| n.op), Some(3));
        assert_eq!(tags(&table, 1, &Method::Options), vec![4, 2, 1]);
        assert_eq!(table.unlink(handles[3]).map(|n| n.op), Some(4));
        assert_eq!(tags(&table, 1, &Method::Options), vec![2, 1]);
        assert_eq!(table.unlink(handles[0]).map(|n| n.op), Some(1));
        assert_eq!(tags(&table, 1, &Method::Options), vec![2]);
        assert!(table.unlink(handles[0]).is_none());
        assert_eq!(table.count(), 1);
        assert!(table.node(handles[1]).is_some());
    }

    #[test]
    fn test_drain_visits_everything_once() {
        let mut table = BucketTable::with_buckets(3).unwrap();
        table.push_front(node(1, 0, Method::Invite)).unwrap();
        table.push_front(node(2, 0, Method::Invite)).unwrap();
        table.push_front(node(3, 2, Method::Register)).unwrap();
        table.push_front(node(4, 1, Method::extension("FOO").unwrap())).unwrap();

        let mut seen = Vec::new();
        table.drain_with(|n| seen.push(n.op));
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(table.count(), 0);
        assert_eq!(table.chain_lengths().count(), 0);
    }

    #[test]
    fn test_chain_lengths() {
        let mut table = BucketTable::with_buckets(2).unwrap();
        table.push_front(node(1, 1, Method::Bye)).unwrap();
        table.push_front(node(2, 1, Method::Bye)).unwrap();
        table.push_front(node(3, 0, Method::Ack)).unwrap();
        let mut lengths: Vec<_> = table.chain_lengths().map(|(_, len)| len).collect();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 2]);
    }
}
