//! Ordered index of account records keyed by account number

use std::iter::FusedIterator;

use crate::store::{AccountRecord, LinkedQueue};
use crate::types::*;

type NodeId = usize;

/// Stable reference to one record in an [`AccountIndex`]
///
/// Unlike an account number, a handle names exactly one record even when
/// several records share the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(NodeId);

#[derive(Debug)]
struct IndexNode {
    key: AccountId,
    record: AccountRecord,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Unbalanced binary search tree owning every account record
///
/// Strictly smaller keys descend left, equal or greater keys descend right,
/// so a duplicate account number is accepted and lands deeper in the right
/// subtree of the earlier one. Nodes are stored in an arena and never
/// removed, which keeps every handle valid for the life of the index. All
/// walks are iterative; tree height is unbounded.
#[derive(Debug, Default)]
pub struct AccountIndex {
    nodes: Vec<IndexNode>,
    root: Option<NodeId>,
}

impl AccountIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record below the last node on its descent path
    pub fn insert(&mut self, record: AccountRecord) -> RecordHandle {
        let key = record.id();
        let id = self.nodes.len();
        self.nodes.push(IndexNode {
            key,
            record,
            left: None,
            right: None,
        });

        let Some(mut current) = self.root else {
            self.root = Some(id);
            return RecordHandle(id);
        };

        loop {
            let node = &mut self.nodes[current];
            let child = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
            match *child {
                Some(next) => current = next,
                None => {
                    *child = Some(id);
                    return RecordHandle(id);
                }
            }
        }
    }

    fn position(&self, id: AccountId) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            if id == node.key {
                return Some(index);
            }
            current = if id < node.key { node.left } else { node.right };
        }
        None
    }

    fn position_by_name(&self, name: &str) -> Option<NodeId> {
        self.level_order()
            .find(|&index| self.nodes[index].record.owner_name() == name)
    }

    /// Record with the given account number, found by BST descent
    pub fn lookup(&self, id: AccountId) -> Option<&AccountRecord> {
        self.position(id).map(|index| &self.nodes[index].record)
    }

    /// Mutable access to the record with the given account number
    pub fn lookup_mut(&mut self, id: AccountId) -> Option<&mut AccountRecord> {
        let index = self.position(id)?;
        Some(&mut self.nodes[index].record)
    }

    /// First record in level order whose owner name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<&AccountRecord> {
        self.position_by_name(name)
            .map(|index| &self.nodes[index].record)
    }

    /// Mutable variant of [`find_by_name`](Self::find_by_name)
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut AccountRecord> {
        let index = self.position_by_name(name)?;
        Some(&mut self.nodes[index].record)
    }

    /// Handle of the first record in level order whose owner name matches
    pub fn handle_by_name(&self, name: &str) -> Option<RecordHandle> {
        self.position_by_name(name).map(RecordHandle)
    }

    /// Record behind a handle issued by this index
    pub fn get(&self, handle: RecordHandle) -> Option<&AccountRecord> {
        self.nodes.get(handle.0).map(|node| &node.record)
    }

    pub fn get_mut(&mut self, handle: RecordHandle) -> Option<&mut AccountRecord> {
        self.nodes.get_mut(handle.0).map(|node| &mut node.record)
    }

    /// Records in ascending account-number order
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder {
            nodes: &self.nodes,
            stack: Vec::new(),
            next: self.root,
        }
    }

    /// Records in level order, root first
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            nodes: &self.nodes,
            order: self.level_order(),
        }
    }

    fn level_order(&self) -> LevelOrder<'_> {
        let mut queue = LinkedQueue::new();
        if let Some(root) = self.root {
            queue.enqueue(root);
        }
        LevelOrder {
            nodes: &self.nodes,
            queue,
        }
    }

    /// Number of levels on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        height
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// Level-order walk over node handles driven by a [`LinkedQueue`]
struct LevelOrder<'a> {
    nodes: &'a [IndexNode],
    queue: LinkedQueue<NodeId>,
}

impl Iterator for LevelOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.queue.is_empty() {
            return None;
        }
        let current = *self.queue.front().ok()?;
        self.queue.dequeue();

        let node = &self.nodes[current];
        if let Some(left) = node.left {
            self.queue.enqueue(left);
        }
        if let Some(right) = node.right {
            self.queue.enqueue(right);
        }
        Some(current)
    }
}

/// Iterator returned by [`AccountIndex::breadth_first`]
pub struct BreadthFirst<'a> {
    nodes: &'a [IndexNode],
    order: LevelOrder<'a>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = &'a AccountRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.order.next().map(|index| &nodes[index].record)
    }
}

impl FusedIterator for BreadthFirst<'_> {}

/// Iterator returned by [`AccountIndex::in_order`]
pub struct InOrder<'a> {
    nodes: &'a [IndexNode],
    stack: Vec<NodeId>,
    next: Option<NodeId>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a AccountRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.next {
            self.stack.push(index);
            self.next = self.nodes[index].left;
        }
        let nodes = self.nodes;
        let node = &nodes[self.stack.pop()?];
        self.next = node.right;
        Some(&node.record)
    }
}

impl FusedIterator for InOrder<'_> {}
