//! Append-only loan history

use bigdecimal::BigDecimal;
use std::iter::FusedIterator;

use crate::types::*;

#[derive(Debug, Clone)]
struct LoanNode {
    record: LoanRecord,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Chronological, doubly linked history of loan requests for one account
///
/// Records are only ever appended; there is no update or removal. Nodes are
/// addressed by their position in an arena and linked in both directions,
/// so the history can be walked oldest-first or newest-first.
#[derive(Debug, Clone, Default)]
pub struct LoanLedger {
    nodes: Vec<LoanNode>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl LoanLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a new loan record after the current tail
    pub fn append(
        &mut self,
        amount: BigDecimal,
        reason: String,
        owner_name: String,
        owner_id: AccountId,
    ) {
        let index = self.nodes.len();
        self.nodes.push(LoanNode {
            record: LoanRecord::new(amount, reason, owner_name, owner_id),
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    /// Iterate loan records oldest first; `.rev()` walks newest first
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }

    /// Most recently appended record
    pub fn latest(&self) -> Option<&LoanRecord> {
        self.tail.map(|tail| &self.nodes[tail].record)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl<'a> IntoIterator for &'a LoanLedger {
    type Item = &'a LoanRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records of a [`LoanLedger`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    nodes: &'a [LoanNode],
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a LoanRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.record)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
