//! Bounded last-in-first-out transaction log

use std::collections::VecDeque;
use tracing::warn;

use crate::types::*;

/// Number of entries an account log keeps by default
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Fixed-capacity stack of formatted transaction entries
///
/// The log never parses what it stores; it only replays entries newest
/// first. `push` treats the capacity as a soft cap and evicts the oldest
/// entry, `try_push` refuses instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedLogStack {
    // Oldest entry at the front, top of the stack at the back.
    entries: VecDeque<String>,
    capacity: usize,
}

impl BoundedLogStack {
    /// Create an empty log with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create an empty log holding at most `capacity` entries
    ///
    /// Storage grows with the entries pushed, not with the capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Push an entry on top, evicting the oldest one when full
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, entry: String) -> Option<String> {
        if self.capacity == 0 {
            warn!("transaction log has zero capacity, dropping entry");
            return Some(entry);
        }

        let evicted = if self.entries.len() >= self.capacity {
            warn!(
                capacity = self.capacity,
                "transaction log full, evicting oldest entry"
            );
            self.entries.pop_front()
        } else {
            None
        };

        self.entries.push_back(entry);
        evicted
    }

    /// Push an entry on top, failing when the log is already full
    pub fn try_push(&mut self, entry: String) -> BankResult<()> {
        if self.entries.len() >= self.capacity {
            return Err(BankError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.entries.push_back(entry);
        Ok(())
    }

    /// Remove and return the most recent entry
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop_back()
    }

    /// Most recent entry, if any
    pub fn top(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate entries from most recent to oldest without consuming the log
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().rev().map(String::as_str)
    }
}

impl Default for BoundedLogStack {
    fn default() -> Self {
        Self::new()
    }
}
