//! Singly linked FIFO queue used as the traversal worklist of the index

use crate::types::*;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    next: Option<usize>,
}

/// Unbounded first-in-first-out queue
///
/// Nodes live in a slot arena and are linked by index. A dequeued node
/// releases its value immediately and its slot is reused by the next
/// enqueue, so the arena never grows past the peak queue length.
#[derive(Debug)]
pub(crate) struct LinkedQueue<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> LinkedQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Append a value at the tail
    pub(crate) fn enqueue(&mut self, value: T) {
        let slot = Slot {
            value: Some(value),
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = slot;
                index
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.slots[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    /// Remove the head value; does nothing on an empty queue
    pub(crate) fn dequeue(&mut self) -> Option<T> {
        let head = self.head?;
        let slot = &mut self.slots[head];
        let value = slot.value.take();
        self.head = slot.next.take();
        if self.head.is_none() {
            self.tail = None;
        }
        self.free.push(head);
        value
    }

    /// Head value, or `EmptyContainer` when the queue has no elements
    pub(crate) fn front(&self) -> BankResult<&T> {
        self.head
            .and_then(|head| self.slots[head].value.as_ref())
            .ok_or(BankError::EmptyContainer("queue"))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fifo_order() {
        let mut queue = LinkedQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        queue.enqueue(3);

        assert_eq!(queue.front(), Ok(&1));
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), Some(2));
        queue.enqueue(4);
        assert_eq!(queue.dequeue(), Some(3));
        assert_eq!(queue.dequeue(), Some(4));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_front_on_empty_queue_fails() {
        let mut queue: LinkedQueue<u32> = LinkedQueue::new();
        assert_eq!(queue.front(), Err(BankError::EmptyContainer("queue")));

        queue.enqueue(7);
        queue.dequeue();
        assert!(queue.is_empty());
        assert!(matches!(queue.front(), Err(BankError::EmptyContainer(_))));
    }

    #[test]
    fn test_dequeue_on_empty_queue_is_noop() {
        let mut queue: LinkedQueue<&str> = LinkedQueue::new();
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
        assert!(queue.free.is_empty());
        queue.enqueue("a");
        assert_eq!(queue.front(), Ok(&"a"));
    }

    #[test]
    fn test_slots_are_reused_after_dequeue() {
        let mut queue = LinkedQueue::new();
        for round in 0..10 {
            queue.enqueue(round);
            queue.enqueue(round + 100);
            queue.dequeue();
            queue.dequeue();
        }
        assert!(queue.is_empty());
        assert_eq!(queue.slots.len(), 2);
    }

    #[test]
    fn test_dequeued_values_are_released() {
        let tracked = Rc::new(());
        let mut queue = LinkedQueue::new();
        queue.enqueue(Rc::clone(&tracked));
        queue.enqueue(Rc::clone(&tracked));
        assert_eq!(Rc::strong_count(&tracked), 3);

        drop(queue.dequeue());
        assert_eq!(Rc::strong_count(&tracked), 2);

        drop(queue);
        assert_eq!(Rc::strong_count(&tracked), 1);
    }
}
