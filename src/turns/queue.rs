//! FIFO turn queue.
//!
//! Backed by a persistent `im::Vector`, so cloning a queue (and therefore a
//! whole session snapshot) is O(1), and removing the head never leaves
//! ever-growing index keys behind.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::error::EmptyQueue;

/// First-in first-out queue.
///
/// No priorities and no deduplication: an item enqueued twice is dequeued
/// twice.
///
/// ## Example
///
/// ```
/// use rust_snl::turns::TurnQueue;
///
/// let mut queue = TurnQueue::new();
/// queue.enqueue_all(["a", "b", "c"]);
///
/// assert_eq!(queue.peek(), Ok(&"a"));
/// assert_eq!(queue.dequeue(), Ok("a"));
/// queue.enqueue("a");
/// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["b", "c", "a"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Clone + Deserialize<'de>"
))]
pub struct TurnQueue<T: Clone> {
    items: Vector<T>,
}

impl<T: Clone> Default for TurnQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> TurnQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vector::new(),
        }
    }

    /// Append an item at the tail.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Append items at the tail, in iteration order.
    pub fn enqueue_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Remove and return the head.
    pub fn dequeue(&mut self) -> Result<T, EmptyQueue> {
        self.items.pop_front().ok_or(EmptyQueue)
    }

    /// Read the head without removing it.
    pub fn peek(&self) -> Result<&T, EmptyQueue> {
        self.items.front().ok_or(EmptyQueue)
    }

    /// Move the head to the tail and return the new head.
    pub fn rotate(&mut self) -> Result<&T, EmptyQueue> {
        let head = self.dequeue()?;
        self.enqueue(head);
        self.peek()
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keep only the items matching `keep`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.items.retain(|item| keep(item));
    }

    /// Iterate from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> FromIterator<T> for TurnQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = TurnQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        queue.enqueue(3);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Ok(1));
        assert_eq!(queue.dequeue(), Ok(2));
        assert_eq!(queue.dequeue(), Ok(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queue: TurnQueue<u8> = TurnQueue::new();
        assert_eq!(queue.peek(), Err(EmptyQueue));
        assert_eq!(queue.dequeue(), Err(EmptyQueue));
        assert_eq!(queue.rotate(), Err(EmptyQueue));
    }

    #[test]
    fn test_no_deduplication() {
        let mut queue = TurnQueue::new();
        queue.enqueue_all([7, 7]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue(), Ok(7));
        assert_eq!(queue.dequeue(), Ok(7));
    }

    #[test]
    fn test_rotate_cycles_back() {
        let mut queue: TurnQueue<char> = "abc".chars().collect();
        assert_eq!(queue.rotate(), Ok(&'b'));
        assert_eq!(queue.rotate(), Ok(&'c'));
        assert_eq!(queue.rotate(), Ok(&'a'));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_retain_preserves_order() {
        let mut queue: TurnQueue<u32> = (1..=6).collect();
        queue.retain(|&n| n % 2 == 0);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut queue: TurnQueue<u32> = (1..=3).collect();
        let snapshot = queue.clone();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_serialization() {
        let queue: TurnQueue<u32> = (1..=3).collect();
        let json = serde_json::to_string(&queue).unwrap();
        let restored: TurnQueue<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(queue, restored);
    }
}
