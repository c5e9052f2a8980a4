//! Indexed min-priority queue.
//!
//! [`HeapMinQueue`] pairs an array-backed binary min-heap with a hash map from
//! each key to its current heap position. The map makes changing the priority
//! of an arbitrary key O(log n): the key is found in O(1) and then sifted up or
//! down, instead of being searched for linearly. This is what a shortest-path
//! frontier needs, where tentative distances shrink as better paths are found.
//!
//! # Example
//!
//! ```
//! use lasso_graph::{HeapMinQueue, MinQueue};
//!
//! let mut queue = HeapMinQueue::new();
//! queue.add_or_update("a", 5);
//! queue.add_or_update("b", 2);
//! queue.add_or_update("c", 8);
//! queue.add_or_update("c", 1);
//!
//! assert_eq!(queue.remove(), Ok("c"));
//! assert_eq!(queue.remove(), Ok("b"));
//! assert_eq!(queue.remove(), Ok("a"));
//! assert!(queue.remove().is_err());
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::QueueError;

/// A min-priority queue of distinct keys with mutable integer priorities.
///
/// Ties between equal priorities are broken arbitrarily; no order among them
/// is guaranteed.
pub trait MinQueue<K> {
    /// Whether the queue contains no keys.
    fn is_empty(&self) -> bool;

    /// Number of keys in the queue.
    fn len(&self) -> usize;

    /// A key with the smallest priority, i.e. the key `remove` would return.
    fn peek(&self) -> Result<&K, QueueError>;

    /// The smallest priority in the queue.
    fn min_priority(&self) -> Result<i64, QueueError>;

    /// Insert `key` with `priority`, or change its priority if already present.
    fn add_or_update(&mut self, key: K, priority: i64);

    /// Remove and return a key with the smallest priority.
    fn remove(&mut self) -> Result<K, QueueError>;

    /// Remove every key.
    fn clear(&mut self);
}

/// A key paired with its priority. Replaced wholesale when the priority changes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<K> {
    key: K,
    priority: i64,
}

/// Binary-heap implementation of [`MinQueue`] with a key-to-position index.
#[derive(Debug, Clone)]
pub struct HeapMinQueue<K> {
    /// Min-heap: `heap[i].priority >= heap[(i - 1) / 2].priority` for `i >= 1`.
    heap: Vec<Entry<K>>,
    /// `index[heap[i].key] == i` for every position; holds only queued keys.
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Default for HeapMinQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> HeapMinQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty queue with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Whether `key` is queued.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Current priority of `key`, if queued.
    pub fn priority(&self, key: &K) -> Option<i64> {
        self.index.get(key).map(|&i| self.heap[i].priority)
    }

    /// Check both the heap order and the index mapping over the whole queue.
    ///
    /// This is O(n). Mutations only check the position they sifted, in debug
    /// builds.
    pub fn is_valid(&self) -> bool {
        let ordered = (1..self.heap.len())
            .all(|i| self.heap[i].priority >= self.heap[Self::parent(i)].priority);
        let indexed = self.index.len() == self.heap.len()
            && self
                .heap
                .iter()
                .enumerate()
                .all(|(i, entry)| self.index.get(&entry.key) == Some(&i));
        ordered && indexed
    }

    /// Heap order against the parent and children of `i`, and the index entry
    /// of the key at `i`.
    fn holds_at(&self, i: usize) -> bool {
        let priority = self.heap[i].priority;
        let above = i == 0 || self.heap[Self::parent(i)].priority <= priority;
        let below = [2 * i + 1, 2 * i + 2]
            .into_iter()
            .filter_map(|child| self.heap.get(child))
            .all(|child| child.priority >= priority);
        above && below && self.index.get(&self.heap[i].key) == Some(&i)
    }

    #[inline]
    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    /// Swap the entries at `i` and `j`, keeping `index` in step.
    fn swap(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.heap.len() && j < self.heap.len());
        self.heap.swap(i, j);
        self.set_position(i);
        self.set_position(j);
    }

    fn set_position(&mut self, i: usize) {
        if let Some(slot) = self.index.get_mut(&self.heap[i].key) {
            *slot = i;
        }
    }

    fn add(&mut self, key: K, priority: i64) -> usize {
        debug_assert!(!self.index.contains_key(&key));
        let position = self.heap.len();
        self.index.insert(key.clone(), position);
        self.heap.push(Entry { key, priority });
        self.sift_up(position)
    }

    fn update(&mut self, position: usize, priority: i64) -> usize {
        let current = self.heap[position].priority;
        let key = self.heap[position].key.clone();
        self.heap[position] = Entry { key, priority };
        if priority < current {
            self.sift_up(position)
        } else if priority > current {
            self.sift_down(position)
        } else {
            position
        }
    }

    /// Move the entry at `i` towards the root while it beats its parent.
    /// Returns where it stopped.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = Self::parent(i);
            if self.heap[i].priority >= self.heap[parent].priority {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    /// Move the entry at `i` towards the leaves while a child beats it.
    ///
    /// The left child is checked first, so it wins only on strictly smaller
    /// priority than the current entry, and the right child must be strictly
    /// smaller than whichever of the two is lower so far. Returns where the
    /// entry stopped.
    fn sift_down(&mut self, mut i: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut lowest = i;
            if left < len && self.heap[left].priority < self.heap[lowest].priority {
                lowest = left;
            }
            if right < len && self.heap[right].priority < self.heap[lowest].priority {
                lowest = right;
            }
            if lowest == i {
                return i;
            }
            self.swap(i, lowest);
            i = lowest;
        }
    }
}

impl<K: Eq + Hash + Clone> MinQueue<K> for HeapMinQueue<K> {
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn peek(&self) -> Result<&K, QueueError> {
        self.heap.first().map(|e| &e.key).ok_or(QueueError::Empty)
    }

    fn min_priority(&self) -> Result<i64, QueueError> {
        self.heap.first().map(|e| e.priority).ok_or(QueueError::Empty)
    }

    fn add_or_update(&mut self, key: K, priority: i64) {
        let position = match self.index.get(&key) {
            Some(&position) => self.update(position, priority),
            None => self.add(key, priority),
        };
        debug_assert!(self.holds_at(position));
    }

    fn remove(&mut self) -> Result<K, QueueError> {
        let last = self.heap.pop().ok_or(QueueError::Empty)?;
        let removed = if self.heap.is_empty() {
            last
        } else {
            let smallest = std::mem::replace(&mut self.heap[0], last);
            self.set_position(0);
            let position = self.sift_down(0);
            debug_assert!(self.holds_at(position));
            smallest
        };
        self.index.remove(&removed.key);
        debug_assert_eq!(self.index.len(), self.heap.len());
        Ok(removed.key)
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue() {
        let mut queue = HeapMinQueue::<u32>::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek(), Err(QueueError::Empty));
        assert_eq!(queue.min_priority(), Err(QueueError::Empty));
        assert_eq!(queue.remove(), Err(QueueError::Empty));
    }

    #[test]
    fn test_remove_order() {
        let mut queue = HeapMinQueue::new();
        queue.add_or_update('A', 5);
        queue.add_or_update('B', 2);
        queue.add_or_update('C', 8);

        assert_eq!(queue.peek(), Ok(&'B'));
        assert_eq!(queue.min_priority(), Ok(2));
        assert_eq!(queue.remove(), Ok('B'));
        assert_eq!(queue.remove(), Ok('A'));
        assert_eq!(queue.remove(), Ok('C'));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_update_keeps_size() {
        let mut queue = HeapMinQueue::new();
        for (key, priority) in [(1, 10), (2, 20), (3, 30), (4, 40)] {
            queue.add_or_update(key, priority);
        }

        queue.add_or_update(4, 1);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek(), Ok(&4));

        queue.add_or_update(4, 50);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.priority(&4), Some(50));
        assert_eq!(queue.peek(), Ok(&1));

        queue.add_or_update(4, 50);
        assert_eq!(queue.len(), 4);
        assert!(queue.is_valid());
    }

    #[test]
    fn test_increase_root_priority_sifts_down() {
        let mut queue = HeapMinQueue::new();
        for key in 0..7 {
            queue.add_or_update(key, key as i64);
        }
        queue.add_or_update(0, 100);
        assert!(queue.is_valid());
        assert_eq!(queue.peek(), Ok(&1));

        let order: Vec<_> = std::iter::from_fn(|| queue.remove().ok()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 6, 0]);
    }

    #[test]
    fn test_index_cleared_on_remove() {
        let mut queue = HeapMinQueue::new();
        queue.add_or_update("x", 3);
        queue.add_or_update("y", 4);
        assert_eq!(queue.remove(), Ok("x"));
        assert!(!queue.contains(&"x"));
        assert!(queue.contains(&"y"));

        // A removed key can be queued again as a fresh entry.
        queue.add_or_update("x", 9);
        assert_eq!(queue.len(), 2);
        assert!(queue.is_valid());
    }

    #[test]
    fn test_clear_matches_fresh_queue() {
        let mut queue = HeapMinQueue::new();
        for key in 0..10 {
            queue.add_or_update(key, 10 - key as i64);
        }
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.is_valid());
        assert!(!queue.contains(&3));
        assert_eq!(queue.remove(), Err(QueueError::Empty));
    }

    #[test]
    fn test_equal_priorities() {
        let mut queue = HeapMinQueue::new();
        for key in 0..5 {
            queue.add_or_update(key, 7);
        }
        let mut removed: Vec<_> = std::iter::from_fn(|| queue.remove().ok()).collect();
        removed.sort_unstable();
        assert_eq!(removed, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_local_check_agrees_with_full_check() {
        let mut queue = HeapMinQueue::new();
        let mut seed = 17u64;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as i64
        };

        for step in 0..400 {
            if step % 5 == 4 {
                let _ = queue.remove();
            } else {
                queue.add_or_update(next() % 40, next() % 100);
            }
            assert!(queue.is_valid());
            assert!((0..queue.len()).all(|i| queue.holds_at(i)));
        }
    }

    #[test]
    fn test_local_check_catches_misordered_entry() {
        let mut queue = HeapMinQueue::new();
        for key in 0..3 {
            queue.add_or_update(key, key as i64);
        }
        queue.heap[1].priority = -1;
        assert!(!queue.holds_at(1));
        assert!(!queue.is_valid());
    }
}
