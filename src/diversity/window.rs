//! Fixed-capacity recency window over accepted instructions.

use std::collections::VecDeque;

/// Default number of recent instructions kept for novelty checks.
pub const DEFAULT_WINDOW_CAPACITY: usize = 1000;

/// FIFO ring of the most recent items.
///
/// Pushing into a full window evicts the oldest item. A zero-capacity window
/// never holds anything.
#[derive(Debug, Clone)]
pub struct RecentWindow<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RecentWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an item, returning the evicted oldest item if the window was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Default for RecentWindow<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut window = RecentWindow::new(3);
        assert_eq!(window.push(1), None);
        assert_eq!(window.push(2), None);
        assert_eq!(window.push(3), None);
        assert_eq!(window.push(4), Some(1));

        let items: Vec<_> = window.iter().copied().collect();
        assert_eq!(items, vec![2, 3, 4]);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_zero_capacity() {
        let mut window = RecentWindow::new(0);
        assert_eq!(window.push("a"), Some("a"));
        assert!(window.is_empty());
    }

    #[test]
    fn test_default_capacity() {
        let window: RecentWindow<String> = RecentWindow::default();
        assert_eq!(window.capacity(), DEFAULT_WINDOW_CAPACITY);
        assert!(window.is_empty());
    }
}
