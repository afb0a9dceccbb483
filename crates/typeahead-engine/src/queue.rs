// Fixed-capacity priority queue with a pruning threshold

use std::collections::VecDeque;

/// A fixed-capacity queue kept sorted by descending priority.
///
/// Once the queue is full, [`threshold`](Self::threshold) is the lowest
/// priority it retains: anything at or below it can be discarded without
/// trying to insert it. Below capacity the threshold is 0.
///
/// Items of equal priority keep their arrival order, so a search driven by
/// this queue is deterministic.
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue<T> {
    capacity: usize,
    entries: VecDeque<(T, f64)>,
    threshold: f64,
}

impl<T> BoundedPriorityQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            threshold: 0.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest priority retained by a full queue, 0 otherwise.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Insert `item` at its priority position.
    ///
    /// When the queue is full the item is dropped if its priority does not
    /// beat the threshold; otherwise the lowest entry is evicted to make
    /// room. Returns whether the item was inserted.
    pub fn add(&mut self, item: T, priority: f64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.entries.len() >= self.capacity {
            if priority <= self.threshold {
                return false;
            }
            self.entries.pop_back();
        }
        let index = self.entries.partition_point(|&(_, p)| p >= priority);
        self.entries.insert(index, (item, priority));
        self.refresh_threshold();
        true
    }

    /// Pop the highest-priority entry.
    pub fn remove(&mut self) -> Option<(T, f64)> {
        let entry = self.entries.pop_front()?;
        self.refresh_threshold();
        Some(entry)
    }

    /// Remove the entry at `index` (0 is the highest priority).
    pub fn remove_at(&mut self, index: usize) -> Option<(T, f64)> {
        let entry = self.entries.remove(index)?;
        self.refresh_threshold();
        Some(entry)
    }

    /// Index of the first entry whose item matches `pred`.
    pub fn position<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.entries.iter().position(|(item, _)| pred(item))
    }

    /// Priority of the entry at `index`.
    pub fn priority_at(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|&(_, p)| p)
    }

    /// Entries from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.entries.iter().map(|(item, p)| (item, *p))
    }

    pub fn into_vec(self) -> Vec<(T, f64)> {
        self.entries.into()
    }

    fn refresh_threshold(&mut self) {
        self.threshold = if self.entries.len() >= self.capacity {
            self.entries.back().map_or(0.0, |&(_, p)| p)
        } else {
            0.0
        };
    }
}
