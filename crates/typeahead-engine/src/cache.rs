// Least-recently-used cache of finished suggestion lists

use std::hash::Hash;

use hashbrown::HashMap;

use crate::options::SearchLimits;

/// Key of a cached prediction: the raw input plus every limit that shapes
/// the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub input: String,
    pub limits: SearchLimits,
}

impl CacheKey {
    pub fn new(input: &str, limits: SearchLimits) -> Self {
        Self {
            input: input.to_owned(),
            limits,
        }
    }
}

struct Slot<K, V> {
    key: K,
    value: V,
    /// Towards the most recently used end.
    newer: Option<usize>,
    /// Towards the least recently used end.
    older: Option<usize>,
}

/// A fixed-capacity map that evicts the least recently used entry.
///
/// Entries live in a slot arena linked into a recency list by index, so
/// lookup, insertion and eviction are O(1). Both `get` and `add` mark the
/// entry as most recently used.
pub struct LruCache<K, V> {
    capacity: usize,
    index: HashMap<K, usize>,
    slots: Vec<Slot<K, V>>,
    newest: Option<usize>,
    oldest: Option<usize>,
}

impl<K, V> std::fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.slots.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<K: Clone + Eq + Hash, V> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            newest: None,
            oldest: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.touch(slot);
        Some(&self.slots[slot].value)
    }

    /// Whether `key` is cached, without touching its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or replace `key`, evicting the least recently used entry if
    /// the cache is full.
    pub fn add(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if let Some(&slot) = self.index.get(&key) {
            self.slots[slot].value = value;
            self.touch(slot);
            return;
        }

        let slot = if self.slots.len() < self.capacity {
            self.slots.push(Slot {
                key: key.clone(),
                value,
                newer: None,
                older: None,
            });
            self.slots.len() - 1
        } else {
            // Full: recycle the oldest slot.
            let Some(oldest) = self.oldest else {
                return;
            };
            self.unlink(oldest);
            let evicted = std::mem::replace(&mut self.slots[oldest].key, key.clone());
            self.index.remove(&evicted);
            self.slots[oldest].value = value;
            oldest
        };
        self.index.insert(key, slot);
        self.push_newest(slot);
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.newest = None;
        self.oldest = None;
    }

    fn touch(&mut self, slot: usize) {
        if self.newest != Some(slot) {
            self.unlink(slot);
            self.push_newest(slot);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (newer, older) = (self.slots[slot].newer, self.slots[slot].older);
        match newer {
            Some(n) => self.slots[n].older = older,
            None => self.newest = older,
        }
        match older {
            Some(o) => self.slots[o].newer = newer,
            None => self.oldest = newer,
        }
        self.slots[slot].newer = None;
        self.slots[slot].older = None;
    }

    fn push_newest(&mut self, slot: usize) {
        self.slots[slot].older = self.newest;
        self.slots[slot].newer = None;
        if let Some(prev) = self.newest {
            self.slots[prev].newer = Some(slot);
        }
        self.newest = Some(slot);
        if self.oldest.is_none() {
            self.oldest = Some(slot);
        }
    }
}
