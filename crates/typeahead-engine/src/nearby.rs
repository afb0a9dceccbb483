// Keyboard adjacency map: which keys a finger may hit instead of another

use hashbrown::HashMap;

/// Adjacency weights between keyboard keys, keyed by root form.
///
/// `weight(a, b)` is the likelihood, in (0, 1], that a user aiming for `a`
/// touched `b` instead. The map need not be symmetric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyKeys {
    keys: HashMap<char, HashMap<char, f64>>,
}

impl NearbyKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the char-code keyed map a host hands over.
    ///
    /// Codes that are not Unicode scalar values and weights that are not
    /// positive are dropped.
    pub fn from_codes<I, N>(codes: I) -> Self
    where
        I: IntoIterator<Item = (u32, N)>,
        N: IntoIterator<Item = (u32, f64)>,
    {
        let mut nearby = Self::new();
        for (key, neighbors) in codes {
            let Some(key) = char::from_u32(key) else {
                continue;
            };
            for (other, weight) in neighbors {
                if let Some(other) = char::from_u32(other) {
                    nearby.insert(key, other, weight);
                }
            }
        }
        nearby
    }

    /// Record that `other` lies near `key`. Non-positive or NaN weights
    /// are ignored.
    pub fn insert(&mut self, key: char, other: char, weight: f64) {
        if weight > 0.0 {
            self.keys.entry(key).or_default().insert(other, weight);
        }
    }

    pub fn weight(&self, key: char, other: char) -> Option<f64> {
        self.keys.get(&key)?.get(&other).copied()
    }

    /// Keys near `key`, in no particular order.
    pub fn neighbors(&self, key: char) -> impl Iterator<Item = (char, f64)> + '_ {
        self.keys
            .get(&key)
            .into_iter()
            .flat_map(|n| n.iter().map(|(&c, &w)| (c, w)))
    }

    /// Number of keys with at least one neighbour.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<(char, char, f64)> for NearbyKeys {
    fn from_iter<I: IntoIterator<Item = (char, char, f64)>>(iter: I) -> Self {
        let mut nearby = Self::new();
        for (key, other, weight) in iter {
            nearby.insert(key, other, weight);
        }
        nearby
    }
}
