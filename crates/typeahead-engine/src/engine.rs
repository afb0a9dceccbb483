// PredictionEngine: owns the dictionary, adjacency map and result cache
//
// One engine serves one language. The dictionary and adjacency map are
// shared by reference with every prediction started from the engine, so a
// prediction keeps working against the data it started with even if the
// host swaps the dictionary mid-search.

use std::cell::RefCell;
use std::rc::Rc;

use typeahead_dict::{DictionaryStore, TERMINATOR};

use crate::PredictError;
use crate::cache::{CacheKey, LruCache};
use crate::nearby::NearbyKeys;
use crate::options::{SearchLimits, SearchOptions};
use crate::prediction::{Prediction, ResultCache};

/// One entry of a [`PredictionEngine::predict_next_char`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextChar {
    /// The next character, or [`TERMINATOR`] if the input is a complete word.
    pub ch: char,
    /// Frequency rank of the most frequent word continuing this way, 1..=32.
    pub frequency: u8,
}

impl NextChar {
    pub fn is_terminator(&self) -> bool {
        self.ch == TERMINATOR
    }
}

/// Word prediction for one dictionary and keyboard.
pub struct PredictionEngine {
    options: SearchOptions,
    dictionary: Option<Rc<DictionaryStore>>,
    nearby: Option<Rc<NearbyKeys>>,
    /// Replaced, not cleared, on invalidation; see [`Prediction`].
    cache: Rc<RefCell<ResultCache>>,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("dictionary", &self.dictionary)
            .field("nearby_keys", &self.nearby.as_ref().map(|n| n.len()))
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionEngine {
    pub fn new() -> Self {
        Self::with_options(SearchOptions::default())
    }

    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            options,
            dictionary: None,
            nearby: None,
            cache: Self::fresh_cache(&options),
        }
    }

    fn fresh_cache(options: &SearchOptions) -> Rc<RefCell<ResultCache>> {
        Rc::new(RefCell::new(LruCache::new(options.cache_capacity)))
    }

    fn invalidate_cache(&mut self) {
        self.cache = Self::fresh_cache(&self.options);
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Load a new dictionary and drop all cached results.
    ///
    /// On error the previous dictionary and cache are left untouched.
    pub fn set_dictionary(&mut self, data: &[u8]) -> Result<(), PredictError> {
        let store = DictionaryStore::load(data).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected dictionary");
        })?;
        self.dictionary = Some(Rc::new(store));
        self.invalidate_cache();
        Ok(())
    }

    /// Replace the adjacency map and drop all cached results.
    pub fn set_nearby_keys(&mut self, nearby: NearbyKeys) {
        tracing::debug!(keys = nearby.len(), "nearby keys replaced");
        self.nearby = Some(Rc::new(nearby));
        self.invalidate_cache();
    }

    pub fn dictionary(&self) -> Option<&DictionaryStore> {
        self.dictionary.as_deref()
    }

    pub fn nearby_keys(&self) -> Option<&NearbyKeys> {
        self.nearby.as_deref()
    }

    /// Whether both a dictionary and an adjacency map are set.
    pub fn is_ready(&self) -> bool {
        self.dictionary.is_some() && self.nearby.is_some()
    }

    /// Number of suggestion lists currently cached.
    pub fn cached_predictions(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Start predicting words for `input`.
    ///
    /// The returned task does no work until it is stepped or polled.
    pub fn predict(&self, input: &str, limits: SearchLimits) -> Result<Prediction, PredictError> {
        let dictionary = self
            .dictionary
            .as_ref()
            .ok_or(PredictError::NotInitialized("no dictionary loaded"))?;
        let nearby = self
            .nearby
            .as_ref()
            .ok_or(PredictError::NotInitialized("no nearby keys set"))?;

        Ok(Prediction::new(
            CacheKey::new(input, limits),
            Rc::clone(dictionary),
            Rc::clone(nearby),
            self.options,
            Rc::clone(&self.cache),
        ))
    }

    /// Characters that may follow `input`, most frequent first.
    ///
    /// Exact matching only. Empty when `input` is not a prefix of any word.
    /// A [`TERMINATOR`] entry means `input` is itself a word.
    pub fn predict_next_char(&self, input: &str) -> Result<Vec<NextChar>, PredictError> {
        let dictionary = self
            .dictionary
            .as_deref()
            .ok_or(PredictError::NotInitialized("no dictionary loaded"))?;

        let mut level = 0;
        for c in input.chars() {
            if c == TERMINATOR {
                return Ok(Vec::new());
            }
            let mut next = None;
            for entry in dictionary.siblings(level) {
                let (_, node) = entry?;
                if node.ch == c {
                    next = node.center_child;
                    break;
                }
            }
            match next {
                Some(center) => level = center,
                None => return Ok(Vec::new()),
            }
        }

        let mut result = Vec::new();
        for entry in dictionary.siblings(level) {
            let (_, node) = entry?;
            result.push(NextChar {
                ch: node.ch,
                frequency: node.frequency,
            });
        }
        Ok(result)
    }
}
