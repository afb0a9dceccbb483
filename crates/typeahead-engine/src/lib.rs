//! Predictive text for soft keyboards.
//!
//! Turns raw keystrokes into ranked word suggestions using a weighted
//! ternary search tree dictionary and a keyboard adjacency model, tolerating
//! typos, case and accent differences and missing punctuation.
//!
//! ```no_run
//! use typeahead_engine::{Outcome, PredictionEngine, SearchLimits};
//!
//! # fn main() -> Result<(), typeahead_engine::PredictError> {
//! # let dictionary: Vec<u8> = Vec::new();
//! let mut engine = PredictionEngine::new();
//! engine.set_dictionary(&dictionary)?;
//! engine.set_nearby_keys([('d', 'f', 0.5), ('f', 'd', 0.5)].into_iter().collect());
//!
//! let prediction = engine.predict("fog", SearchLimits::new(3, 20, 1))?;
//! if let Outcome::Suggestions(words) = prediction.complete() {
//!     for s in words {
//!         println!("{} {}", s.word, s.weight);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`queue`] -- fixed-capacity priority queue with a pruning threshold
//! - [`cache`] -- LRU cache of finished suggestion lists
//! - [`nearby`] -- keyboard adjacency weights
//! - [`layout`] -- adjacency derived from key geometry
//! - [`options`] -- search multipliers and per-call limits
//! - [`search`] -- the candidate expansion itself
//! - [`prediction`] -- the cancellable, batch-driven task
//! - [`engine`] -- [`PredictionEngine`], the entry point

pub mod cache;
pub mod engine;
pub mod layout;
pub mod nearby;
pub mod options;
pub mod prediction;
pub mod queue;
pub mod search;

pub use engine::{NextChar, PredictionEngine};
pub use layout::{KeyRect, KeyboardLayout};
pub use nearby::NearbyKeys;
pub use options::{SearchLimits, SearchOptions};
pub use prediction::{AbortHandle, Outcome, Prediction, PredictionState};
pub use search::Suggestion;
pub use typeahead_dict::DictionaryError;

/// Errors returned synchronously by [`PredictionEngine`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// `predict` or `predict_next_char` called before setup.
    #[error("prediction engine not initialized: {0}")]
    NotInitialized(&'static str),

    /// The dictionary buffer is malformed, or the tree is corrupt.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// A failure inside a running search, typically a corrupt tree offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "search for {input:?} failed at tree offset {offset} after {prefix:?} \
     ({expanded} candidates expanded): {source}"
)]
pub struct SearchError {
    pub input: String,
    /// Tree offset of the candidate being expanded.
    pub offset: usize,
    /// Dictionary characters the failing candidate had matched so far.
    pub prefix: String,
    /// Candidates successfully expanded before the failure.
    pub expanded: usize,
    #[source]
    pub source: DictionaryError,
}
