// Search tuning and per-call limits

/// Tuning constants for the candidate search.
///
/// Multipliers scale a candidate's confidence each time the input is
/// bent to fit the dictionary. Values close to 1 are nearly free; small
/// values make a path unlikely to survive against literal matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Input character is a case or accent variant of the dictionary character.
    pub variant_multiplier: f64,
    /// Dictionary punctuation (apostrophe, hyphen) the user left out.
    pub punctuation_insertion_multiplier: f64,
    /// Scales the adjacency weight of a nearby-key substitution.
    pub nearby_key_multiplier: f64,
    pub transposition_multiplier: f64,
    pub insertion_multiplier: f64,
    /// Substitution by a key that is not nearby; also the floor for
    /// nearby-key substitutions.
    pub substitution_multiplier: f64,
    pub deletion_multiplier: f64,
    /// Applied per character when completing a word past the end of input,
    /// so shorter completions win.
    pub word_extension_multiplier: f64,
    /// Weight given to a filtered (rank 1) word when it is exactly what the
    /// user typed.
    pub filtered_match_weight: f64,
    /// Added to candidates with no corrections so literal input is never
    /// crowded out of the candidate queue.
    pub uncorrected_bonus: f64,
    /// Candidates expanded between two scheduling points.
    pub batch_size: usize,
    /// Number of finished suggestion lists kept per engine.
    pub cache_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            variant_multiplier: 0.99,
            punctuation_insertion_multiplier: 0.95,
            nearby_key_multiplier: 1.0,
            transposition_multiplier: 0.3,
            insertion_multiplier: 0.3,
            substitution_multiplier: 0.2,
            deletion_multiplier: 0.1,
            word_extension_multiplier: 0.4,
            filtered_match_weight: 15.0,
            uncorrected_bonus: 100.0,
            batch_size: 10,
            cache_capacity: 255,
        }
    }
}

/// Per-call search limits. Part of the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchLimits {
    /// Longest suggestion list to return.
    pub max_suggestions: usize,
    /// Capacity of the candidate queue.
    pub max_candidates: usize,
    /// Corrections allowed along one candidate path.
    pub max_corrections: u32,
}

impl SearchLimits {
    pub fn new(max_suggestions: usize, max_candidates: usize, max_corrections: u32) -> Self {
        Self {
            max_suggestions,
            max_candidates,
            max_corrections,
        }
    }
}

impl Default for SearchLimits {
    /// The keyboard's usual request: three suggestions, one correction.
    fn default() -> Self {
        Self::new(3, 20, 1)
    }
}
