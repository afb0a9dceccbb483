// Weighted best-first search over the dictionary tree
//
// The search never walks the tree recursively. Each candidate is a position
// in the tree (the first node of a sibling level) together with the input
// still to be matched. Expanding a candidate visits every node on its level
// and queues one new candidate per way the node can explain the input:
// exact or variant match, nearby-key substitution, insertion, transposition
// or deletion. The best candidate is always expanded next.

use std::rc::Rc;

use typeahead_core::accent::accent_root;
use typeahead_core::case::{capitalize_first, starts_uppercase};
use typeahead_core::character::{equals_ignore_case, simple_lower};
use typeahead_dict::{DictionaryError, DictionaryStore};

use crate::SearchError;
use crate::nearby::NearbyKeys;
use crate::options::{SearchLimits, SearchOptions};
use crate::queue::BoundedPriorityQueue;

/// Frequency rank that marks a filtered word: it is only suggested when the
/// user typed it in full.
const FILTERED_RANK: u8 = 1;

/// A predicted word and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub word: String,
    pub weight: f64,
}

impl Suggestion {
    pub fn new(word: impl Into<String>, weight: f64) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }
}

/// An in-progress search path.
#[derive(Debug, Clone)]
struct Candidate {
    /// First node of the tree level to match next.
    pointer: usize,
    /// Input not yet accounted for.
    remaining: Vec<char>,
    /// Dictionary characters chosen so far.
    output: String,
    multiplier: f64,
    corrections: u32,
}

/// Result of one batch.
#[derive(Debug)]
pub(crate) enum Batch {
    Pending,
    Finished(Vec<Suggestion>),
}

/// Search state for one prediction request.
pub(crate) struct Search {
    dictionary: Rc<DictionaryStore>,
    nearby: Rc<NearbyKeys>,
    options: SearchOptions,
    limits: SearchLimits,
    input: String,
    capitalize: bool,
    candidates: BoundedPriorityQueue<Candidate>,
    /// Keyed by the dictionary spelling; display casing is applied at the end.
    words: BoundedPriorityQueue<String>,
    expanded: usize,
}

impl Search {
    /// Seed a search with a single candidate at the tree root.
    pub(crate) fn new(
        dictionary: Rc<DictionaryStore>,
        nearby: Rc<NearbyKeys>,
        options: SearchOptions,
        input: &str,
        limits: SearchLimits,
    ) -> Self {
        let mut search = Self {
            dictionary,
            nearby,
            options,
            limits,
            input: input.to_owned(),
            capitalize: starts_uppercase(input),
            candidates: BoundedPriorityQueue::new(limits.max_candidates),
            words: BoundedPriorityQueue::new(limits.max_suggestions),
            expanded: 0,
        };
        let root = Candidate {
            pointer: 0,
            remaining: input.chars().collect(),
            output: String::new(),
            multiplier: 1.0,
            corrections: 0,
        };
        search.add_candidate(root, 1);
        search
    }

    /// Number of candidates expanded so far.
    pub(crate) fn expanded(&self) -> usize {
        self.expanded
    }

    /// Expand up to one batch of candidates.
    ///
    /// Finishes when the candidate queue runs dry or its best candidate can
    /// no longer beat the weakest word already found.
    pub(crate) fn run_batch(&mut self) -> Result<Batch, SearchError> {
        for _ in 0..self.options.batch_size.max(1) {
            let Some((candidate, weight)) = self.candidates.remove() else {
                return Ok(Batch::Finished(self.finish()));
            };
            if weight <= self.words.threshold() {
                return Ok(Batch::Finished(self.finish()));
            }

            let pointer = candidate.pointer;
            let prefix = candidate.output.clone();
            self.process(candidate).map_err(|source| SearchError {
                input: self.input.clone(),
                offset: pointer,
                prefix,
                expanded: self.expanded,
                source,
            })?;
            self.expanded += 1;
        }
        Ok(Batch::Pending)
    }

    fn process(&mut self, candidate: Candidate) -> Result<(), DictionaryError> {
        let Candidate {
            pointer,
            remaining,
            output,
            multiplier,
            corrections,
        } = candidate;
        let opts = self.options;
        let can_correct = corrections < self.limits.max_corrections;
        let dictionary = Rc::clone(&self.dictionary);

        for entry in dictionary.siblings(pointer) {
            let (offset, node) = entry?;
            let frequency = node.frequency;
            let weight = f64::from(frequency) * multiplier;

            // Levels are sorted by frequency, so nothing further along can do
            // better. Uncorrected paths are never cut here.
            if corrections > 0 && weight <= self.candidates.threshold() {
                break;
            }

            let Some(&typed) = remaining.first() else {
                if node.is_terminator() {
                    if frequency == FILTERED_RANK {
                        if equals_ignore_case(&self.input, &output) {
                            self.add_word(output.clone(), opts.filtered_match_weight);
                        }
                    } else {
                        self.add_word(output.clone(), weight);
                    }
                } else if let Some(center) = node.center_child {
                    // Complete the word past the end of the input.
                    let next = Candidate {
                        pointer: center,
                        remaining: Vec::new(),
                        output: extend(&output, node.ch),
                        multiplier: multiplier * opts.word_extension_multiplier,
                        corrections,
                    };
                    self.add_candidate(next, frequency);
                }
                continue;
            };

            let Some(center) = node.center_child else {
                // A word ends here but one character is left over: drop it.
                if remaining.len() == 1 {
                    let next = Candidate {
                        pointer: offset,
                        remaining: Vec::new(),
                        output: output.clone(),
                        multiplier: multiplier * opts.deletion_multiplier,
                        corrections: corrections + 1,
                    };
                    self.add_candidate(next, frequency);
                }
                continue;
            };

            let ch = node.ch;
            let variants = dictionary.variants(ch);
            let consumed = &remaining[1..];
            let advance = |remaining: &[char], multiplier: f64, corrections: u32| Candidate {
                pointer: center,
                remaining: remaining.to_vec(),
                output: extend(&output, ch),
                multiplier,
                corrections,
            };

            if ch == typed {
                self.add_candidate(advance(consumed, multiplier, corrections), frequency);
            } else if variants.contains(typed) {
                let m = multiplier * opts.variant_multiplier;
                self.add_candidate(advance(consumed, m, corrections), frequency);
            } else if can_correct {
                let adjacency = dictionary
                    .root_form(ch)
                    .zip(input_root(&dictionary, typed))
                    .and_then(|(intended, touched)| self.nearby.weight(intended, touched));
                if let Some(nearby) = adjacency {
                    tracing::trace!(%ch, %typed, nearby, "nearby key substitution");
                    let adjust = (nearby * opts.nearby_key_multiplier)
                        .max(opts.substitution_multiplier);
                    let m = multiplier * adjust;
                    self.add_candidate(advance(consumed, m, corrections + 1), frequency);
                } else if !output.is_empty() {
                    let m = multiplier * opts.substitution_multiplier;
                    self.add_candidate(advance(consumed, m, corrections + 1), frequency);
                }
            }

            // Insertion: the user skipped this dictionary character. Skipped
            // punctuation is cheap and not counted as a correction.
            if variants.is_empty() {
                let m = multiplier * opts.punctuation_insertion_multiplier;
                self.add_candidate(advance(&remaining, m, corrections), frequency);
            } else if can_correct && !output.is_empty() {
                let m = multiplier * opts.insertion_multiplier;
                self.add_candidate(advance(&remaining, m, corrections + 1), frequency);
            }

            // The second remaining character fits here: either the first two
            // were swapped or the first one is extra.
            if can_correct && remaining.len() > 1 && !output.is_empty() {
                let second = remaining[1];
                if ch == second || variants.contains(second) {
                    let mut swapped = Vec::with_capacity(remaining.len() - 1);
                    swapped.push(typed);
                    swapped.extend_from_slice(&remaining[2..]);
                    let m = multiplier * opts.transposition_multiplier;
                    self.add_candidate(advance(&swapped, m, corrections + 1), frequency);

                    let m = multiplier * opts.deletion_multiplier;
                    self.add_candidate(advance(&remaining[2..], m, corrections + 1), frequency);
                }
            }
        }
        Ok(())
    }

    /// Queue a candidate unless it could never produce a word heavy enough
    /// to be kept.
    fn add_candidate(&mut self, candidate: Candidate, frequency: u8) {
        let mut weight = f64::from(frequency) * candidate.multiplier;

        // Uncorrected paths get a large bonus so that what the user actually
        // typed stays in the queue. Appending one character still counts as
        // uncorrected; appending two does not.
        let extension = self.options.word_extension_multiplier;
        if candidate.corrections == 0 && candidate.multiplier > extension * extension {
            weight += self.options.uncorrected_bonus;
        }

        if weight <= self.words.threshold() {
            return;
        }
        self.candidates.add(candidate, weight);
    }

    /// Record a finished word, keeping the heavier of two equal spellings.
    fn add_word(&mut self, word: String, weight: f64) {
        if let Some(index) = self.words.position(|w| *w == word) {
            if self.words.priority_at(index).is_some_and(|p| p >= weight) {
                return;
            }
            self.words.remove_at(index);
        }
        self.words.add(word, weight);
    }

    /// Take the found words, applying display casing.
    ///
    /// Capitalizing can make two dictionary spellings ("polish", "Polish")
    /// display the same; only the heavier one is kept.
    fn finish(&mut self) -> Vec<Suggestion> {
        let words = std::mem::replace(&mut self.words, BoundedPriorityQueue::new(0));
        let mut suggestions: Vec<Suggestion> = Vec::with_capacity(words.len());
        for (word, weight) in words.into_vec() {
            let word = if self.capitalize {
                capitalize_first(&word)
            } else {
                word
            };
            if suggestions.iter().all(|s| s.word != word) {
                suggestions.push(Suggestion { word, weight });
            }
        }
        suggestions
    }
}

fn extend(output: &str, ch: char) -> String {
    let mut s = String::with_capacity(output.len() + ch.len_utf8());
    s.push_str(output);
    s.push(ch);
    s
}

/// Root form of a typed character, for adjacency lookups.
///
/// Characters the dictionary does not contain fall back to their lowercase
/// unaccented form, so a key the language never uses can still be matched
/// to its neighbours.
pub(crate) fn input_root(dictionary: &DictionaryStore, c: char) -> Option<char> {
    if dictionary.contains_char(c) {
        return dictionary.root_form(c);
    }
    let lower = simple_lower(c);
    Some(accent_root(lower).unwrap_or(lower))
}

/// Whether every typed character could plausibly be explained by the
/// dictionary, either directly or through a nearby key.
pub(crate) fn valid_chars(
    dictionary: &DictionaryStore,
    nearby: &NearbyKeys,
    input: &str,
) -> bool {
    input.chars().all(|c| {
        dictionary.contains_char(c)
            || dictionary.contains_char(simple_lower(c))
            || input_root(dictionary, c).is_some_and(|root| {
                nearby
                    .neighbors(root)
                    .any(|(key, _)| dictionary.contains_char(key))
            })
    })
}
