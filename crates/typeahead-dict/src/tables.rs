// Character frequency, variant and root-form tables

use hashbrown::HashMap;
use typeahead_core::accent::{CharForms, derive_forms};

/// Per-character data decoded from the dictionary's character table.
///
/// Variants and root forms are derived from the fixed accented-Latin table,
/// restricted to the characters the dictionary actually contains.
#[derive(Debug, Default)]
pub struct CharacterTable {
    frequencies: HashMap<char, u32>,
    forms: HashMap<char, CharForms>,
}

impl CharacterTable {
    /// Build the table from `(character, occurrence count)` records.
    ///
    /// A character listed twice keeps the last count.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (char, u32)>,
    {
        let mut frequencies = HashMap::new();
        for (ch, count) in entries {
            frequencies.insert(ch, count);
        }
        let forms = frequencies
            .keys()
            .map(|&ch| (ch, derive_forms(ch)))
            .collect();
        Self { frequencies, forms }
    }

    /// Number of distinct characters in the dictionary.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.frequencies.contains_key(&ch)
    }

    /// Aggregate occurrence count of a character across the word list.
    pub fn frequency(&self, ch: char) -> Option<u32> {
        self.frequencies.get(&ch).copied()
    }

    /// Input characters accepted in place of `ch` without a correction.
    ///
    /// Empty for punctuation and for characters not in the dictionary.
    pub fn variants(&self, ch: char) -> &str {
        self.forms.get(&ch).map_or("", |f| f.variants.as_str())
    }

    /// Whether `c` is an accepted variant of the dictionary character `ch`.
    pub fn is_variant(&self, ch: char, c: char) -> bool {
        self.variants(ch).contains(c)
    }

    /// Lowercase unaccented form of a dictionary character, used for
    /// keyboard adjacency lookups.
    pub fn root_form(&self, ch: char) -> Option<char> {
        self.forms.get(&ch).and_then(|f| f.root)
    }

    /// Characters with no case or accent relatives (apostrophe, hyphen, ...)
    /// are word-internal punctuation.
    pub fn is_punctuation(&self, ch: char) -> bool {
        self.variants(ch).is_empty()
    }
}
