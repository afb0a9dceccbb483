// DictionaryStore: a loaded, read-only prediction dictionary

use crate::format::{self, DictionaryHeader};
use crate::node::{self, Node, Siblings};
use crate::tables::CharacterTable;
use crate::DictionaryError;

/// A decoded dictionary: character tables plus the raw tree arena.
///
/// The tree is kept as the original bytes and addressed by offsets; nodes
/// are decoded on demand. The store is immutable once loaded and is meant to
/// be shared by reference between concurrent searches.
pub struct DictionaryStore {
    header: DictionaryHeader,
    chars: CharacterTable,
    tree: Box<[u8]>,
}

impl std::fmt::Debug for DictionaryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryStore")
            .field("max_word_length", &self.max_word_length())
            .field("char_count", &self.chars.len())
            .field("tree_len", &self.tree.len())
            .finish()
    }
}

impl DictionaryStore {
    /// Load a dictionary from its binary form.
    ///
    /// Validates the magic and version, decodes the character table and
    /// copies the remainder of the buffer as the tree arena.
    pub fn load(data: &[u8]) -> Result<Self, DictionaryError> {
        let header = format::parse_header(data)?;
        let entries = format::parse_char_table(data, &header)?;
        let chars = CharacterTable::from_entries(entries);
        let tree: Box<[u8]> = data[header.tree_offset()..].into();

        tracing::debug!(
            max_word_length = header.max_word_length,
            chars = chars.len(),
            tree_bytes = tree.len(),
            "dictionary loaded"
        );

        Ok(Self {
            header,
            chars,
            tree,
        })
    }

    /// Longest input worth searching for.
    ///
    /// One more than the longest dictionary word: the user may have typed
    /// one extra character that a deletion can remove.
    pub fn max_word_length(&self) -> usize {
        self.header.max_word_length as usize + 1
    }

    pub fn header(&self) -> &DictionaryHeader {
        &self.header
    }

    pub fn chars(&self) -> &CharacterTable {
        &self.chars
    }

    pub fn char_frequency(&self, ch: char) -> Option<u32> {
        self.chars.frequency(ch)
    }

    pub fn contains_char(&self, ch: char) -> bool {
        self.chars.contains(ch)
    }

    pub fn variants(&self, ch: char) -> &str {
        self.chars.variants(ch)
    }

    pub fn root_form(&self, ch: char) -> Option<char> {
        self.chars.root_form(ch)
    }

    pub fn is_punctuation(&self, ch: char) -> bool {
        self.chars.is_punctuation(ch)
    }

    /// Size of the tree arena in bytes.
    pub fn tree_len(&self) -> usize {
        self.tree.len()
    }

    /// Decode the node at a tree offset. Offset 0 is the root.
    pub fn decode_node(&self, offset: usize) -> Result<Node, DictionaryError> {
        node::decode_node(&self.tree, offset)
    }

    /// Iterate over the level starting at `first`, most frequent first.
    pub fn siblings(&self, first: usize) -> Siblings<'_> {
        Siblings::new(&self.tree, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TERMINATOR;

    /// "apple", "orange", "apply", "organic", "blueberry" as produced by the
    /// word list converter.
    const FRUIT: &[u8] = &[
        0x46, 0x78, 0x4f, 0x53, 0x44, 0x49, 0x43, 0x54, // FxOSDICT
        0x00, 0x00, 0x00, 0x01, // version 1
        0x09, // longest word
        0x00, 0x0d, // 13 characters
        0x00, 0x61, 0x00, 0x00, 0x00, 0x04, //
        0x00, 0x70, 0x00, 0x00, 0x00, 0x04, //
        0x00, 0x65, 0x00, 0x00, 0x00, 0x04, //
        0x00, 0x72, 0x00, 0x00, 0x00, 0x04, //
        0x00, 0x6c, 0x00, 0x00, 0x00, 0x03, //
        0x00, 0x6f, 0x00, 0x00, 0x00, 0x02, //
        0x00, 0x6e, 0x00, 0x00, 0x00, 0x02, //
        0x00, 0x67, 0x00, 0x00, 0x00, 0x02, //
        0x00, 0x79, 0x00, 0x00, 0x00, 0x02, //
        0x00, 0x62, 0x00, 0x00, 0x00, 0x02, //
        0x00, 0x69, 0x00, 0x00, 0x00, 0x01, //
        0x00, 0x63, 0x00, 0x00, 0x00, 0x01, //
        0x00, 0x75, 0x00, 0x00, 0x00, 0x01, //
        0xbf, 0x61, 0x00, 0x00, 0x2f, // 'a', next 'b' at 0x2f
        0x9f, 0x70, // 'p'
        0x9f, 0x70, // 'p'
        0x9f, 0x6c, // 'l'
        0xbf, 0x65, 0x00, 0x00, 0x11, // 'e', next 'y' at 0x11
        0x1f, // end of "apple"
        0x9f, 0x79, // 'y'
        0x1f, // end of "apply"
        0x9f, 0x6f, // 'o' at 0x14
        0x9f, 0x72, // 'r'
        0xbf, 0x61, 0x00, 0x00, 0x24, // 'a', next 'g' at 0x24
        0x9f, 0x6e, // 'n'
        0x9f, 0x67, // 'g'
        0x9f, 0x65, // 'e'
        0x1f, // end of "orange"
        0x9f, 0x67, // 'g'
        0x9f, 0x61, // 'a'
        0x9f, 0x6e, // 'n'
        0x9f, 0x69, // 'i'
        0x9f, 0x63, // 'c'
        0x1f, // end of "organic"
        0xbf, 0x62, 0x00, 0x00, 0x14, // 'b' at 0x2f, next 'o' at 0x14
        0x9f, 0x6c, // 'l'
        0x9f, 0x75, // 'u'
        0x9f, 0x65, // 'e'
        0x9f, 0x62, // 'b'
        0x9f, 0x65, // 'e'
        0x9f, 0x72, // 'r'
        0x9f, 0x72, // 'r'
        0x9f, 0x79, // 'y'
        0x1f, // end of "blueberry"
    ];

    /// Follow exact characters down the tree; returns the offset of the
    /// level that follows `word`.
    fn walk(store: &DictionaryStore, word: &str) -> Option<usize> {
        let mut offset = 0;
        for c in word.chars() {
            let (_, node) = store
                .siblings(offset)
                .map(Result::unwrap)
                .find(|(_, n)| n.ch == c)?;
            offset = node.center_child?;
        }
        Some(offset)
    }

    #[test]
    fn load_reads_header_and_tables() {
        let store = DictionaryStore::load(FRUIT).unwrap();
        assert_eq!(store.max_word_length(), 10);
        assert_eq!(store.chars().len(), 13);
        assert_eq!(store.char_frequency('a'), Some(4));
        assert_eq!(store.char_frequency('u'), Some(1));
        assert_eq!(store.variants('o'), "O");
        assert_eq!(store.tree_len(), FRUIT.len() - 93);
    }

    #[test]
    fn root_level_order() {
        let store = DictionaryStore::load(FRUIT).unwrap();
        let roots: Vec<char> = store
            .siblings(0)
            .map(|r| r.unwrap().1.ch)
            .collect();
        assert_eq!(roots, vec!['a', 'b', 'o']);
    }

    #[test]
    fn every_word_ends_in_terminator() {
        let store = DictionaryStore::load(FRUIT).unwrap();
        for word in ["apple", "apply", "orange", "organic", "blueberry"] {
            let level = walk(&store, word).unwrap_or_else(|| panic!("{word} not found"));
            let has_end = store
                .siblings(level)
                .any(|r| r.unwrap().1.ch == TERMINATOR);
            assert!(has_end, "{word} has no terminator");
        }
    }

    #[test]
    fn missing_word_is_not_found() {
        let store = DictionaryStore::load(FRUIT).unwrap();
        assert!(walk(&store, "apricot").is_none());
    }

    #[test]
    fn reject_bad_magic() {
        let mut data = FRUIT.to_vec();
        data[0] = b'f';
        assert_eq!(
            DictionaryStore::load(&data).unwrap_err(),
            DictionaryError::InvalidMagic
        );
    }

    #[test]
    fn reject_bad_version() {
        let mut data = FRUIT.to_vec();
        data[11] = 2;
        assert_eq!(
            DictionaryStore::load(&data).unwrap_err(),
            DictionaryError::UnsupportedVersion(2)
        );
    }

    #[test]
    fn corrupt_sibling_offset_is_an_error() {
        let mut data = FRUIT.to_vec();
        // Point the root 'a' at an offset far past the end of the tree.
        data[93 + 4] = 0xff;
        data[93 + 3] = 0xff;
        let store = DictionaryStore::load(&data).unwrap();
        let results: Vec<_> = store.siblings(0).collect();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(DictionaryError::OffsetOutOfBounds { .. })
        ));
    }
}
