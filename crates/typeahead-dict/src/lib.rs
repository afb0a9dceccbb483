//! Binary prediction dictionary: a weighted ternary search tree stored as a
//! flat byte arena, preceded by a header and a character frequency table.
//!
//! # Layout
//!
//! ```text
//! [0..8]    "FxOSDICT" magic
//! [8..12]   u32 BE version (== 1)
//! [12]      u8 longest word length
//! [13..15]  u16 BE character count N
//! [15..]    N x (u16 BE char code, u32 BE occurrence count)
//! [..]      node-encoded tree, root at tree offset 0
//! ```
//!
//! # Architecture
//!
//! - [`format`] -- header and character table parsing
//! - [`tables`] -- character frequencies, accepted variants and root forms
//! - [`node`] -- node codec and sibling-chain iteration over the tree arena
//! - [`store`] -- [`DictionaryStore`], the loaded, read-only dictionary

pub mod format;
pub mod node;
pub mod store;
pub mod tables;

pub use node::{Node, Siblings, TERMINATOR};
pub use store::DictionaryStore;
pub use tables::CharacterTable;

/// Error type for dictionary parsing and tree decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    #[error("invalid dictionary file: bad magic number")]
    InvalidMagic,
    #[error("unknown dictionary version {0}")]
    UnsupportedVersion(u32),
    #[error("dictionary too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid character code U+{0:04X} in dictionary")]
    InvalidCharacter(u32),
    #[error("followed invalid tree offset {offset} (tree is {len} bytes)")]
    OffsetOutOfBounds { offset: usize, len: usize },
}
