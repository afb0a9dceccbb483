// Tree node codec and sibling-chain iteration
//
// Each node is 1 to 6 bytes:
//
//   control byte: 0x80 has char, 0x40 char is two bytes, 0x20 has next
//                 sibling, low 5 bits = frequency - 1
//   0, 1 or 2 char bytes (big-endian)
//   0 or 3 next-sibling offset bytes (big-endian, relative to tree start)
//
// The center child of a node with a char is stored immediately after the
// node itself, so it has no explicit pointer. A node without a char is a
// word terminator and has no center child.

use crate::DictionaryError;

const HAS_CHAR: u8 = 0x80;
const WIDE_CHAR: u8 = 0x40;
const HAS_NEXT: u8 = 0x20;
const FREQUENCY_MASK: u8 = 0x1F;

/// Char value of a terminator node ("a word ends here").
pub const TERMINATOR: char = '\0';

/// One decoded tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// The node character, or [`TERMINATOR`].
    pub ch: char,
    /// Frequency rank of the most frequent word below this node, 1..=32.
    pub frequency: u8,
    /// Offset of the next (less frequent) node on the same level.
    pub next_sibling: Option<usize>,
    /// Offset of the most frequent node on the next level.
    pub center_child: Option<usize>,
}

impl Node {
    pub fn is_terminator(&self) -> bool {
        self.ch == TERMINATOR
    }
}

/// Decode the node starting at `offset` in the tree arena.
///
/// Offsets come from the dictionary itself, so an offset that runs off the
/// end of the arena means the tree is corrupt and is reported as
/// [`DictionaryError::OffsetOutOfBounds`].
pub fn decode_node(tree: &[u8], offset: usize) -> Result<Node, DictionaryError> {
    let mut pos = offset;
    let mut read = || -> Result<u8, DictionaryError> {
        let byte = *tree.get(pos).ok_or(DictionaryError::OffsetOutOfBounds {
            offset: pos,
            len: tree.len(),
        })?;
        pos += 1;
        Ok(byte)
    };

    let control = read()?;
    let frequency = (control & FREQUENCY_MASK) + 1;
    let has_char = control & HAS_CHAR != 0;

    let ch = if has_char {
        let mut code = read()? as u32;
        if control & WIDE_CHAR != 0 {
            code = (code << 8) | read()? as u32;
        }
        char::from_u32(code).ok_or(DictionaryError::InvalidCharacter(code))?
    } else {
        TERMINATOR
    };

    let next_sibling = if control & HAS_NEXT != 0 {
        let b0 = read()? as usize;
        let b1 = read()? as usize;
        let b2 = read()? as usize;
        Some((b0 << 16) | (b1 << 8) | b2)
    } else {
        None
    };

    Ok(Node {
        ch,
        frequency,
        next_sibling,
        center_child: has_char.then_some(pos),
    })
}

/// Iterator over one level of the tree, most frequent node first.
///
/// Yields `(offset, node)` pairs. A decode error is yielded once and ends
/// the iteration.
pub struct Siblings<'a> {
    tree: &'a [u8],
    next: Option<usize>,
}

impl<'a> Siblings<'a> {
    pub fn new(tree: &'a [u8], first: usize) -> Self {
        Self {
            tree,
            next: Some(first),
        }
    }
}

impl Iterator for Siblings<'_> {
    type Item = Result<(usize, Node), DictionaryError>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.next.take()?;
        match decode_node(self.tree, offset) {
            Ok(node) => {
                self.next = node.next_sibling;
                Some(Ok((offset, node)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
