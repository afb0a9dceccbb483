// Dictionary binary format: header and character table parsing

use bytemuck::{Pod, Zeroable};

use crate::DictionaryError;

/// "FxOS" followed by "DICT".
const MAGIC: [u8; 8] = *b"FxOSDICT";

/// The only dictionary version this reader understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 15;

/// Size of one character table record in bytes.
pub const CHAR_ENTRY_SIZE: usize = 6;

/// Zero-copy view of the fixed header. All fields are byte arrays, so the
/// struct has alignment 1 and can be cast straight out of the buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    magic: [u8; 8],
    version: [u8; 4],
    max_word_length: u8,
    entry_count: [u8; 2],
}

/// Zero-copy view of one character table record.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RawCharEntry {
    code: [u8; 2],
    count: [u8; 4],
}

const _: () = assert!(size_of::<RawHeader>() == HEADER_SIZE);
const _: () = assert!(size_of::<RawCharEntry>() == CHAR_ENTRY_SIZE);

/// Parsed dictionary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryHeader {
    pub version: u32,
    /// Length of the longest word, as stored (without deletion slack).
    pub max_word_length: u8,
    /// Number of records in the character table.
    pub entry_count: u16,
}

impl DictionaryHeader {
    /// Byte offset at which the tree begins.
    pub fn tree_offset(&self) -> usize {
        HEADER_SIZE + self.entry_count as usize * CHAR_ENTRY_SIZE
    }
}

/// Parse and validate the 15-byte header.
///
/// The magic is checked before the version, so a random buffer reports
/// `InvalidMagic` rather than an odd version number.
pub fn parse_header(data: &[u8]) -> Result<DictionaryHeader, DictionaryError> {
    if data.len() < HEADER_SIZE {
        return Err(DictionaryError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let raw: &RawHeader = bytemuck::from_bytes(&data[..HEADER_SIZE]);
    if raw.magic != MAGIC {
        return Err(DictionaryError::InvalidMagic);
    }

    let version = u32::from_be_bytes(raw.version);
    if version != SUPPORTED_VERSION {
        return Err(DictionaryError::UnsupportedVersion(version));
    }

    Ok(DictionaryHeader {
        version,
        max_word_length: raw.max_word_length,
        entry_count: u16::from_be_bytes(raw.entry_count),
    })
}

/// Parse the character table that follows the header.
///
/// Returns `(character, occurrence count)` pairs in file order.
pub fn parse_char_table(
    data: &[u8],
    header: &DictionaryHeader,
) -> Result<Vec<(char, u32)>, DictionaryError> {
    let end = header.tree_offset();
    if data.len() < end {
        return Err(DictionaryError::TooShort {
            expected: end,
            actual: data.len(),
        });
    }

    let records: &[RawCharEntry] = bytemuck::cast_slice(&data[HEADER_SIZE..end]);
    records
        .iter()
        .map(|record| {
            let code = u16::from_be_bytes(record.code) as u32;
            let ch = char::from_u32(code).ok_or(DictionaryError::InvalidCharacter(code))?;
            Ok((ch, u32::from_be_bytes(record.count)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_header(version: u32, max_len: u8, entries: &[(u16, u32)]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"FxOSDICT");
        buf.extend_from_slice(&version.to_be_bytes());
        buf.push(max_len);
        buf.extend_from_slice(&(entries.len() as u16).to_be_bytes());
        for &(code, count) in entries {
            buf.extend_from_slice(&code.to_be_bytes());
            buf.extend_from_slice(&count.to_be_bytes());
        }
        buf
    }

    #[test]
    fn parse_valid_header() {
        let data = make_header(1, 5, &[(0x70, 2), (0x61, 1)]);
        let header = parse_header(&data).unwrap();
        assert_eq!(header.version, 1);
        assert_eq!(header.max_word_length, 5);
        assert_eq!(header.entry_count, 2);
        assert_eq!(header.tree_offset(), 27);
    }

    #[test]
    fn reject_too_short() {
        let err = parse_header(b"FxOSDICT").unwrap_err();
        assert_eq!(
            err,
            DictionaryError::TooShort {
                expected: 15,
                actual: 8
            }
        );
    }

    #[test]
    fn reject_invalid_magic() {
        let mut data = make_header(1, 5, &[]);
        data[4..8].copy_from_slice(b"DATA");
        assert_eq!(parse_header(&data).unwrap_err(), DictionaryError::InvalidMagic);
    }

    #[test]
    fn reject_unknown_version() {
        let data = make_header(2, 5, &[]);
        assert_eq!(
            parse_header(&data).unwrap_err(),
            DictionaryError::UnsupportedVersion(2)
        );
    }

    #[test]
    fn magic_checked_before_version() {
        let mut data = make_header(7, 5, &[]);
        data[0] = b'X';
        assert_eq!(parse_header(&data).unwrap_err(), DictionaryError::InvalidMagic);
    }

    #[test]
    fn parse_char_table_in_file_order() {
        let data = make_header(1, 5, &[(0x70, 2), (0x61, 1), (0x2c6e, 1)]);
        let header = parse_header(&data).unwrap();
        let table = parse_char_table(&data, &header).unwrap();
        assert_eq!(table, vec![('p', 2), ('a', 1), ('\u{2C6E}', 1)]);
    }

    #[test]
    fn truncated_char_table() {
        let mut data = make_header(1, 5, &[(0x70, 2), (0x61, 1)]);
        data.truncate(20);
        let header = parse_header(&data).unwrap();
        assert_eq!(
            parse_char_table(&data, &header).unwrap_err(),
            DictionaryError::TooShort {
                expected: 27,
                actual: 20
            }
        );
    }

    #[test]
    fn surrogate_code_is_rejected() {
        let data = make_header(1, 5, &[(0xD800, 1)]);
        let header = parse_header(&data).unwrap();
        assert_eq!(
            parse_char_table(&data, &header).unwrap_err(),
            DictionaryError::InvalidCharacter(0xD800)
        );
    }
}
