// Simple case mapping and case-insensitive comparison
//
// Rust's `char::to_lowercase` / `to_uppercase` yield iterators because some
// characters expand to several characters. The "simple" variants below keep
// only the first character, which is what per-key comparisons need.

/// Convert a character to its simple lowercase equivalent.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Convert a character to its simple uppercase equivalent.
pub fn simple_upper(c: char) -> char {
    let mut iter = c.to_uppercase();
    iter.next().unwrap_or(c)
}

/// Check whether a character is an uppercase letter.
///
/// Uses the Unicode `Uppercase` property, so digits and punctuation are
/// never uppercase.
pub fn is_upper(c: char) -> bool {
    c.is_uppercase()
}

/// Full uppercase mapping of a single character (may expand, e.g. `ß` -> `SS`).
pub fn full_upper(c: char) -> String {
    c.to_uppercase().collect()
}

/// Full lowercase mapping of a single character (may expand, e.g. `İ` -> `i̇`).
pub fn full_lower(c: char) -> String {
    c.to_lowercase().collect()
}

/// Compare two strings for equality, ignoring character case.
///
/// Comparison is done character by character on the simple lowercase form,
/// so strings of different character counts never compare equal.
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    let mut ia = a.chars();
    let mut ib = b.chars();
    loop {
        match (ia.next(), ib.next()) {
            (None, None) => return true,
            (Some(ca), Some(cb)) if simple_lower(ca) == simple_lower(cb) => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_lower_basic_latin() {
        assert_eq!(simple_lower('A'), 'a');
        assert_eq!(simple_lower('Z'), 'z');
        assert_eq!(simple_lower('a'), 'a');
        assert_eq!(simple_lower('\''), '\'');
    }

    #[test]
    fn simple_lower_extended() {
        assert_eq!(simple_lower('\u{00C9}'), '\u{00E9}'); // É -> é
        assert_eq!(simple_lower('\u{0141}'), '\u{0142}'); // Ł -> ł
    }

    #[test]
    fn simple_upper_basic_latin() {
        assert_eq!(simple_upper('a'), 'A');
        assert_eq!(simple_upper('A'), 'A');
        assert_eq!(simple_upper('7'), '7');
    }

    #[test]
    fn simple_upper_takes_first_of_expansion() {
        assert_eq!(simple_upper('\u{00DF}'), 'S'); // ß -> SS
    }

    #[test]
    fn full_mappings_expand() {
        assert_eq!(full_upper('\u{00DF}'), "SS");
        assert_eq!(full_upper('e'), "E");
        assert_eq!(full_lower('E'), "e");
    }

    #[test]
    fn is_upper_ignores_non_letters() {
        assert!(is_upper('C'));
        assert!(is_upper('\u{00C4}')); // Ä
        assert!(!is_upper('c'));
        assert!(!is_upper('1'));
        assert!(!is_upper('\''));
    }

    #[test]
    fn equals_ignore_case_basic() {
        assert!(equals_ignore_case("Darn", "darn"));
        assert!(equals_ignore_case("DARN", "dArN"));
        assert!(!equals_ignore_case("darn", "dam"));
    }

    #[test]
    fn equals_ignore_case_different_lengths() {
        assert!(!equals_ignore_case("ab", "abc"));
        assert!(!equals_ignore_case("abc", "ab"));
    }

    #[test]
    fn equals_ignore_case_empty() {
        assert!(equals_ignore_case("", ""));
    }
}
