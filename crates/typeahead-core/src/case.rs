// Display casing for finished suggestions

use crate::character::is_upper;

/// Whether suggestions for this input should be shown capitalized.
///
/// True when the first character of the input is an uppercase letter.
/// Empty input and inputs starting with a digit or punctuation are not
/// capitalized.
pub fn starts_uppercase(input: &str) -> bool {
    input.chars().next().is_some_and(is_upper)
}

/// Uppercase the first character of a word, leaving the rest untouched.
///
/// Uses the full uppercase mapping, so a leading `ß` becomes `SS`.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len() + 2);
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
