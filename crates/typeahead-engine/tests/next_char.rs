//! Exact-prefix next-character lookup.

mod common;

use common::{ENGLISH, encode};
use typeahead_engine::{NextChar, PredictError, PredictionEngine};

fn engine(words: &[(&str, u8)]) -> PredictionEngine {
    let mut engine = PredictionEngine::new();
    engine.set_dictionary(&encode(words)).unwrap();
    engine
}

fn pairs(next: &[NextChar]) -> Vec<(char, u8)> {
    next.iter().map(|n| (n.ch, n.frequency)).collect()
}

#[test]
fn terminator_is_ordered_by_frequency() {
    let engine = engine(&[("car", 5), ("cart", 20)]);
    let next = engine.predict_next_char("car").unwrap();
    assert_eq!(pairs(&next), vec![('t', 20), ('\0', 5)]);
    assert!(next[1].is_terminator());
}

#[test]
fn terminator_first_when_more_frequent() {
    let engine = engine(&[("car", 20), ("cart", 5)]);
    let next = engine.predict_next_char("car").unwrap();
    assert_eq!(pairs(&next), vec![('\0', 20), ('t', 5)]);
}

#[test]
fn empty_input_lists_first_letters() {
    let engine = engine(&[("bee", 3), ("ant", 9), ("cow", 6)]);
    let next = engine.predict_next_char("").unwrap();
    assert_eq!(pairs(&next), vec![('a', 9), ('c', 6), ('b', 3)]);
}

#[test]
fn complete_word_lists_only_terminator() {
    let engine = engine(&[("cart", 20)]);
    let next = engine.predict_next_char("cart").unwrap();
    assert_eq!(pairs(&next), vec![('\0', 20)]);
}

#[test]
fn unknown_prefix_is_empty() {
    let engine = engine(ENGLISH);
    assert!(engine.predict_next_char("thx").unwrap().is_empty());
    assert!(engine.predict_next_char("zebra").unwrap().is_empty());
}

#[test]
fn matching_is_exact() {
    let engine = engine(&[("the", 32)]);
    assert!(engine.predict_next_char("Th").unwrap().is_empty());
    assert_eq!(pairs(&engine.predict_next_char("th").unwrap()), vec![('e', 32)]);
}

#[test]
fn embedded_terminator_is_empty() {
    let engine = engine(&[("car", 5), ("cart", 20)]);
    assert!(engine.predict_next_char("car\0").unwrap().is_empty());
}

#[test]
fn no_dictionary() {
    let engine = PredictionEngine::new();
    assert!(matches!(
        engine.predict_next_char("a"),
        Err(PredictError::NotInitialized(_))
    ));
}
