// Test-only dictionary encoder: word list with 1..=32 ranks to the binary format
//
// Builds a character trie with a terminator ('\0') appended to every word,
// sorts each level by descending rank (ties keep insertion order) and emits
// it depth first, so every center child directly follows its parent.

#![allow(dead_code)]

use std::collections::BTreeMap;

use typeahead_engine::{
    NearbyKeys, Outcome, PredictionEngine, SearchLimits, SearchOptions, Suggestion,
};

struct TrieNode {
    ch: char,
    rank: u8,
    children: Vec<TrieNode>,
}

fn insert(level: &mut Vec<TrieNode>, word: &[char], rank: u8) {
    let Some((&ch, rest)) = word.split_first() else {
        return;
    };
    let index = match level.iter().position(|n| n.ch == ch) {
        Some(i) => i,
        None => {
            level.push(TrieNode {
                ch,
                rank: 0,
                children: Vec::new(),
            });
            level.len() - 1
        }
    };
    let node = &mut level[index];
    node.rank = node.rank.max(rank);
    insert(&mut node.children, rest, rank);
}

fn sort(level: &mut [TrieNode]) {
    level.sort_by(|a, b| b.rank.cmp(&a.rank));
    for node in level.iter_mut() {
        sort(&mut node.children);
    }
}

fn emit(level: &[TrieNode], tree: &mut Vec<u8>) {
    let mut patch: Option<usize> = None;
    for (i, node) in level.iter().enumerate() {
        let offset = tree.len() as u32;
        if let Some(pos) = patch.take() {
            tree[pos..pos + 3].copy_from_slice(&offset.to_be_bytes()[1..]);
        }

        let code = node.ch as u32;
        let has_next = i + 1 < level.len();
        let mut control = node.rank - 1;
        if code != 0 {
            control |= 0x80;
            if code > 0xff {
                control |= 0x40;
            }
        }
        if has_next {
            control |= 0x20;
        }
        tree.push(control);
        if code > 0xff {
            tree.push((code >> 8) as u8);
        }
        if code != 0 {
            tree.push(code as u8);
        }
        if has_next {
            patch = Some(tree.len());
            tree.extend_from_slice(&[0, 0, 0]);
        }
        emit(&node.children, tree);
    }
}

/// Byte offset of the tree within an encoded dictionary.
pub fn tree_start(data: &[u8]) -> usize {
    let entries = u16::from_be_bytes([data[13], data[14]]) as usize;
    15 + entries * 6
}

/// Encode `(word, rank)` pairs. Ranks must be in 1..=32; rank 1 marks a
/// filtered word.
pub fn encode(words: &[(&str, u8)]) -> Vec<u8> {
    let mut roots = Vec::new();
    let mut counts: BTreeMap<char, u32> = BTreeMap::new();
    let mut longest = 0;
    for &(word, rank) in words {
        assert!((1..=32).contains(&rank), "rank {rank} out of range");
        let mut chars: Vec<char> = word.chars().collect();
        longest = longest.max(chars.len());
        for &c in &chars {
            *counts.entry(c).or_default() += 1;
        }
        chars.push('\0');
        insert(&mut roots, &chars, rank);
    }
    sort(&mut roots);

    let mut tree = Vec::new();
    emit(&roots, &mut tree);

    let mut data = Vec::new();
    data.extend_from_slice(b"FxOSDICT");
    data.extend_from_slice(&1u32.to_be_bytes());
    data.push(longest as u8);
    data.extend_from_slice(&(counts.len() as u16).to_be_bytes());
    for (&c, &count) in &counts {
        data.extend_from_slice(&(c as u32 as u16).to_be_bytes());
        data.extend_from_slice(&count.to_be_bytes());
    }
    data.extend_from_slice(&tree);
    data
}

pub fn engine(words: &[(&str, u8)], nearby: NearbyKeys) -> PredictionEngine {
    engine_with_options(words, nearby, SearchOptions::default())
}

pub fn engine_with_options(
    words: &[(&str, u8)],
    nearby: NearbyKeys,
    options: SearchOptions,
) -> PredictionEngine {
    let mut engine = PredictionEngine::with_options(options);
    engine.set_dictionary(&encode(words)).unwrap();
    engine.set_nearby_keys(nearby);
    engine
}

/// Run a prediction to completion and return its suggestions.
pub fn suggest(engine: &PredictionEngine, input: &str, limits: SearchLimits) -> Vec<Suggestion> {
    match engine.predict(input, limits).unwrap().complete() {
        Outcome::Suggestions(list) => list,
        other => panic!("prediction for {input:?} did not succeed: {other:?}"),
    }
}

pub fn words(list: &[Suggestion]) -> Vec<&str> {
    list.iter().map(|s| s.word.as_str()).collect()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// A few dozen common English words with plausible ranks.
pub const ENGLISH: &[(&str, u8)] = &[
    ("the", 32),
    ("of", 30),
    ("and", 30),
    ("to", 29),
    ("in", 28),
    ("is", 27),
    ("that", 26),
    ("it", 26),
    ("for", 25),
    ("was", 25),
    ("on", 24),
    ("are", 24),
    ("with", 23),
    ("as", 23),
    ("they", 22),
    ("be", 22),
    ("at", 22),
    ("this", 21),
    ("have", 21),
    ("from", 20),
    ("there", 19),
    ("their", 19),
    ("then", 18),
    ("them", 18),
    ("these", 17),
    ("thing", 15),
    ("think", 15),
    ("cat", 12),
    ("car", 12),
    ("cart", 10),
    ("care", 11),
    ("card", 10),
    ("can", 16),
    ("can't", 12),
    ("don't", 14),
    ("dog", 11),
    ("dig", 8),
    ("do", 20),
    ("does", 15),
    ("done", 13),
    ("caf\u{e9}", 6),
    ("hello", 9),
    ("help", 10),
    ("held", 8),
    ("damn", 1),
];
