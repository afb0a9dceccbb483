//! Shared character utilities for the typeahead prediction engine.
//!
//! - [`character`] -- simple one-to-one case mapping and case-insensitive comparison
//! - [`accent`] -- the fixed accented-Latin table and per-character variant derivation
//! - [`case`] -- display casing applied to finished suggestions

pub mod accent;
pub mod case;
pub mod character;
