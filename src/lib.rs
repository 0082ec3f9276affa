//! Latin-to-Devanagari transliteration engine.
//!
//! The crate has three parts: a rule-driven [`translit::Transliterator`]
//! that turns romanized Nepali into Devanagari, a [`validate`] module
//! that checks whether a Devanagari word is orthographically
//! well-formed, and a persistent [`wordstore::WordStore`] holding
//! word frequencies for suggestion and search.

pub mod trace_init;
pub mod translit;
pub mod unicode;
pub mod validate;
pub mod wordstore;

pub use translit::{RuleError, TranslitOptions, Transliterator};
pub use validate::{grapheme_count, is_valid_devanagari_word, sanitize_devanagari_word};
pub use wordstore::{SortColumn, StoreError, WordStore};
