//! Roman → Devanagari transliteration engine.
//!
//! The pipeline: bracket-escaped literal spans are masked out, the
//! remaining text is tokenized on spaces, each token runs through the
//! correction heuristics and the greedy segment matcher, and the
//! literal spans are substituted back into the reassembled output.

mod correct;
mod matcher;
pub mod rules;
pub mod table;


use std::collections::HashMap;
use std::path::Path;

use tracing::debug_span;

use correct::{apply_auto_correction, apply_smart_correction};
use matcher::transliterate_segment;
use rules::{parse_special_words, read_rule_file, MappingTable};
pub use rules::{RuleError, AUTOCORRECT_FILE, MAPPING_FILE};

/// Characters copied through the normalization pass unchanged, never
/// triggering synthetic space insertion. The cluster escape must stay
/// attached to its token or the matcher could never see it.
const PASSTHROUGH_SYMBOLS: &str = "*\\";

/// The four pipeline toggles. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslitOptions {
    pub smart_correction: bool,
    pub auto_correct: bool,
    pub indic_numbers: bool,
    pub symbols: bool,
}

impl Default for TranslitOptions {
    fn default() -> Self {
        Self {
            smart_correction: true,
            auto_correct: true,
            indic_numbers: true,
            symbols: true,
        }
    }
}

/// Transliteration engine. The mapping and override tables are built
/// once at construction and immutable afterwards; the toggles may be
/// flipped between `transliterate` calls.
pub struct Transliterator {
    table: MappingTable,
    special_words: HashMap<String, String>,
    opts: TranslitOptions,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator {
    /// Engine over the embedded default rule documents.
    pub fn new() -> Self {
        Self::with_options(TranslitOptions::default())
    }

    pub fn with_options(opts: TranslitOptions) -> Self {
        let special_words = if opts.auto_correct {
            parse_special_words(table::DEFAULT_AUTOCORRECT_TOML)
        } else {
            HashMap::new()
        };
        Self {
            table: MappingTable::parse(table::DEFAULT_MAPPING_TOML),
            special_words,
            opts,
        }
    }

    /// Engine over rule documents in `dir`. The mapping document is
    /// required; the override document is required only while
    /// auto-correction is enabled at load time. There is no
    /// partially-loaded engine: any missing required document fails
    /// construction.
    pub fn from_dir(dir: &Path) -> Result<Self, RuleError> {
        Self::from_dir_with(dir, TranslitOptions::default())
    }

    pub fn from_dir_with(dir: &Path, opts: TranslitOptions) -> Result<Self, RuleError> {
        let mapping = read_rule_file(dir, MAPPING_FILE)?;
        let special_words = if opts.auto_correct {
            parse_special_words(&read_rule_file(dir, AUTOCORRECT_FILE)?)
        } else {
            HashMap::new()
        };
        Ok(Self {
            table: MappingTable::parse(&mapping),
            special_words,
            opts,
        })
    }

    pub fn options(&self) -> TranslitOptions {
        self.opts
    }

    pub fn set_enable_smart_correction(&mut self, enable: bool) {
        self.opts.smart_correction = enable;
    }

    pub fn set_enable_auto_correct(&mut self, enable: bool) {
        self.opts.auto_correct = enable;
    }

    pub fn set_enable_indic_numbers(&mut self, enable: bool) {
        self.opts.indic_numbers = enable;
    }

    pub fn set_enable_symbols(&mut self, enable: bool) {
        self.opts.symbols = enable;
    }

    /// Transliterate `input`. Total over all strings: characters with
    /// no mapping pass through unchanged.
    pub fn transliterate(&self, input: &str) -> String {
        let _span = debug_span!("transliterate", chars = input.chars().count()).entered();

        let preprocessed = self.insert_token_boundaries(input);
        let (processed, masks) = mask_literal_spans(&preprocessed);

        let mut result = String::new();
        let mut first = true;
        for segment in processed.split(' ') {
            if segment.is_empty() {
                continue;
            }
            if !first {
                result.push(' ');
            }
            self.convert_token_into(segment, &mut result);
            first = false;
        }

        for (mask, literal) in &masks {
            let translated = transliterate_segment(mask, &self.table, &self.opts);
            result = result.replace(&translated, literal);
        }
        result
    }

    fn convert_token_into(&self, segment: &str, result: &mut String) {
        let mut it = segment.chars();
        let single = match (it.next(), it.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };

        if let Some(c) = single {
            if c.is_ascii_digit() && !self.opts.indic_numbers {
                result.push(c);
                return;
            }
            if !c.is_alphanumeric() && !self.opts.symbols {
                result.push(c);
                return;
            }
            if let Some(glyph) = self.table.get(segment) {
                result.push_str(glyph);
                return;
            }
        }

        let cleaned = self.preprocess_token(segment);
        result.push_str(&transliterate_segment(&cleaned, &self.table, &self.opts));
    }

    /// Correction heuristics for one token. An override hit replaces
    /// the token verbatim and short-circuits smart correction.
    fn preprocess_token(&self, token: &str) -> String {
        if self.opts.auto_correct {
            if let Some(replacement) = apply_auto_correction(token, &self.special_words) {
                return replacement.to_string();
            }
        }
        if self.opts.smart_correction {
            apply_smart_correction(token)
        } else {
            token.to_string()
        }
    }

    /// Insert a synthetic space before sentence terminators and mapped
    /// non-alphanumeric characters so they tokenize separately from the
    /// preceding word. Pass-through symbols are copied untouched.
    fn insert_token_boundaries(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut prev: Option<char> = None;
        let mut buf = [0u8; 4];
        for c in input.chars() {
            if PASSTHROUGH_SYMBOLS.contains(c) {
                out.push(c);
                prev = Some(c);
                continue;
            }
            let mapped = c == '.' || c == '?' || self.table.contains_key(c.encode_utf8(&mut buf));
            if prev.is_some() && mapped && !c.is_alphanumeric() && prev != Some(' ') {
                out.push(' ');
            }
            out.push(c);
            prev = Some(c);
        }
        out
    }
}

/// Replace `{...}` spans with unique `$-N-$` placeholders, remembering
/// the literal content. An unterminated `{` extends to end of input,
/// its final character dropped from the remembered literal.
fn mask_literal_spans(input: &str) -> (String, Vec<(String, String)>) {
    let mut processed = input.to_string();
    let mut masks: Vec<(String, String)> = Vec::new();
    let mut token_count = 1usize;
    let mut search_from = 0usize;

    while let Some(rel) = processed[search_from..].find('{') {
        let begin = search_from + rel;
        let token_end = match processed[begin + 1..].find('}') {
            Some(r) => begin + 1 + r + 1,
            None => processed.len(),
        };
        let token = &processed[begin..token_end];
        let inner = &token[1..];
        let literal = match inner.char_indices().next_back() {
            Some((i, _)) => inner[..i].to_string(),
            None => String::new(),
        };

        let mask = format!("$-{token_count}-$");
        token_count += 1;
        masks.push((mask.clone(), literal));
        processed.replace_range(begin..token_end, &mask);
        search_from = begin + mask.len();
    }

    (processed, masks)
}
