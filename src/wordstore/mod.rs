//! Persistent word-frequency store for validated Devanagari words.
//!
//! Backs prefix suggestion and substring search in the CLI. The on-disk
//! format is a small header (magic + version byte) followed by a
//! bincode-serialized record list; saves go through a temp file and a
//! rename so a crash never leaves a half-written store behind.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::validate::{is_valid_devanagari_word, sanitize_devanagari_word};

const MAGIC: &[u8; 4] = b"LPWS";
const VERSION: u8 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("store file is too short to hold a header")]
    InvalidHeader,
    #[error("store file has an unrecognized magic number")]
    InvalidMagic,
    #[error("unsupported store format version {0}")]
    UnsupportedVersion(u8),
    #[error("serialization failed: {0}")]
    Serialize(#[source] bincode::Error),
    #[error("store file is corrupt: {0}")]
    Deserialize(#[source] bincode::Error),
}

/// Column to order [`WordStore::words`] listings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Word,
    Frequency,
}

#[derive(Debug, Clone, Default)]
pub struct WordStore {
    words: HashMap<String, u32>,
}

/// Flat serialization format for bincode.
#[derive(Serialize, Deserialize)]
struct WordStoreData {
    words: Vec<WordRecord>,
}

#[derive(Serialize, Deserialize)]
struct WordRecord {
    word: String,
    frequency: u32,
}

impl WordStore {
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Record one use of `word`, inserting it at frequency 1 if new.
    pub fn add_word(&mut self, word: &str) {
        *self.words.entry(word.to_string()).or_insert(0) += 1;
    }

    /// Remove `word` entirely. Returns false if it was not present.
    pub fn remove_word(&mut self, word: &str) -> bool {
        self.words.remove(word).is_some()
    }

    pub fn frequency(&self, word: &str) -> Option<u32> {
        self.words.get(word).copied()
    }

    /// Overwrite the frequency of an existing word. Returns false if the
    /// word is not in the store.
    pub fn set_frequency(&mut self, word: &str, frequency: u32) -> bool {
        match self.words.get_mut(word) {
            Some(freq) => {
                *freq = frequency;
                true
            }
            None => false,
        }
    }

    /// Words starting with `prefix`, most frequent first. Ties break
    /// alphabetically so results are stable across runs.
    pub fn find_words(&self, prefix: &str, limit: usize) -> Vec<(String, u32)> {
        let mut matches: Vec<(String, u32)> = self
            .words
            .iter()
            .filter(|(word, _)| word.starts_with(prefix))
            .map(|(word, freq)| (word.clone(), *freq))
            .collect();
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.truncate(limit);
        matches
    }

    /// Words containing `term` anywhere, most frequent first.
    pub fn search(&self, term: &str) -> Vec<(String, u32)> {
        let mut matches: Vec<(String, u32)> = self
            .words
            .iter()
            .filter(|(word, _)| word.contains(term))
            .map(|(word, freq)| (word.clone(), *freq))
            .collect();
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches
    }

    /// Paged listing of the whole store, ordered by `column`.
    pub fn words(
        &self,
        limit: Option<usize>,
        offset: usize,
        column: SortColumn,
        ascending: bool,
    ) -> Vec<(String, u32)> {
        let mut all: Vec<(String, u32)> = self
            .words
            .iter()
            .map(|(word, freq)| (word.clone(), *freq))
            .collect();
        all.sort_by(|a, b| {
            let ord = match column {
                SortColumn::Word => a.0.cmp(&b.0),
                SortColumn::Frequency => a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)),
            };
            if ascending { ord } else { ord.reverse() }
        });
        all.into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Drop every word.
    pub fn reset(&mut self) {
        self.words.clear();
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Store metadata as displayable key/value pairs.
    pub fn info(&self) -> BTreeMap<&'static str, String> {
        let mut info = BTreeMap::new();
        info.insert("word_count", self.words.len().to_string());
        info.insert("format_version", VERSION.to_string());
        info.insert("script", "Devanagari".to_string());
        info.insert("language", "Nepali".to_string());
        info
    }

    /// Harvest words from free text: each whitespace-separated token is
    /// sanitized and added only if it passes well-formedness validation.
    /// Returns the number of words recorded (including repeats).
    pub fn learn_from_text(&mut self, text: &str) -> usize {
        let mut learned = 0;
        for token in text.split_whitespace() {
            let cleaned = sanitize_devanagari_word(token);
            if is_valid_devanagari_word(&cleaned) {
                self.add_word(&cleaned);
                learned += 1;
            }
        }
        debug!(learned, "learned words from text");
        learned
    }

    pub fn learn_from_file(&mut self, path: &Path) -> Result<usize, StoreError> {
        let text = fs::read_to_string(path)?;
        Ok(self.learn_from_text(&text))
    }

    /// Serialize to bytes (LPWS format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let data = WordStoreData {
            words: self
                .words
                .iter()
                .map(|(word, freq)| WordRecord {
                    word: word.clone(),
                    frequency: *freq,
                })
                .collect(),
        };
        let body = bincode::serialize(&data).map_err(StoreError::Serialize)?;

        let mut buf = Vec::with_capacity(5 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (LPWS format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        if bytes.len() < 5 {
            return Err(StoreError::InvalidHeader);
        }
        if &bytes[0..4] != MAGIC {
            return Err(StoreError::InvalidMagic);
        }
        if bytes[4] != VERSION {
            return Err(StoreError::UnsupportedVersion(bytes[4]));
        }
        let data: WordStoreData =
            bincode::deserialize(&bytes[5..]).map_err(StoreError::Deserialize)?;

        let mut words = HashMap::with_capacity(data.words.len());
        for rec in data.words {
            words.insert(rec.word, rec.frequency);
        }
        Ok(Self { words })
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Open from file, returning an empty store if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }
}
