//! Rule-table construction from the declarative mapping documents.
//!
//! The format is deliberately permissive: line-oriented `key = value`
//! pairs under `[section]` headers, `#` comments, and `\\` / `\n` /
//! `\t` escapes inside quoted values. Lines without an `=` are skipped
//! silently; only a missing or unreadable file is fatal.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Well-known rule document names inside a data directory.
pub const MAPPING_FILE: &str = "mapping.toml";
pub const AUTOCORRECT_FILE: &str = "autocorrect.toml";

/// Vowel-suffix set used to derive matra forms from base consonants.
const MATRA_SUFFIXES: &[(&str, char)] = &[
    ("i", 'ि'),
    ("ee", 'ी'),
    ("u", 'ु'),
    ("oo", 'ू'),
    ("rri", 'ृ'),
    ("e", 'े'),
    ("ai", 'ै'),
    ("o", 'ो'),
    ("au", 'ौ'),
];

const AA_MATRA: char = 'ा';
const HALANT: char = '\u{094D}';

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("could not locate rule file: {0}")]
    Missing(PathBuf),

    #[error("could not read rule file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Read one rule document from a data directory. A missing file is a
/// distinct error from an unreadable one so the CLI can word it.
pub(crate) fn read_rule_file(dir: &Path, name: &str) -> Result<String, RuleError> {
    let path = dir.join(name);
    if !path.exists() {
        return Err(RuleError::Missing(path));
    }
    fs::read_to_string(&path).map_err(|source| RuleError::Io { path, source })
}

/// Latin token → Devanagari glyph string, merged from the explicit
/// `[charMap]` entries and the forms derived from `[consonantMap]`.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    map: HashMap<String, String>,
}

impl MappingTable {
    /// Build the table from mapping-document text.
    ///
    /// Explicit `[charMap]` entries always win: derived forms are only
    /// inserted for keys not already present, so derivation order can
    /// never affect the final table.
    pub fn parse(content: &str) -> Self {
        let mut map: HashMap<String, String> = HashMap::new();
        let mut consonants: Vec<(String, String)> = Vec::new();
        let mut section = String::new();

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                section = line[1..line.len() - 1].to_string();
                continue;
            }
            let Some(eq) = line.find('=') else {
                continue;
            };
            let key = line[..eq].trim();
            let mut value = &line[eq + 1..];
            if let Some(comment) = value.find('#') {
                value = &value[..comment];
            }
            let key = unquote(key);
            let value = unquote(value.trim());

            match section.as_str() {
                "charMap" => {
                    map.insert(key, value);
                }
                "consonantMap" => consonants.push((key, value)),
                _ => {}
            }
        }

        for (conso, glyph) in &consonants {
            let base = if conso.len() > 1 && conso.ends_with('a') {
                &conso[..conso.len() - 1]
            } else {
                conso.as_str()
            };
            insert_derived(&mut map, conso.clone(), glyph.clone());
            insert_derived(&mut map, format!("{conso}a"), format!("{glyph}{AA_MATRA}"));
            for &(suffix, matra) in MATRA_SUFFIXES {
                insert_derived(&mut map, format!("{base}{suffix}"), format!("{glyph}{matra}"));
            }
            insert_derived(&mut map, base.to_string(), format!("{glyph}{HALANT}"));
        }

        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn insert_derived(map: &mut HashMap<String, String>, key: String, value: String) {
    map.entry(key).or_insert(value);
}

/// Parse the override document: exact Latin word → exact replacement.
/// Only the `[specialWords]` section is recognized.
pub(crate) fn parse_special_words(content: &str) -> HashMap<String, String> {
    let mut words = HashMap::new();
    let mut section = String::new();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            section = line[1..line.len() - 1].to_string();
            continue;
        }
        if section != "specialWords" {
            continue;
        }
        let Some(eq) = line.find('=') else {
            continue;
        };
        let key = line[..eq].trim().to_string();
        let mut value = line[eq + 1..].trim();
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value = &value[1..value.len() - 1];
        }
        words.insert(key, value.to_string());
    }
    words
}

/// Strip surrounding single or double quotes, then resolve `\\`, `\n`
/// and `\t`; an unknown escape keeps the escaped character.
fn unquote(s: &str) -> String {
    let inner = if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_map_entries() {
        let table = MappingTable::parse("[charMap]\na = \"अ\"\nee = \"ई\"\n");
        assert_eq!(table.get("a"), Some("अ"));
        assert_eq!(table.get("ee"), Some("ई"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "\n# comment\n[charMap]\na = \"अ\"  # trailing comment\n\n";
        let table = MappingTable::parse(content);
        assert_eq!(table.get("a"), Some("अ"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let content = "[charMap]\nno equals sign here\na = \"अ\"\n";
        let table = MappingTable::parse(content);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_section_ignored() {
        let table = MappingTable::parse("[other]\nx = \"y\"\n");
        assert!(table.is_empty());
    }

    #[test]
    fn test_escapes_in_quoted_values() {
        let table = MappingTable::parse("[charMap]\n\"\\\\\" = \"\"\nt = \"a\\tb\"\n");
        assert_eq!(table.get("\\"), Some(""));
        assert_eq!(table.get("t"), Some("a\tb"));
    }

    #[test]
    fn test_single_quoted_values() {
        let table = MappingTable::parse("[charMap]\na = 'अ'\n");
        assert_eq!(table.get("a"), Some("अ"));
    }

    #[test]
    fn test_consonant_derivation() {
        let table = MappingTable::parse("[consonantMap]\nka = \"क\"\n");
        assert_eq!(table.get("ka"), Some("क"));
        assert_eq!(table.get("kaa"), Some("का"));
        assert_eq!(table.get("ki"), Some("कि"));
        assert_eq!(table.get("kee"), Some("की"));
        assert_eq!(table.get("ku"), Some("कु"));
        assert_eq!(table.get("koo"), Some("कू"));
        assert_eq!(table.get("krri"), Some("कृ"));
        assert_eq!(table.get("ke"), Some("के"));
        assert_eq!(table.get("kai"), Some("कै"));
        assert_eq!(table.get("ko"), Some("को"));
        assert_eq!(table.get("kau"), Some("कौ"));
        assert_eq!(table.get("k"), Some("क्"));
    }

    #[test]
    fn test_derivation_without_trailing_a() {
        // A base token not ending in "a" derives suffixed forms from
        // the token itself.
        let table = MappingTable::parse("[consonantMap]\nk = \"क\"\n");
        assert_eq!(table.get("k"), Some("क"));
        assert_eq!(table.get("ki"), Some("कि"));
    }

    #[test]
    fn test_explicit_entries_win_over_derived() {
        let content = "[charMap]\nki = \"X\"\n[consonantMap]\nka = \"क\"\n";
        let table = MappingTable::parse(content);
        assert_eq!(table.get("ki"), Some("X"));
        assert_eq!(table.get("ku"), Some("कु"));
    }

    #[test]
    fn test_special_words() {
        let content = "[specialWords]\nnepal = \"नेपाल\"\n# note\nbad line\n";
        let words = parse_special_words(content);
        assert_eq!(words.get("nepal").map(String::as_str), Some("नेपाल"));
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn test_special_words_wrong_section_ignored() {
        let content = "[charMap]\na = \"अ\"\n[specialWords]\naja = \"आज\"\n";
        let words = parse_special_words(content);
        assert!(!words.contains_key("a"));
        assert_eq!(words.get("aja").map(String::as_str), Some("आज"));
    }

    #[test]
    fn test_read_rule_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rule_file(dir.path(), MAPPING_FILE).unwrap_err();
        assert!(matches!(err, RuleError::Missing(_)));
    }

    #[test]
    fn test_read_rule_file_ok() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MAPPING_FILE), "[charMap]\na = \"अ\"\n").unwrap();
        let content = read_rule_file(dir.path(), MAPPING_FILE).unwrap();
        assert!(content.contains("charMap"));
    }
}
