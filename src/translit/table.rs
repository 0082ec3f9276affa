//! Default rule documents compiled into the library.
//!
//! The engine is constructible without a data directory; a directory
//! passed to `Transliterator::from_dir` overrides both documents.

pub const DEFAULT_MAPPING_TOML: &str = include_str!("../../data/mapping.toml");

pub const DEFAULT_AUTOCORRECT_TOML: &str = include_str!("../../data/autocorrect.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translit::rules::{parse_special_words, MappingTable};

    #[test]
    fn test_default_mapping_parses() {
        let table = MappingTable::parse(DEFAULT_MAPPING_TOML);
        assert!(table.len() > 400, "expected 400+ keys, got {}", table.len());
        assert_eq!(table.get("a"), Some("अ"));
        assert_eq!(table.get("ka"), Some("क"));
        assert_eq!(table.get("k"), Some("क्"));
        assert_eq!(table.get("1"), Some("१"));
        assert_eq!(table.get("."), Some("।"));
        assert_eq!(table.get("\\"), Some(""));
    }

    #[test]
    fn test_default_autocorrect_parses() {
        let words = parse_special_words(DEFAULT_AUTOCORRECT_TOML);
        assert!(!words.is_empty());
        assert_eq!(words.get("nepal").map(String::as_str), Some("नेपाल"));
    }
}
