//! Greedy longest-match conversion of a cleaned token.

use super::rules::MappingTable;
use super::TranslitOptions;

/// Explicit consonant-cluster suppression marker. A sub-segment ending
/// in it keeps its trailing halant instead of restoring the inherent
/// vowel.
const CLUSTER_ESCAPE: char = '\\';

const HALANT: char = '\u{094D}';

/// Convert one token. `/` forces a segmentation boundary: each piece is
/// matched independently and the results concatenated; empty pieces are
/// skipped.
pub(crate) fn transliterate_segment(
    input: &str,
    table: &MappingTable,
    opts: &TranslitOptions,
) -> String {
    let mut result = String::new();
    for sub in input.split('/') {
        if !sub.is_empty() {
            result.push_str(&convert_sub_segment(sub, table, opts));
        }
    }
    result
}

fn convert_sub_segment(sub: &str, table: &MappingTable, opts: &TranslitOptions) -> String {
    let chars: Vec<char> = sub.chars().collect();
    let mut out = String::new();
    let mut start = 0;

    while start < chars.len() {
        let mut matched: Option<(String, usize)> = None;
        // Longest recognized prefix wins; every length down to 1 is
        // tried.
        for len in (1..=chars.len() - start).rev() {
            if len == 1 {
                let c = chars[start];
                if c.is_ascii_digit() && !opts.indic_numbers {
                    matched = Some((c.to_string(), 1));
                    break;
                }
                if !c.is_alphanumeric() && !opts.symbols {
                    matched = Some((c.to_string(), 1));
                    break;
                }
            }
            let part: String = chars[start..start + len].iter().collect();
            if let Some(glyph) = table.get(&part) {
                matched = Some((glyph.to_string(), len));
                break;
            }
        }

        match matched {
            Some((text, len)) => {
                out.push_str(&text);
                start += len;
            }
            None => {
                // Identity fallback: unknown characters pass through.
                out.push(chars[start]);
                start += 1;
            }
        }
    }

    // Restore the inherent vowel unless suppression was explicit.
    let ends_with_escape = chars.last() == Some(&CLUSTER_ESCAPE);
    if out.ends_with(HALANT) && !ends_with_escape && chars.len() > 1 {
        out.truncate(out.len() - HALANT.len_utf8());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translit::rules::MappingTable;
    use crate::translit::table::DEFAULT_MAPPING_TOML;
    use crate::translit::TranslitOptions;

    fn table() -> MappingTable {
        MappingTable::parse(DEFAULT_MAPPING_TOML)
    }

    fn convert(input: &str) -> String {
        transliterate_segment(input, &table(), &TranslitOptions::default())
    }

    #[test]
    fn test_longest_match_wins() {
        // "chha" must match as one key, not "ch" + "ha".
        assert_eq!(convert("chha"), "छ");
        assert_eq!(convert("ksha"), "क्ष");
    }

    #[test]
    fn test_simple_word() {
        assert_eq!(convert("namaste"), "नमस्ते");
        assert_eq!(convert("nam"), "नम");
    }

    #[test]
    fn test_trailing_halant_stripped() {
        // "म्" from the bare "m" key loses its halant at segment end.
        assert_eq!(convert("ram"), "रम");
    }

    #[test]
    fn test_cluster_escape_keeps_halant() {
        assert_eq!(convert("ram\\"), "रम्");
        assert_eq!(convert("k\\"), "क्");
    }

    #[test]
    fn test_single_char_segment_keeps_halant() {
        assert_eq!(convert("k"), "क्");
    }

    #[test]
    fn test_slash_forces_boundary() {
        // Without the boundary "ita" matches "i" + "ta"; the slash
        // changes which prefixes are visible.
        assert_eq!(convert("pratishat"), convert("prati/shat"));
        assert_eq!(convert("a/i"), "अइ");
    }

    #[test]
    fn test_empty_sub_segments_skipped() {
        assert_eq!(convert("//a//"), "अ");
    }

    #[test]
    fn test_digits() {
        assert_eq!(convert("2024"), "२०२४");
    }

    #[test]
    fn test_digits_disabled() {
        let opts = TranslitOptions {
            indic_numbers: false,
            ..Default::default()
        };
        assert_eq!(transliterate_segment("2024", &table(), &opts), "2024");
    }

    #[test]
    fn test_symbols_disabled() {
        let opts = TranslitOptions {
            symbols: false,
            ..Default::default()
        };
        assert_eq!(transliterate_segment(".", &table(), &opts), ".");
        // Letters still transliterate.
        assert_eq!(transliterate_segment("ka.", &table(), &opts), "क.");
    }

    #[test]
    fn test_unknown_chars_pass_through() {
        assert_eq!(convert("x"), "x");
        assert_eq!(convert("नमस्ते"), "नमस्ते");
    }

    #[test]
    fn test_mixed_known_unknown() {
        assert_eq!(convert("kaX"), "कX");
    }
}
