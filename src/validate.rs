//! Orthographic well-formedness checks for Devanagari words.
//!
//! `is_valid_devanagari_word` is a strict syntactic filter, not a
//! dictionary lookup: it accepts any plausible cluster sequence, real
//! word or not. Collaborators (the word store, the CLI) run it after
//! `sanitize_devanagari_word` before persisting anything.

use unicode_segmentation::UnicodeSegmentation;

use crate::unicode::{
    is_allowed_devanagari_char, is_avagraha, is_consonant, is_danda_or_punctuation,
    is_dependent_vowel_sign, is_devanagari_digit, is_halant, is_independent_vowel, is_joiner,
    is_modifier, is_nukta,
};

/// Count user-perceived characters (extended grapheme clusters).
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Remove sentence punctuation (danda, double danda, abbreviation sign,
/// ASCII punctuation) from a candidate word.
pub fn sanitize_devanagari_word(s: &str) -> String {
    s.chars().filter(|&c| !is_danda_or_punctuation(c)).collect()
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Start,
    AfterConsonant,
    AfterHalant,
    AfterIndependentVowel,
    AfterSyllableWithMatra,
    AfterModifier,
    AfterAvagraha,
}

/// Finite-state acceptance scan over a candidate word.
///
/// Rejects empty and single-grapheme input outright, then walks the
/// code points with a small state machine; any character outside the
/// Devanagari block (plus joiners), any digit or punctuation, and any
/// disallowed transition rejects immediately. A word may never end on
/// a dangling joiner.
pub fn is_valid_devanagari_word(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if grapheme_count(s) < 2 {
        return false;
    }

    let mut state = State::Start;
    for c in s.chars() {
        if !is_allowed_devanagari_char(c) {
            return false;
        }
        if is_devanagari_digit(c) || is_danda_or_punctuation(c) {
            return false;
        }

        state = if is_consonant(c) {
            // A consonant may start a word, extend a conjunct, or open
            // a new syllable after any vowel sound.
            State::AfterConsonant
        } else if is_independent_vowel(c) {
            match state {
                State::Start
                | State::AfterIndependentVowel
                | State::AfterModifier
                | State::AfterAvagraha => State::AfterIndependentVowel,
                _ => return false,
            }
        } else if is_halant(c) {
            match state {
                State::AfterConsonant => State::AfterHalant,
                _ => return false,
            }
        } else if is_nukta(c) {
            // Consonant + nukta is still a consonant.
            match state {
                State::AfterConsonant => State::AfterConsonant,
                _ => return false,
            }
        } else if is_dependent_vowel_sign(c) {
            match state {
                State::AfterConsonant => State::AfterSyllableWithMatra,
                _ => return false,
            }
        } else if is_modifier(c) {
            match state {
                State::AfterConsonant
                | State::AfterIndependentVowel
                | State::AfterSyllableWithMatra => State::AfterModifier,
                _ => return false,
            }
        } else if is_avagraha(c) {
            match state {
                State::AfterConsonant
                | State::AfterIndependentVowel
                | State::AfterSyllableWithMatra
                | State::AfterModifier => State::AfterAvagraha,
                _ => return false,
            }
        } else if is_joiner(c) {
            // Only meaningful as a ligature hint after an explicit
            // conjunct marker; orphaned joiners are rejected.
            match state {
                State::AfterHalant => State::AfterHalant,
                _ => return false,
            }
        } else {
            return false;
        }
    }

    if s.chars().next_back().is_some_and(is_joiner) {
        return false;
    }

    state != State::Start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_invalid() {
        assert!(!is_valid_devanagari_word(""));
    }

    #[test]
    fn test_single_grapheme_invalid() {
        assert!(!is_valid_devanagari_word("क"));
        assert!(!is_valid_devanagari_word("का")); // one cluster
        assert!(!is_valid_devanagari_word("अ"));
    }

    #[test]
    fn test_simple_words_valid() {
        assert!(is_valid_devanagari_word("नमस्ते"));
        assert!(is_valid_devanagari_word("नेपाल"));
        assert!(is_valid_devanagari_word("आज"));
        assert!(is_valid_devanagari_word("कलम"));
    }

    #[test]
    fn test_modifier_words() {
        assert!(is_valid_devanagari_word("रामः"));
        assert!(is_valid_devanagari_word("हाँस"));
        assert!(is_valid_devanagari_word("संसार"));
    }

    #[test]
    fn test_word_ending_in_halant_valid() {
        // AFTER_HALANT is an accepting state.
        assert!(is_valid_devanagari_word("छन्"));
        assert!(is_valid_devanagari_word("गर्नुहोस्"));
    }

    #[test]
    fn test_avagraha() {
        assert!(is_valid_devanagari_word("सोऽहम्"));
        // Avagraha cannot start a word.
        assert!(!is_valid_devanagari_word("ऽहम्"));
    }

    #[test]
    fn test_nukta_after_consonant_only() {
        assert!(is_valid_devanagari_word("ज़रा"));
        assert!(!is_valid_devanagari_word("अ़क"));
    }

    #[test]
    fn test_digits_reject() {
        assert!(!is_valid_devanagari_word("नमस्ते१"));
        assert!(!is_valid_devanagari_word("१२"));
        assert!(!is_valid_devanagari_word("नम2"));
    }

    #[test]
    fn test_punctuation_rejects() {
        assert!(!is_valid_devanagari_word("नमस्ते।"));
        assert!(!is_valid_devanagari_word("नम."));
        assert!(!is_valid_devanagari_word("राम॥"));
    }

    #[test]
    fn test_non_devanagari_rejects() {
        assert!(!is_valid_devanagari_word("namaste"));
        assert!(!is_valid_devanagari_word("नमste"));
    }

    #[test]
    fn test_matra_requires_consonant() {
        // Matra directly after an independent vowel is malformed.
        assert!(!is_valid_devanagari_word("अाम"));
    }

    #[test]
    fn test_vowel_after_matra_rejects() {
        assert!(!is_valid_devanagari_word("काअ"));
    }

    #[test]
    fn test_halant_requires_consonant() {
        assert!(!is_valid_devanagari_word("अ्क"));
        assert!(!is_valid_devanagari_word("का्म"));
    }

    #[test]
    fn test_joiner_after_halant_ok_mid_word() {
        // consonant + halant + ZWJ + consonant
        assert!(is_valid_devanagari_word("सक्\u{200D}त"));
        assert!(is_valid_devanagari_word("सक्\u{200C}त"));
    }

    #[test]
    fn test_trailing_joiner_rejects() {
        assert!(!is_valid_devanagari_word("सक्\u{200D}"));
        assert!(!is_valid_devanagari_word("सक्\u{200C}"));
    }

    #[test]
    fn test_orphan_joiner_rejects() {
        assert!(!is_valid_devanagari_word("स\u{200D}क"));
        assert!(!is_valid_devanagari_word("\u{200D}सक"));
    }

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count(""), 0);
        assert_eq!(grapheme_count("क"), 1);
        assert_eq!(grapheme_count("का"), 1);
        assert_eq!(grapheme_count("क्"), 1);
        assert_eq!(grapheme_count("राम"), 2);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_devanagari_word("नमस्ते।"), "नमस्ते");
        assert_eq!(sanitize_devanagari_word("राम॥"), "राम");
        assert_eq!(sanitize_devanagari_word("शब्द."), "शब्द");
        assert_eq!(sanitize_devanagari_word("खाली"), "खाली");
        assert_eq!(sanitize_devanagari_word("।॥"), "");
    }
}
