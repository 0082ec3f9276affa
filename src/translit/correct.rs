//! Phonetic correction passes applied to a Latin token before matching.
//!
//! Auto-correction is an exact override lookup and short-circuits
//! everything else. Smart correction is a fixed, ordered pipeline of
//! rewrites over one working copy; later rules see the output of
//! earlier ones. The word-ending rules only run on tokens longer than
//! three characters, the nasal rules run regardless of length.

use std::collections::HashMap;

/// Exact override lookup. `Some` means the token is replaced verbatim
/// and no further heuristics or smart rules run on it.
pub(crate) fn apply_auto_correction<'a>(
    word: &str,
    special_words: &'a HashMap<String, String>,
) -> Option<&'a str> {
    special_words.get(word).map(String::as_str)
}

pub(crate) fn apply_smart_correction(word: &str) -> String {
    let mut w: Vec<char> = word.chars().collect();
    if w.len() > 3 {
        rewrite_word_ending(&mut w);
    }
    rewrite_velar_nasal(&mut w);
    rewrite_ng_gemination(&mut w);
    rewrite_retroflex_and_palatal_nasal(&mut w);
    w.into_iter().collect()
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Word-final rewrites: trailing `y` → `ee`, schwa appending, and
/// trailing `i` → `ee`.
///
/// The look-back characters are captured once, before any rewrite in
/// this function mutates the token; the trailing-`i` rule in
/// particular matches against the original ending.
fn rewrite_word_ending(w: &mut Vec<char>) {
    let n = w.len();
    let e0 = w[n - 1].to_ascii_lowercase();
    let e1 = w[n - 2].to_ascii_lowercase();
    let e2 = w[n - 3].to_ascii_lowercase();
    let e3 = w[n - 4].to_ascii_lowercase();

    if e0 == 'y' {
        // A final consonantal 'y' stands for a long vowel: "gunDy"
        // was meant as "gunDee".
        w.truncate(n - 1);
        w.extend(['e', 'e']);
    } else if !(e0 == 'a' && e1 == 'h' && e2 == 'h')
        && !(e0 == 'a' && e1 == 'n' && (e2 == 'k' || e2 == 'h' || e2 == 'r'))
        && !(e0 == 'a' && e1 == 'r' && ((e2 == 'd' && e3 == 'n') || (e2 == 't' && e3 == 'n')))
    {
        // Schwa appending, skipped for the excluded endings above where
        // the final 'a' is usually silent.
        if e0 == 'a' && (e1 == 'm' || (!is_vowel(e1) && !is_vowel(e3) && e1 != 'y' && e2 != 'e')) {
            w.push('a');
        }
    }

    // A short final 'i' after a consonant was usually meant as the long
    // 'ee' sound, except in 'rri' sequences.
    if e0 == 'i' && !is_vowel(e1) && !(e1 == 'r' && e2 == 'r') {
        let len = w.len();
        w.truncate(len - 1);
        w.extend(['e', 'e']);
    }
}

/// `n` before a velar stop becomes `ng`: "ank" → "angk".
fn rewrite_velar_nasal(w: &mut Vec<char>) {
    let mut i = 0;
    while i < w.len() {
        if w[i].to_ascii_lowercase() == 'n' && i > 0 && i + 1 < w.len() {
            let next = w[i + 1].to_ascii_lowercase();
            if next == 'k' || next == 'g' {
                w[i] = 'n';
                w.insert(i + 1, 'g');
                i += 1;
            }
        }
        i += 1;
    }
}

/// Double the `g` of an `ng` cluster followed by a vowel, when at least
/// two characters precede it: "sangha" → "sanggha".
fn rewrite_ng_gemination(w: &mut Vec<char>) {
    let mut pos = find_pair(w, 0, 'n', 'g');
    while let Some(p) = pos {
        if p >= 2 && p + 2 < w.len() && is_vowel(w[p + 2]) {
            w.insert(p + 2, 'g');
            pos = find_pair(w, p + 3, 'n', 'g');
        } else {
            pos = find_pair(w, p + 1, 'n', 'g');
        }
    }
}

/// `n` before a retroflex stop becomes `N`; `n` before `ch` (but not
/// `chh`) becomes the palatal nasal glyph directly, bypassing the
/// mapping table for that one character.
fn rewrite_retroflex_and_palatal_nasal(w: &mut Vec<char>) {
    let mut i = 0;
    while i < w.len() {
        if w[i] == 'n' && i + 1 < w.len() {
            let next = w[i + 1];
            if next == 'T' || next == 'D' {
                w[i] = 'N';
                i += 1;
            } else if next == 'c'
                && i + 2 < w.len()
                && w[i + 2] == 'h'
                && !(i + 3 < w.len() && w[i + 3] == 'h')
            {
                w[i] = 'ञ';
                w.insert(i + 1, '्');
                i += 1;
            }
        }
        i += 1;
    }
}

fn find_pair(w: &[char], from: usize, a: char, b: char) -> Option<usize> {
    if w.len() < 2 {
        return None;
    }
    (from..w.len() - 1).find(|&i| w[i] == a && w[i + 1] == b)
}
