/// Character-level Unicode classification for Devanagari text.

pub fn is_consonant(c: char) -> bool {
    ('\u{0915}'..='\u{0939}').contains(&c) || ('\u{0958}'..='\u{095F}').contains(&c)
}

pub fn is_independent_vowel(c: char) -> bool {
    ('\u{0904}'..='\u{0914}').contains(&c)
}

/// Dependent vowel signs (matras), including the vocalic R/L signs.
pub fn is_dependent_vowel_sign(c: char) -> bool {
    ('\u{093E}'..='\u{094C}').contains(&c) || ('\u{0962}'..='\u{0963}').contains(&c)
}

pub fn is_halant(c: char) -> bool {
    c == '\u{094D}'
}

pub fn is_nukta(c: char) -> bool {
    c == '\u{093C}'
}

/// Anusvara, visarga or chandrabindu.
pub fn is_modifier(c: char) -> bool {
    ('\u{0901}'..='\u{0903}').contains(&c)
}

pub fn is_avagraha(c: char) -> bool {
    c == '\u{093D}'
}

pub fn is_joiner(c: char) -> bool {
    c == '\u{200C}' || c == '\u{200D}'
}

pub fn is_devanagari_digit(c: char) -> bool {
    ('\u{0966}'..='\u{096F}').contains(&c)
}

/// Danda, double danda, the abbreviation sign, or ASCII punctuation.
pub fn is_danda_or_punctuation(c: char) -> bool {
    matches!(c, '\u{0964}' | '\u{0965}' | '\u{0970}') || c.is_ascii_punctuation()
}

/// Gate for every other predicate: a code point outside the Devanagari
/// block, its extension, and the two joiners is never a valid in-word
/// character.
pub fn is_allowed_devanagari_char(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
        || ('\u{A8E0}'..='\u{A8FF}').contains(&c)
        || is_joiner(c)
}
