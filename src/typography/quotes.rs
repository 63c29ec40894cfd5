//! Character classes and the quote-direction heuristic
//!
//! Straight quotes are resolved by looking at one character on each side.
//! The decision table follows SmartyPants: whitespace before a quote tends
//! to open it, a letter before it tends to close it, and when neither side
//! helps the open flag toggles.

/// Coarse class of the character next to a candidate substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Start or end of the text
    Boundary,
    Whitespace,
    /// ASCII punctuation
    Punctuation,
    Other,
}

impl CharClass {
    pub fn of(ch: Option<char>) -> Self {
        match ch {
            None => CharClass::Boundary,
            Some(c) if c.is_whitespace() => CharClass::Whitespace,
            Some(c) if c.is_ascii_punctuation() => CharClass::Punctuation,
            Some(_) => CharClass::Other,
        }
    }

    /// Boundary, whitespace and punctuation all end a word
    pub fn is_word_boundary(self) -> bool {
        !matches!(self, CharClass::Other)
    }
}

/// Whether a quote between `prev` and `next` opens, given the current flag
pub fn opens_quote(prev: CharClass, next: CharClass, open: bool) -> bool {
    use CharClass::*;

    match (prev, next) {
        // ["] no context at all
        (Boundary, Boundary) => !open,
        // [ "] might be [ "foo...]
        (Whitespace, Boundary) => true,
        // [!"] could be [Run!"]
        (Punctuation, Boundary) => false,
        // [a"]
        (Other, Boundary) => false,
        // [" ] might be [...foo" ]
        (Boundary, Whitespace) => false,
        // [ " ]
        (Whitespace, Whitespace) => !open,
        // [!" ]
        (Punctuation, Whitespace) => false,
        // [a" ]
        (Other, Whitespace) => false,
        // ["!] could be ["$1.95] or [..."!]
        (Boundary, Punctuation) => false,
        // [ "!] looks more like [ "$1.95]
        (Whitespace, Punctuation) => true,
        // [!"!]
        (Punctuation, Punctuation) => !open,
        // [a"!]
        (Other, Punctuation) => false,
        // ["a]
        (Boundary, Other) => true,
        // [ "a]
        (Whitespace, Other) => true,
        // [!"a]
        (Punctuation, Other) => true,
        // [a'b] a contraction
        (Other, Other) => false,
    }
}

/// Curly replacement for a straight quote, or `None` for other characters
pub fn curly_quote(quote: char, open: bool) -> Option<char> {
    match (quote, open) {
        ('\'', true) => Some('\u{2018}'),
        ('\'', false) => Some('\u{2019}'),
        ('"', true) => Some('\u{201C}'),
        ('"', false) => Some('\u{201D}'),
        _ => None,
    }
}
