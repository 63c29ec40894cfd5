//! Typographic substitutions
//!
//! A single forward scan rewrites typewriter conventions into their
//! typographic forms: `...` to an ellipsis, `--`/`---` to dashes, `(c)` and
//! friends to symbols, straight quotes to curly ones and a few vulgar
//! fractions. Ligatures are a separate pass over a fixed list, run first so
//! that the characters it produces are never seen as punctuation.
//!
//! Nothing here can fail: unrecognised input passes through untouched.

pub mod quotes;
pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::font_source::FontSource;
pub use quotes::{curly_quote, opens_quote, CharClass};
pub use rules::Substitution;

/// Multi-character sequences, longest form first where prefixes overlap
const SEQUENCES: &[(&str, char)] = &[
    ("...", '\u{2026}'),
    (". . .", '\u{2026}'),
    ("---", '\u{2014}'),
    ("--", '\u{2013}'),
    ("(c)", '\u{00A9}'),
    ("(r)", '\u{00AE}'),
    ("(tm)", '\u{2122}'),
];

/// Three-character fractions, only replaced between word boundaries
const FRACTIONS: &[(&str, char)] = &[
    ("1/2", '\u{00BD}'),
    ("1/4", '\u{00BC}'),
    ("3/4", '\u{00BE}'),
    ("+/-", '\u{00B1}'),
];

/// Open/closed state of single and double quotes within one text run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteState {
    pub single_open: bool,
    pub double_open: bool,
}

impl QuoteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget open quotes before an unrelated run of text
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn flag_mut(&mut self, quote: char) -> &mut bool {
        if quote == '"' {
            &mut self.double_open
        } else {
            &mut self.single_open
        }
    }
}

fn starts_with_at(chars: &[char], index: usize, pattern: &str) -> bool {
    pattern
        .chars()
        .enumerate()
        .all(|(offset, expected)| chars.get(index + offset) == Some(&expected))
}

fn is_fraction_boundary(ch: Option<char>) -> bool {
    ch != Some('/') && CharClass::of(ch).is_word_boundary()
}

/// Find the substitution starting at `index`: replacement and chars consumed
fn match_at(
    chars: &[char],
    index: usize,
    prev: Option<char>,
    state: &mut QuoteState,
) -> Option<(char, usize)> {
    if let Some(&(pattern, target)) = SEQUENCES
        .iter()
        .find(|(pattern, _)| starts_with_at(chars, index, pattern))
    {
        return Some((target, pattern.chars().count()));
    }

    let ch = chars[index];
    if ch == '"' || ch == '\'' {
        let next = chars.get(index + 1).copied();
        let open = state.flag_mut(ch);
        *open = opens_quote(CharClass::of(prev), CharClass::of(next), *open);
        return curly_quote(ch, *open).map(|quote| (quote, 1));
    }

    if is_fraction_boundary(prev) && is_fraction_boundary(chars.get(index + 3).copied()) {
        if let Some(&(_, target)) = FRACTIONS
            .iter()
            .find(|(pattern, _)| starts_with_at(chars, index, pattern))
        {
            return Some((target, 3));
        }
    }

    None
}

/// Run the punctuation pass over `text`, updating `state` for its quotes
///
/// The context character before a position is the character the scan saw
/// there in the input, even when it was replaced.
pub fn substitute_typography(text: &str, state: &mut QuoteState) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    let mut index = 0;

    while index < chars.len() {
        let ch = chars[index];
        match match_at(&chars, index, prev, state) {
            Some((replacement, consumed)) => {
                out.push(replacement);
                index += consumed;
            }
            None => {
                out.push(ch);
                index += 1;
            }
        }
        prev = Some(ch);
    }
    out
}

/// Replace every occurrence of each rule's source, in list order
pub fn substitute_ligatures(text: &str, rules: &[Substitution]) -> String {
    rules.iter().fold(text.to_string(), |text, rule| {
        if text.contains(rule.source) {
            text.replace(rule.source, rule.target.encode_utf8(&mut [0; 4]))
        } else {
            text
        }
    })
}

/// Map characters through single-character rules (super/subscripts)
pub fn substitute_script(text: &str, rules: &[Substitution]) -> String {
    text.chars()
        .map(|ch| {
            rules
                .iter()
                .find(|rule| rule.source.chars().eq(std::iter::once(ch)))
                .map_or(ch, |rule| rule.target)
        })
        .collect()
}

/// Which substitutions a font should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographicOptions {
    /// Quotes, dashes, ellipses, symbols and fractions
    pub typography: bool,
    /// ff, fi, fl, ffi, ffl
    pub common_ligatures: bool,
    /// long-s t and st
    pub historical_ligatures: bool,
}

impl Default for TypographicOptions {
    fn default() -> Self {
        Self {
            typography: true,
            common_ligatures: false,
            historical_ligatures: false,
        }
    }
}

/// Substitution setup of one font, filtered against its glyph coverage
///
/// Built once per font and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypographyConfig {
    typography: bool,
    ligatures: Vec<Substitution>,
    superscripts: Vec<Substitution>,
    subscripts: Vec<Substitution>,
}

impl TypographyConfig {
    pub fn for_font(font: &dyn FontSource, options: TypographicOptions) -> Self {
        let mut ligatures = Vec::new();
        if options.common_ligatures {
            ligatures.extend(rules::supported(font, rules::COMMON_LIGATURES));
        }
        if options.historical_ligatures {
            ligatures.extend(rules::supported(font, rules::HISTORICAL_LIGATURES));
        }
        let config = Self {
            typography: options.typography,
            ligatures,
            superscripts: rules::supported(font, rules::SUPERSCRIPTS),
            subscripts: rules::supported(font, rules::SUBSCRIPTS),
        };
        debug!(
            "Typography: substitutions {}, {} ligatures, {} superscripts, {} subscripts",
            if config.typography { "on" } else { "off" },
            config.ligatures.len(),
            config.superscripts.len(),
            config.subscripts.len()
        );
        config
    }

    pub fn typography(&self) -> bool {
        self.typography
    }

    pub fn ligatures(&self) -> &[Substitution] {
        &self.ligatures
    }

    pub fn superscripts(&self) -> &[Substitution] {
        &self.superscripts
    }

    pub fn subscripts(&self) -> &[Substitution] {
        &self.subscripts
    }

    /// Ligatures first, then the punctuation pass when enabled
    pub fn apply(&self, text: &str, state: &mut QuoteState) -> String {
        let text = substitute_ligatures(text, &self.ligatures);
        if self.typography {
            substitute_typography(&text, state)
        } else {
            text
        }
    }
}
