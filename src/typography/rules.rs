//! Fixed substitution lists
//!
//! Ligatures are approximated with the Unicode presentation forms rather
//! than read from GSUB. Each list is filtered against the font once, so
//! only targets the font can actually draw are ever substituted.

use crate::font_source::FontSource;

/// Replace the literal `source` with the single character `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Substitution {
    pub source: &'static str,
    pub target: char,
}

const fn rule(source: &'static str, target: char) -> Substitution {
    Substitution { source, target }
}

/// Longest first, so `ffi` wins over `ff` + `i`
pub const COMMON_LIGATURES: &[Substitution] = &[
    rule("ffi", '\u{FB03}'),
    rule("ffl", '\u{FB04}'),
    rule("ff", '\u{FB00}'),
    rule("fi", '\u{FB01}'),
    rule("fl", '\u{FB02}'),
];

pub const HISTORICAL_LIGATURES: &[Substitution] = &[
    rule("\u{017F}t", '\u{FB05}'),
    rule("st", '\u{FB06}'),
];

pub const SUPERSCRIPTS: &[Substitution] = &[
    rule("0", '\u{2070}'),
    rule("i", '\u{2071}'),
    rule("2", '\u{00B2}'),
    rule("3", '\u{00B3}'),
    rule("4", '\u{2074}'),
    rule("5", '\u{2075}'),
    rule("6", '\u{2076}'),
    rule("7", '\u{2077}'),
    rule("8", '\u{2078}'),
    rule("9", '\u{2079}'),
    rule("+", '\u{207A}'),
    rule("-", '\u{207B}'),
    rule("=", '\u{207C}'),
    rule("(", '\u{207D}'),
    rule(")", '\u{207E}'),
    rule("n", '\u{207F}'),
];

pub const SUBSCRIPTS: &[Substitution] = &[
    rule("0", '\u{2080}'),
    rule("1", '\u{2081}'),
    rule("2", '\u{2082}'),
    rule("3", '\u{2083}'),
    rule("4", '\u{2084}'),
    rule("5", '\u{2085}'),
    rule("6", '\u{2086}'),
    rule("7", '\u{2087}'),
    rule("8", '\u{2088}'),
    rule("9", '\u{2089}'),
    rule("+", '\u{208A}'),
    rule("-", '\u{208B}'),
    rule("=", '\u{208C}'),
    rule("(", '\u{208D}'),
    rule(")", '\u{208E}'),
    rule("a", '\u{2090}'),
    rule("e", '\u{2091}'),
    rule("o", '\u{2092}'),
    rule("x", '\u{2093}'),
    rule("h", '\u{2095}'),
    rule("k", '\u{2096}'),
    rule("l", '\u{2097}'),
    rule("m", '\u{2098}'),
    rule("n", '\u{2099}'),
    rule("p", '\u{209A}'),
    rule("s", '\u{209B}'),
    rule("t", '\u{209C}'),
];

/// Keep the rules whose target the font has a glyph for
pub fn supported(font: &dyn FontSource, rules: &[Substitution]) -> Vec<Substitution> {
    rules
        .iter()
        .filter(|rule| font.glyph_index(rule.target).is_some())
        .copied()
        .collect()
}
