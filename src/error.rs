//! Errors raised while turning glyphs into outlines
//!
//! Structural failures (unsupported outline formats, unknown glyphs, broken
//! contours) are reported through [`OutlineError`]. Advisory layout
//! quantities such as kerning and metrics never surface these; the facade
//! degrades them to zero instead.

use thiserror::Error;

use crate::font_source::OutlineFormat;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, OutlineError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutlineError {
    /// Cubic (CFF/CFF2) outlines are not decoded
    #[error("{0} outlines are not supported")]
    UnsupportedOutlineFormat(OutlineFormat),

    /// The shaper or a lookup produced a glyph id the font does not have
    #[error("glyph {0} does not exist in this font")]
    InvalidGlyphReference(u32),

    /// A contour violates the point-count invariants
    #[error("glyph {glyph} contour {contour} is malformed: {reason}")]
    MalformedContour {
        glyph: u32,
        contour: usize,
        reason: &'static str,
    },

    #[error("font has no '{0}' table")]
    MissingTable(&'static str),

    #[error("failed to read font data: {0}")]
    Parse(String),

    #[error("text shaping failed: {0}")]
    Shaping(String),
}

impl OutlineError {
    /// Attach a glyph id to a contour error raised without one
    pub(crate) fn for_glyph(self, glyph_id: u32) -> Self {
        match self {
            OutlineError::MalformedContour {
                contour, reason, ..
            } => OutlineError::MalformedContour {
                glyph: glyph_id,
                contour,
                reason,
            },
            other => other,
        }
    }
}
