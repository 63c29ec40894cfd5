//! Font data access
//!
//! Layout never parses font binaries itself. Everything it needs from a
//! font (contour points, advances, kerning, metrics) comes through the
//! [`FontSource`] trait, so the decoder and the facade can be driven by
//! `read-fonts` in production and by in-memory glyph tables in tests.

pub mod metrics;
pub mod sfnt;

#[cfg(test)]
pub(crate) mod test_font;
#[cfg(test)]
mod tests;

use std::fmt;

use kurbo::Rect;

use crate::error::Result;

pub use metrics::FontMetrics;
pub use sfnt::SfntFont;

/// Which kind of outlines a font carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineFormat {
    /// Quadratic `glyf` contours
    TrueType,
    /// Cubic `CFF ` or `CFF2` charstrings
    Cff,
}

impl fmt::Display for OutlineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineFormat::TrueType => write!(f, "TrueType"),
            OutlineFormat::Cff => write!(f, "CFF"),
        }
    }
}

/// A contour point in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    pub on_curve: bool,
}

impl CurvePoint {
    pub fn on(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            on_curve: true,
        }
    }

    pub fn off(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            on_curve: false,
        }
    }

    /// The implied on-curve point between two off-curve neighbours
    pub fn midpoint(self, other: CurvePoint) -> CurvePoint {
        CurvePoint::on((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Raw outline data of one glyph, laid out the way `glyf` stores it
///
/// `end_points[i]` is the inclusive index of the last point of contour `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphContours {
    pub points: Vec<CurvePoint>,
    pub end_points: Vec<usize>,
}

impl GlyphContours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contour, recording its end index
    ///
    /// Pushing an empty contour is allowed so that callers can describe
    /// malformed data; the decoder rejects it.
    pub fn push_contour(&mut self, points: impl IntoIterator<Item = CurvePoint>) {
        self.points.extend(points);
        // An empty first contour has no valid end index; wrapping keeps the
        // sequence non-increasing so the decoder reports it.
        self.end_points.push(self.points.len().wrapping_sub(1));
    }

    pub fn with_contour(mut self, points: impl IntoIterator<Item = CurvePoint>) -> Self {
        self.push_contour(points);
        self
    }

    pub fn contour_count(&self) -> usize {
        self.end_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.end_points.is_empty()
    }
}

/// Read-only query surface over a parsed font
///
/// Glyph ids are the font's own indices. Lookups for ids past
/// [`FontSource::glyph_count`] fail with
/// [`OutlineError::InvalidGlyphReference`](crate::error::OutlineError::InvalidGlyphReference).
pub trait FontSource: Send + Sync {
    fn units_per_em(&self) -> u16;

    fn outline_format(&self) -> OutlineFormat;

    fn glyph_count(&self) -> u32;

    /// Map a character through the font's cmap
    fn glyph_index(&self, ch: char) -> Option<u32>;

    fn glyph_contours(&self, glyph_id: u32) -> Result<GlyphContours>;

    /// Horizontal advance in font units
    fn advance_width(&self, glyph_id: u32) -> Result<u16>;

    /// Pair adjustment in font units, zero when the pair is not kerned
    fn kerning(&self, left: u32, right: u32) -> Result<i16>;

    fn metrics(&self) -> Result<FontMetrics>;

    /// Union of all glyph bounds in font units
    fn bounds(&self) -> Result<Rect>;

    /// Counter-clockwise degrees from the vertical
    fn italic_angle(&self) -> f64;
}
