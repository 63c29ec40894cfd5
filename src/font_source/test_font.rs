//! In-memory font used by unit tests
//!
//! Glyph 0 is `.notdef` (a 500 x 700 box), every other glyph is added
//! explicitly. Units per em default to 1000 so scale factors stay readable.

use std::collections::HashMap;

use kurbo::Rect;

use super::{CurvePoint, FontMetrics, FontSource, GlyphContours, OutlineFormat};
use crate::error::{OutlineError, Result};

#[derive(Debug, Clone)]
struct TestGlyph {
    contours: GlyphContours,
    advance: u16,
}

#[derive(Debug, Clone)]
pub struct TestFont {
    units_per_em: u16,
    format: OutlineFormat,
    glyphs: Vec<TestGlyph>,
    cmap: HashMap<char, u32>,
    kerning: HashMap<(u32, u32), i16>,
}

/// Axis-aligned rectangle contour, counter-clockwise
pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<CurvePoint> {
    vec![
        CurvePoint::on(x0, y0),
        CurvePoint::on(x1, y0),
        CurvePoint::on(x1, y1),
        CurvePoint::on(x0, y1),
    ]
}

/// An "o"-like contour made only of off-curve points
pub fn off_curve_ring(cx: f64, cy: f64, r: f64) -> Vec<CurvePoint> {
    vec![
        CurvePoint::off(cx + r, cy + r),
        CurvePoint::off(cx - r, cy + r),
        CurvePoint::off(cx - r, cy - r),
        CurvePoint::off(cx + r, cy - r),
    ]
}

impl TestFont {
    pub fn new() -> Self {
        Self {
            units_per_em: 1000,
            format: OutlineFormat::TrueType,
            glyphs: vec![TestGlyph {
                contours: GlyphContours::new().with_contour(rectangle(50.0, 0.0, 450.0, 700.0)),
                advance: 500,
            }],
            cmap: HashMap::new(),
            kerning: HashMap::new(),
        }
    }

    /// A handful of Latin glyphs plus the `fi`/`ffi` ligatures
    ///
    /// `A` and `V` kern by -80; space is empty with a 250 advance.
    pub fn latin() -> Self {
        let box_glyph = |width: f64| GlyphContours::new().with_contour(rectangle(0.0, 0.0, width, 700.0));
        Self::new()
            .with_glyph('A', box_glyph(600.0), 600)
            .with_glyph('V', box_glyph(600.0), 600)
            .with_glyph('f', box_glyph(300.0), 300)
            .with_glyph('i', box_glyph(250.0), 250)
            .with_glyph('o', GlyphContours::new().with_contour(off_curve_ring(250.0, 250.0, 200.0)), 500)
            .with_glyph(' ', GlyphContours::new(), 250)
            .with_glyph('\u{FB01}', box_glyph(550.0), 550)
            .with_glyph('\u{FB03}', box_glyph(850.0), 850)
            .with_glyph('\u{00B2}', box_glyph(300.0), 300)
            .with_glyph('\u{2082}', box_glyph(300.0), 300)
            .with_kerning('A', 'V', -80)
    }

    pub fn with_units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    pub fn cff(mut self) -> Self {
        self.format = OutlineFormat::Cff;
        self
    }

    pub fn with_glyph(mut self, ch: char, contours: GlyphContours, advance: u16) -> Self {
        let id = self.push_glyph(contours, advance);
        self.cmap.insert(ch, id);
        self
    }

    /// Add a glyph reachable only by id, as a shaper would produce
    pub fn push_glyph(&mut self, contours: GlyphContours, advance: u16) -> u32 {
        self.glyphs.push(TestGlyph { contours, advance });
        (self.glyphs.len() - 1) as u32
    }

    pub fn with_kerning(mut self, left: char, right: char, value: i16) -> Self {
        if let (Some(&l), Some(&r)) = (self.cmap.get(&left), self.cmap.get(&right)) {
            self.kerning.insert((l, r), value);
        }
        self
    }

    fn glyph(&self, glyph_id: u32) -> Result<&TestGlyph> {
        self.glyphs
            .get(glyph_id as usize)
            .ok_or(OutlineError::InvalidGlyphReference(glyph_id))
    }
}

impl FontSource for TestFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn outline_format(&self) -> OutlineFormat {
        self.format
    }

    fn glyph_count(&self) -> u32 {
        self.glyphs.len() as u32
    }

    fn glyph_index(&self, ch: char) -> Option<u32> {
        self.cmap.get(&ch).copied()
    }

    fn glyph_contours(&self, glyph_id: u32) -> Result<GlyphContours> {
        if self.format == OutlineFormat::Cff {
            return Err(OutlineError::UnsupportedOutlineFormat(self.format));
        }
        Ok(self.glyph(glyph_id)?.contours.clone())
    }

    fn advance_width(&self, glyph_id: u32) -> Result<u16> {
        Ok(self.glyph(glyph_id)?.advance)
    }

    fn kerning(&self, left: u32, right: u32) -> Result<i16> {
        self.glyph(left)?;
        self.glyph(right)?;
        Ok(self.kerning.get(&(left, right)).copied().unwrap_or(0))
    }

    fn metrics(&self) -> Result<FontMetrics> {
        Ok(FontMetrics::from_tables(
            f64::from(self.units_per_em),
            800.0,
            -200.0,
            0.0,
            Some(500.0),
            Some(700.0),
        ))
    }

    fn bounds(&self) -> Result<Rect> {
        Ok(Rect::new(0.0, -200.0, 850.0, 800.0))
    }

    fn italic_angle(&self) -> f64 {
        0.0
    }
}
