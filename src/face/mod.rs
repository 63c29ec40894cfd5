//! Font faces: a font at a size, style and variant
//!
//! A [`Face`] measures and outlines text with faux styles applied when the
//! font doesn't natively have the requested one: italics are a shear,
//! weights are an outward offset of the outline. Sub- and superscripts are
//! scaled down and shifted off the baseline.
//!
//! Sizes and every produced coordinate are in output units (millimetres
//! when used through the CLI). The y axis points up.

pub mod decoration;
pub mod font;
pub mod style;

use std::sync::Arc;

use kurbo::{BezPath, Point, Vec2};
use tracing::debug;

pub use decoration::{Decoration, Decorator};
pub use font::{Font, FontBuilder};
pub use style::{Color, FontStyle, FontVariant, FontWeight};

use crate::error::Result;
use crate::font_source::FontMetrics;
use crate::geometry;
use crate::outline;
use crate::typography::QuoteState;

/// Millimetres per typographic point
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Shear of a faux italic
pub const FAUX_ITALIC: f64 = 0.3;

/// Size factor of sub- and superscripts
pub const SCRIPT_SCALE: f64 = 0.583;

/// Extra faux bold for sub- and superscripts so strokes keep their weight
pub const SCRIPT_FAUX_BOLD: f64 = 0.02;

/// Baseline shift of sub- and superscripts, relative to the size
pub const SCRIPT_SHIFT: f64 = 0.33;

#[derive(Debug, Clone)]
pub struct Face {
    font: Arc<Font>,
    size: f64,
    style: FontStyle,
    variant: FontVariant,
    color: Color,
    decorations: Vec<Decoration>,

    scale: f64,
    voffset: f64,
    faux_bold: f64,
    faux_italic: f64,
}

impl Face {
    pub fn new(font: Arc<Font>, size: f64, style: FontStyle, variant: FontVariant) -> Self {
        let native = font.style();
        let (mut faux_bold, mut faux_italic) = (0.0, 0.0);
        if style != native {
            if style.italic && !native.italic {
                faux_italic = FAUX_ITALIC;
            }
            faux_bold = style.weight.faux_bold() - native.weight.faux_bold();
        }

        let (mut scale, mut voffset) = (1.0, 0.0);
        match variant {
            FontVariant::Subscript => {
                scale = SCRIPT_SCALE;
                faux_bold += SCRIPT_FAUX_BOLD;
                voffset = -SCRIPT_SHIFT * size;
            }
            FontVariant::Superscript => {
                scale = SCRIPT_SCALE;
                faux_bold += SCRIPT_FAUX_BOLD;
                voffset = SCRIPT_SHIFT * size;
            }
            FontVariant::Normal | FontVariant::SmallCaps => {}
        }

        debug!(
            "Face '{}' {} at {}: scale {}, faux bold {}, faux italic {}",
            font.name(),
            style,
            size,
            scale,
            faux_bold,
            faux_italic
        );

        Self {
            font,
            size,
            style,
            variant,
            color: Color::default(),
            decorations: Vec::new(),
            scale,
            voffset,
            faux_bold: faux_bold * size * scale,
            faux_italic,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    pub fn with_decorations(mut self, decorations: impl IntoIterator<Item = Decoration>) -> Self {
        self.decorations.extend(decorations);
        self
    }

    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    pub fn name(&self) -> &str {
        self.font.name()
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn variant(&self) -> FontVariant {
        self.variant
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Baseline shift, positive upwards
    pub fn voffset(&self) -> f64 {
        self.voffset
    }

    /// Outward outline offset in output units
    pub fn faux_bold(&self) -> f64 {
        self.faux_bold
    }

    pub fn faux_italic(&self) -> f64 {
        self.faux_italic
    }

    fn ppem(&self) -> f64 {
        self.size * self.scale
    }

    /// Metrics at the effective size, all positive
    pub fn metrics(&self) -> FontMetrics {
        self.font.metrics(self.ppem()).abs()
    }

    /// Adjustment on the advance between two characters
    pub fn kerning(&self, prev: char, next: char) -> f64 {
        self.font.kerning(prev, next, self.ppem())
    }

    /// Advance of `s` including kerning; unreadable glyphs count as zero
    pub fn text_width(&self, s: &str) -> f64 {
        let ppem = self.ppem();
        let mut width = 0.0;
        let mut prev = None;
        for ch in s.chars() {
            let glyph_id = self.font.glyph_or_notdef(ch);
            if let Some(prev) = prev {
                width += self.font.glyph_kerning(prev, glyph_id, ppem);
            }
            width += self.font.advance(glyph_id, ppem);
            prev = Some(glyph_id);
        }
        width
    }

    /// Append the outline of `s` to `path` with the baseline at y = 0
    ///
    /// Returns the total advance. A glyph that fails to decode stops the
    /// run; the glyphs before it stay in `path`.
    pub fn append_text(&self, path: &mut BezPath, s: &str) -> Result<f64> {
        let ppem = self.ppem();
        let mut x = 0.0;
        let mut prev = None;
        for ch in s.chars() {
            let glyph_id = self.font.glyph_or_notdef(ch);
            if let Some(prev) = prev {
                x += self.font.glyph_kerning(prev, glyph_id, ppem);
            }

            let mut glyph = outline::glyph_path(self.font.source(), glyph_id, ppem, Point::ZERO)?;
            geometry::shear(&mut glyph, self.faux_italic);
            if self.faux_bold != 0.0 {
                glyph = geometry::embolden(&glyph, self.faux_bold);
            }
            geometry::translate(&mut glyph, Vec2::new(x, self.voffset));
            geometry::append(path, &glyph);

            x += self.font.advance(glyph_id, ppem);
            prev = Some(glyph_id);
        }
        Ok(x)
    }

    /// Outline of `s` and its advance
    pub fn to_path(&self, s: &str) -> Result<(BezPath, f64)> {
        let mut path = BezPath::new();
        let advance = self.append_text(&mut path, s)?;
        Ok((path, advance))
    }

    /// All decorations of this face over `width`, in list order
    pub fn decorate(&self, width: f64) -> BezPath {
        let mut path = BezPath::new();
        for decoration in &self.decorations {
            geometry::append(&mut path, &decoration.decorate(self, width));
        }
        path
    }

    /// CSS-style weight, raised by 300 for sub- and superscripts, at most 1000
    pub fn boldness(&self) -> u16 {
        let mut boldness = self.style.weight.boldness();
        if self.variant.is_script() {
            boldness = (boldness + 300).min(1000);
        }
        boldness
    }

    /// Apply the font's ligatures and typographic substitutions
    pub fn prepare_text(&self, text: &str, state: &mut QuoteState) -> String {
        self.font.substitute(text, state)
    }

    /// Swap characters for their Unicode sub- or superscript forms where the
    /// font has them; other variants return the text unchanged
    pub fn script_text(&self, text: &str) -> String {
        match self.variant {
            FontVariant::Superscript => self.font.superscript(text),
            FontVariant::Subscript => self.font.subscript(text),
            FontVariant::Normal | FontVariant::SmallCaps => text.to_string(),
        }
    }
}

/// Faces are equal when they draw with the same font instance in the same
/// way, so adjacent spans can share one decoration
impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.font, &other.font)
            && self.size == other.size
            && self.style == other.style
            && self.variant == other.variant
            && self.color == other.color
            && self.decorations == other.decorations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutlineError;
    use crate::font_source::test_font::TestFont;
    use crate::font_source::GlyphContours;
    use crate::typography::TypographicOptions;
    use kurbo::{Rect, Shape};

    fn font() -> Arc<Font> {
        Arc::new(FontBuilder::new("Test Sans", TestFont::latin()).build())
    }

    fn regular(font: &Arc<Font>, size: f64) -> Face {
        Face::new(font.clone(), size, FontStyle::REGULAR, FontVariant::Normal)
    }

    fn assert_near(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    fn assert_rect_near(actual: Rect, expected: Rect) {
        assert_near(actual.x0, expected.x0);
        assert_near(actual.y0, expected.y0);
        assert_near(actual.x1, expected.x1);
        assert_near(actual.y1, expected.y1);
    }

    #[test]
    fn test_native_style_has_no_faux_styling() {
        let face = regular(&font(), 12.0);
        assert_eq!(face.scale(), 1.0);
        assert_eq!(face.voffset(), 0.0);
        assert_eq!(face.faux_bold(), 0.0);
        assert_eq!(face.faux_italic(), 0.0);
    }

    #[test]
    fn test_faux_styles_for_missing_styles() {
        let face = Face::new(
            font(),
            10.0,
            FontStyle::new(FontWeight::Bold, true),
            FontVariant::Normal,
        );
        assert_eq!(face.faux_italic(), FAUX_ITALIC);
        assert_near(face.faux_bold(), 0.2);

        let light = Face::new(font(), 10.0, FontStyle::new(FontWeight::Light, false), FontVariant::Normal);
        assert_near(light.faux_bold(), -0.1);
        assert_eq!(light.faux_italic(), 0.0);
    }

    #[test]
    fn test_faux_bold_is_relative_to_the_native_weight() {
        let bold_font = Arc::new(
            FontBuilder::new("Test Sans Bold", TestFont::latin())
                .style(FontStyle::new(FontWeight::Bold, false))
                .build(),
        );
        let face = Face::new(bold_font, 10.0, FontStyle::new(FontWeight::Black, false), FontVariant::Normal);
        assert_near(face.faux_bold(), 0.1);
    }

    #[test]
    fn test_script_variants_shrink_and_shift() {
        let sup = Face::new(font(), 10.0, FontStyle::REGULAR, FontVariant::Superscript);
        assert_eq!(sup.scale(), SCRIPT_SCALE);
        assert_near(sup.voffset(), 3.3);
        assert_near(sup.faux_bold(), 0.02 * 10.0 * SCRIPT_SCALE);

        let sub = Face::new(font(), 10.0, FontStyle::REGULAR, FontVariant::Subscript);
        assert_near(sub.voffset(), -3.3);
    }

    #[test]
    fn test_boldness() {
        let face = |weight, variant| Face::new(font(), 10.0, FontStyle::new(weight, false), variant);
        assert_eq!(face(FontWeight::Regular, FontVariant::Normal).boldness(), 400);
        assert_eq!(face(FontWeight::ExtraLight, FontVariant::Normal).boldness(), 100);
        assert_eq!(face(FontWeight::Light, FontVariant::Subscript).boldness(), 500);
        assert_eq!(face(FontWeight::Bold, FontVariant::Superscript).boldness(), 1000);
        assert_eq!(face(FontWeight::ExtraBlack, FontVariant::Subscript).boldness(), 1000);
    }

    #[test]
    fn test_equality_needs_the_same_font_instance() {
        let shared = font();
        assert_eq!(regular(&shared, 12.0), regular(&shared, 12.0));
        assert_ne!(regular(&shared, 12.0), regular(&font(), 12.0));
        assert_ne!(regular(&shared, 12.0), regular(&shared, 13.0));
        assert_ne!(
            regular(&shared, 12.0),
            regular(&shared, 12.0).with_color(Color::rgba(255, 0, 0, 255))
        );
        assert_ne!(
            regular(&shared, 12.0),
            regular(&shared, 12.0).with_decoration(Decoration::Underline)
        );
        assert_ne!(
            regular(&shared, 12.0),
            Face::new(shared.clone(), 12.0, FontStyle::REGULAR, FontVariant::Subscript)
        );
        assert_ne!(
            regular(&shared, 12.0),
            Face::new(shared.clone(), 12.0, FontStyle::REGULAR.with_italic(true), FontVariant::Normal)
        );
    }

    #[test]
    fn test_metrics_are_absolute() {
        let metrics = regular(&font(), 10.0).metrics();
        assert_eq!(metrics.ascent, 8.0);
        assert_eq!(metrics.descent, 2.0);
        assert_eq!(metrics.line_height, 10.0);
    }

    #[test]
    fn test_text_width_includes_kerning() {
        let face = regular(&font(), 1000.0);
        assert_eq!(face.text_width("AV"), 1120.0);
        assert_eq!(face.text_width("VA"), 1200.0);
        assert_eq!(face.kerning('A', 'V'), -80.0);
        assert_eq!(face.text_width(""), 0.0);
    }

    #[test]
    fn test_to_path_advance_matches_width() {
        let face = regular(&font(), 1000.0);
        let (path, advance) = face.to_path("AV").unwrap();
        assert_eq!(advance, face.text_width("AV"));
        assert_rect_near(path.bounding_box(), Rect::new(0.0, 0.0, 1120.0, 700.0));
    }

    #[test]
    fn test_faux_italic_shears_glyphs() {
        let face = Face::new(font(), 1000.0, FontStyle::REGULAR.with_italic(true), FontVariant::Normal);
        let (path, _) = face.to_path("i").unwrap();
        assert_rect_near(path.bounding_box(), Rect::new(0.0, 0.0, 250.0 + 0.3 * 700.0, 700.0));
    }

    #[test]
    fn test_faux_bold_grows_glyphs() {
        let face = Face::new(font(), 1000.0, FontStyle::new(FontWeight::Bold, false), FontVariant::Normal);
        let (path, advance) = face.to_path("i").unwrap();
        assert_rect_near(path.bounding_box(), Rect::new(-20.0, -20.0, 270.0, 720.0));
        // Emboldening doesn't change the advance
        assert_eq!(advance, 250.0);
    }

    #[test]
    fn test_subscript_sits_below_the_baseline() {
        let face = Face::new(font(), 100.0, FontStyle::REGULAR, FontVariant::Subscript);
        let (path, advance) = face.to_path("i").unwrap();
        let bold = 0.02 * 100.0 * SCRIPT_SCALE;
        let height = 700.0 * 100.0 * SCRIPT_SCALE / 1000.0;
        assert_rect_near(
            path.bounding_box(),
            Rect::new(-bold, -33.0 - bold, 25.0 * SCRIPT_SCALE + bold, -33.0 + height + bold),
        );
        assert_near(advance, 25.0 * SCRIPT_SCALE);
    }

    #[test]
    fn test_malformed_glyph_keeps_earlier_glyphs() {
        let broken = GlyphContours {
            points: Vec::new(),
            end_points: vec![3],
        };
        let font = Arc::new(FontBuilder::new("Broken", TestFont::latin().with_glyph('x', broken, 500)).build());
        let face = regular(&font, 1000.0);

        let mut path = BezPath::new();
        let err = face.append_text(&mut path, "Ax").unwrap_err();
        assert!(matches!(err, OutlineError::MalformedContour { contour: 0, .. }));
        assert_eq!(path.elements().len(), 5);
    }

    #[test]
    fn test_cff_font_fails_loudly() {
        let font = Arc::new(FontBuilder::new("Cubic", TestFont::latin().cff()).build());
        let face = regular(&font, 12.0);
        assert!(matches!(
            face.to_path("A"),
            Err(OutlineError::UnsupportedOutlineFormat(_))
        ));
        // Measuring still works from hmtx
        assert_near(face.text_width("A"), 7.2);
    }

    #[test]
    fn test_decorate_unions_in_order() {
        let face = regular(&font(), 10.0)
            .with_decorations([Decoration::Underline, Decoration::DoubleUnderline]);
        let path = face.decorate(20.0);
        assert_eq!(geometry::subpath_count(&path), 3);
        assert!(regular(&font(), 10.0).decorate(20.0).elements().is_empty());
    }

    #[test]
    fn test_prepare_and_script_text() {
        let font = Arc::new(
            FontBuilder::new("Test Sans", TestFont::latin())
                .options(TypographicOptions {
                    common_ligatures: true,
                    ..TypographicOptions::default()
                })
                .build(),
        );
        let face = regular(&font, 12.0);
        let mut state = QuoteState::new();
        assert_eq!(
            face.prepare_text("\"fine\"", &mut state),
            "\u{201C}\u{FB01}ne\u{201D}"
        );
        assert_eq!(face.script_text("x2"), "x2");

        let sup = Face::new(font.clone(), 12.0, FontStyle::REGULAR, FontVariant::Superscript);
        assert_eq!(sup.script_text("x2"), "x\u{00B2}");
        let sub = Face::new(font, 12.0, FontStyle::REGULAR, FontVariant::Subscript);
        assert_eq!(sub.script_text("H2O"), "H\u{2082}O");
    }
}
