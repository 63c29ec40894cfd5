//! Glyph positioning
//!
//! Places the outlines of a shaped run along a pen. The pen moves in whole
//! font units and every glyph is scaled on its own placement, so rounding
//! never accumulates across a run.

use kurbo::{BezPath, Point, Vec2};
use tracing::debug;

use crate::error::Result;
use crate::font_source::FontSource;
use crate::outline::{append_glyph, Placement};
use crate::shaping::{PositionedGlyph, Script, Shaper, TextDirection};

/// Append the outlines of `glyphs` to `path`, starting at `origin`
///
/// Returns the pen advance in output units. A glyph that fails to decode
/// stops the run with everything before it already in `path`.
pub fn append_run(
    path: &mut BezPath,
    font: &dyn FontSource,
    glyphs: &[PositionedGlyph],
    size: f64,
    origin: Point,
) -> Result<Vec2> {
    let scale = Placement::for_size(size, font.units_per_em(), origin).scale;
    let (mut pen_x, mut pen_y) = (0i64, 0i64);

    for glyph in glyphs {
        let at = Point::new(
            origin.x + (pen_x + i64::from(glyph.x_offset)) as f64 * scale,
            origin.y + (pen_y + i64::from(glyph.y_offset)) as f64 * scale,
        );
        append_glyph(path, font, glyph.glyph_id, Placement::new(scale, at))?;
        pen_x += i64::from(glyph.x_advance);
        pen_y += i64::from(glyph.y_advance);
    }

    Ok(Vec2::new(pen_x as f64 * scale, pen_y as f64 * scale))
}

/// Shape `text` left to right and append its outline to `path`
pub fn append_text(
    path: &mut BezPath,
    font: &dyn FontSource,
    shaper: &dyn Shaper,
    text: &str,
    size: f64,
    origin: Point,
) -> Result<Vec2> {
    let glyphs = shaper.shape(text, size, TextDirection::LeftToRight, Script::Latin)?;
    debug!("Positioning {} glyphs at size {}", glyphs.len(), size);
    append_run(path, font, &glyphs, size, origin)
}

/// Outline of `text` at the origin, with its advance
pub fn text_path(
    font: &dyn FontSource,
    shaper: &dyn Shaper,
    text: &str,
    size: f64,
) -> Result<(BezPath, Vec2)> {
    let mut path = BezPath::new();
    let advance = append_text(&mut path, font, shaper, text, size, Point::ZERO)?;
    Ok((path, advance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutlineError;
    use crate::font_source::test_font::TestFont;
    use crate::shaping::CmapShaper;
    use kurbo::PathEl;

    fn first_point(path: &BezPath) -> Point {
        match path.elements().first() {
            Some(PathEl::MoveTo(p)) => *p,
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_final_pen_is_scaled_sum_of_advances() {
        let font = TestFont::latin();
        let (path, advance) = text_path(&font, &CmapShaper::new(&font), "AV", 500.0).unwrap();
        // (600 - 80 + 600) * 500 / 1000
        assert_eq!(advance, Vec2::new(560.0, 0.0));
        assert_eq!(path.elements().len(), 10);
    }

    #[test]
    fn test_second_glyph_starts_at_kerned_pen() {
        let font = TestFont::latin();
        let mut path = BezPath::new();
        append_text(&mut path, &font, &CmapShaper::new(&font), "AV", 1000.0, Point::ZERO).unwrap();
        // V's rectangle starts at its own origin
        assert_eq!(path.elements()[5], PathEl::MoveTo(Point::new(520.0, 0.0)));
    }

    #[test]
    fn test_offsets_and_origin_move_the_glyph_not_the_pen() {
        let font = TestFont::latin();
        let id = font.glyph_index('i').unwrap();
        let glyphs = [PositionedGlyph {
            glyph_id: id,
            x_advance: 250,
            x_offset: 100,
            y_offset: -50,
            ..PositionedGlyph::default()
        }];
        let mut path = BezPath::new();
        let advance = append_run(&mut path, &font, &glyphs, 10.0, Point::new(3.0, 4.0)).unwrap();
        assert_eq!(first_point(&path), Point::new(4.0, 3.5));
        assert_eq!(advance, Vec2::new(2.5, 0.0));
    }

    #[test]
    fn test_empty_glyphs_only_advance() {
        let font = TestFont::latin();
        let (path, advance) = text_path(&font, &CmapShaper::new(&font), "  ", 1000.0).unwrap();
        assert!(path.elements().is_empty());
        assert_eq!(advance.x, 500.0);
    }

    #[test]
    fn test_bad_glyph_keeps_earlier_outlines() {
        let font = TestFont::latin();
        let glyphs = [
            PositionedGlyph {
                glyph_id: font.glyph_index('A').unwrap(),
                x_advance: 600,
                ..PositionedGlyph::default()
            },
            PositionedGlyph {
                glyph_id: 9999,
                x_advance: 600,
                ..PositionedGlyph::default()
            },
        ];
        let mut path = BezPath::new();
        let err = append_run(&mut path, &font, &glyphs, 1000.0, Point::ZERO).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidGlyphReference(9999)));
        assert_eq!(path.elements().len(), 5);
    }

    #[test]
    fn test_cff_fonts_emit_nothing() {
        let font = TestFont::latin().cff();
        let mut path = BezPath::new();
        let err = append_text(&mut path, &font, &CmapShaper::new(&font), "A", 12.0, Point::ZERO)
            .unwrap_err();
        assert!(matches!(err, OutlineError::UnsupportedOutlineFormat(_)));
        assert!(path.elements().is_empty());
    }
}
