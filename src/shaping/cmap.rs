//! One glyph per character, with pair kerning
//!
//! No substitutions or mark positioning happen here. Characters the font
//! doesn't map become `.notdef` (glyph 0). Right-to-left runs are reversed
//! before kerning, so pairs are looked up in visual order.

use tracing::debug;

use super::{PositionedGlyph, Script, Shaper, TextDirection};
use crate::error::{OutlineError, Result};
use crate::font_source::FontSource;

#[derive(Clone, Copy)]
pub struct CmapShaper<'a> {
    font: &'a dyn FontSource,
}

impl<'a> CmapShaper<'a> {
    pub fn new(font: &'a dyn FontSource) -> Self {
        Self { font }
    }
}

impl Shaper for CmapShaper<'_> {
    fn shape(
        &self,
        text: &str,
        _size: f64,
        direction: TextDirection,
        _script: Script,
    ) -> Result<Vec<PositionedGlyph>> {
        if !direction.is_horizontal() {
            return Err(OutlineError::Shaping(format!(
                "{direction:?} layout needs vertical metrics"
            )));
        }

        let mut glyphs: Vec<PositionedGlyph> = Vec::with_capacity(text.len());
        for (offset, ch) in text.char_indices() {
            let glyph_id = self.font.glyph_index(ch).unwrap_or(0);
            glyphs.push(PositionedGlyph {
                glyph_id,
                x_advance: i32::from(self.font.advance_width(glyph_id)?),
                cluster: offset as u32,
                ..PositionedGlyph::default()
            });
        }

        if direction == TextDirection::RightToLeft {
            glyphs.reverse();
        }

        // Pairs kern in visual order, onto the left glyph's advance
        for i in 1..glyphs.len() {
            let (left, right) = (glyphs[i - 1].glyph_id, glyphs[i].glyph_id);
            glyphs[i - 1].x_advance += i32::from(self.font.kerning(left, right)?);
        }

        debug!("Mapped {} characters to glyphs", glyphs.len());
        Ok(glyphs)
    }
}
