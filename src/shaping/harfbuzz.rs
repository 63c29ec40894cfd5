//! Shaping through harfrust

use harfrust::{FontRef, ShaperData, ShaperInstance, UnicodeBuffer};
use tracing::debug;

use super::{PositionedGlyph, Script, Shaper, TextDirection};
use crate::error::{OutlineError, Result};
use crate::font_source::SfntFont;

/// Full OpenType shaping over owned font bytes
#[derive(Clone)]
pub struct HarfrustShaper {
    data: Vec<u8>,
    index: u32,
}

impl std::fmt::Debug for HarfrustShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarfrustShaper")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl HarfrustShaper {
    /// Fails with [`OutlineError::Shaping`] when harfrust can't read the font
    pub fn new(data: Vec<u8>, index: u32) -> Result<Self> {
        FontRef::from_index(&data, index)
            .map_err(|e| OutlineError::Shaping(format!("Failed to create harfrust FontRef: {e:?}")))?;
        Ok(Self { data, index })
    }

    pub fn for_font(font: &SfntFont) -> Result<Self> {
        Self::new(font.data().to_vec(), font.index())
    }
}

impl Shaper for HarfrustShaper {
    fn shape(
        &self,
        text: &str,
        size: f64,
        direction: TextDirection,
        script: Script,
    ) -> Result<Vec<PositionedGlyph>> {
        let font_ref = FontRef::from_index(&self.data, self.index)
            .map_err(|e| OutlineError::Shaping(format!("Failed to create harfrust FontRef: {e:?}")))?;

        let shaper_data = ShaperData::new(&font_ref);
        let shaper_instance = ShaperInstance::from_variations(&font_ref, &[] as &[harfrust::Variation]);
        let shaper = shaper_data
            .shaper(&font_ref)
            .instance(Some(&shaper_instance))
            .build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(direction.into());
        if let Some(script) = script.to_harfrust() {
            buffer.set_script(script);
        }
        buffer.guess_segment_properties();

        let glyph_buffer = shaper.shape(buffer, &[]);
        let glyphs: Vec<PositionedGlyph> = glyph_buffer
            .glyph_infos()
            .iter()
            .zip(glyph_buffer.glyph_positions())
            .map(|(info, pos)| PositionedGlyph {
                glyph_id: info.glyph_id,
                x_advance: pos.x_advance,
                y_advance: pos.y_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                cluster: info.cluster,
            })
            .collect();

        debug!(
            "HarfBuzz shaped {} characters into {} glyphs at size {}",
            text.chars().count(),
            glyphs.len(),
            size
        );
        Ok(glyphs)
    }
}
