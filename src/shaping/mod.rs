//! Text shaping
//!
//! A [`Shaper`] turns a string into an ordered run of positioned glyphs in
//! font units. Two implementations ship: [`HarfrustShaper`] runs the full
//! OpenType shaping engine over the font bytes, [`CmapShaper`] maps one
//! character to one glyph and applies pair kerning only.

pub mod cmap;
pub mod harfbuzz;

pub use cmap::CmapShaper;
pub use harfbuzz::HarfrustShaper;

use crate::error::Result;

/// One glyph of a shaped run, all values in font units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionedGlyph {
    pub glyph_id: u32,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Byte offset of the source character in the shaped text
    pub cluster: u32,
}

/// Text direction for shaping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl TextDirection {
    pub fn is_horizontal(self) -> bool {
        matches!(self, TextDirection::LeftToRight | TextDirection::RightToLeft)
    }
}

impl From<TextDirection> for harfrust::Direction {
    fn from(direction: TextDirection) -> Self {
        match direction {
            TextDirection::LeftToRight => harfrust::Direction::LeftToRight,
            TextDirection::RightToLeft => harfrust::Direction::RightToLeft,
            TextDirection::TopToBottom => harfrust::Direction::TopToBottom,
            TextDirection::BottomToTop => harfrust::Direction::BottomToTop,
        }
    }
}

/// Script hint passed to the shaper
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Script {
    #[default]
    Latin,
    Greek,
    Cyrillic,
    Arabic,
    Hebrew,
    /// Let the shaper guess from the text
    Unknown,
}

impl Script {
    pub(crate) fn to_harfrust(self) -> Option<harfrust::Script> {
        use harfrust::script;

        match self {
            Script::Latin => Some(script::LATIN),
            Script::Greek => Some(script::GREEK),
            Script::Cyrillic => Some(script::CYRILLIC),
            Script::Arabic => Some(script::ARABIC),
            Script::Hebrew => Some(script::HEBREW),
            Script::Unknown => None,
        }
    }
}

pub trait Shaper {
    /// Shape `text` at `size` into glyphs in visual order
    fn shape(
        &self,
        text: &str,
        size: f64,
        direction: TextDirection,
        script: Script,
    ) -> Result<Vec<PositionedGlyph>>;
}
