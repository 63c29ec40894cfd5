//! A loaded font plus its typographic configuration

use std::fmt;

use kurbo::Rect;
use tracing::{debug, warn};

use super::style::FontStyle;
use crate::font_source::{FontMetrics, FontSource};
use crate::typography::{substitute_script, QuoteState, TypographicOptions, TypographyConfig};

/// Immutable font: the glyph source, its name and native style, and the
/// substitution rules filtered against its coverage
pub struct Font {
    name: String,
    style: FontStyle,
    source: Box<dyn FontSource>,
    typography: TypographyConfig,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("style", &self.style)
            .field("units_per_em", &self.source.units_per_em())
            .field("typography", &self.typography)
            .finish()
    }
}

pub struct FontBuilder {
    name: String,
    style: FontStyle,
    source: Box<dyn FontSource>,
    options: TypographicOptions,
}

impl FontBuilder {
    pub fn new(name: impl Into<String>, source: impl FontSource + 'static) -> Self {
        Self {
            name: name.into(),
            style: FontStyle::REGULAR,
            source: Box::new(source),
            options: TypographicOptions::default(),
        }
    }

    /// The style the font's outlines were drawn in
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn options(mut self, options: TypographicOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Font {
        let typography = TypographyConfig::for_font(self.source.as_ref(), self.options);
        debug!("Built font '{}' ({})", self.name, self.style);
        Font {
            name: self.name,
            style: self.style,
            source: self.source,
            typography,
        }
    }
}

impl Font {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn source(&self) -> &dyn FontSource {
        self.source.as_ref()
    }

    pub fn typography(&self) -> &TypographyConfig {
        &self.typography
    }

    pub fn units_per_em(&self) -> u16 {
        self.source.units_per_em()
    }

    fn scale(&self, ppem: f64) -> f64 {
        ppem / f64::from(self.units_per_em().max(1))
    }

    /// Glyph for `ch`, `.notdef` when the font doesn't map it
    pub fn glyph_or_notdef(&self, ch: char) -> u32 {
        self.source.glyph_index(ch).unwrap_or(0)
    }

    /// Advance of a glyph at `ppem`, zero when it can't be read
    pub fn advance(&self, glyph_id: u32, ppem: f64) -> f64 {
        match self.source.advance_width(glyph_id) {
            Ok(advance) => f64::from(advance) * self.scale(ppem),
            Err(err) => {
                warn!("No advance for glyph {}: {}", glyph_id, err);
                0.0
            }
        }
    }

    /// Pair adjustment between two glyphs at `ppem`, zero when unavailable
    pub fn glyph_kerning(&self, left: u32, right: u32, ppem: f64) -> f64 {
        match self.source.kerning(left, right) {
            Ok(kern) => f64::from(kern) * self.scale(ppem),
            Err(err) => {
                warn!("No kerning for glyphs {}/{}: {}", left, right, err);
                0.0
            }
        }
    }

    /// Horizontal adjustment for a character pair; positive moves them apart
    pub fn kerning(&self, left: char, right: char, ppem: f64) -> f64 {
        match (self.source.glyph_index(left), self.source.glyph_index(right)) {
            (Some(l), Some(r)) => self.glyph_kerning(l, r, ppem),
            _ => 0.0,
        }
    }

    /// Union of all glyph bounds at `ppem`
    pub fn bounds(&self, ppem: f64) -> Rect {
        match self.source.bounds() {
            Ok(rect) => rect.scale_from_origin(self.scale(ppem)),
            Err(err) => {
                warn!("Font '{}' has no bounds: {}", self.name, err);
                Rect::ZERO
            }
        }
    }

    /// Counter-clockwise degrees from vertical; negative leans right
    pub fn italic_angle(&self) -> f64 {
        self.source.italic_angle()
    }

    pub fn metrics(&self, ppem: f64) -> FontMetrics {
        match self.source.metrics() {
            Ok(metrics) => metrics.scaled(self.scale(ppem)),
            Err(err) => {
                warn!("Font '{}' has no metrics: {}", self.name, err);
                FontMetrics::default()
            }
        }
    }

    /// Advance of every glyph, in glyph id order, at `ppem`
    pub fn widths(&self, ppem: f64) -> Vec<f64> {
        (0..self.source.glyph_count())
            .filter_map(|glyph_id| self.source.advance_width(glyph_id).ok())
            .map(|advance| f64::from(advance) * self.scale(ppem))
            .collect()
    }

    /// Glyph id for each character of `s`, 0 where unmapped
    pub fn indices_of(&self, s: &str) -> Vec<u32> {
        s.chars().map(|ch| self.glyph_or_notdef(ch)).collect()
    }

    /// Ligatures, then typographic punctuation if enabled
    pub fn substitute(&self, text: &str, state: &mut QuoteState) -> String {
        self.typography.apply(text, state)
    }

    pub fn superscript(&self, text: &str) -> String {
        substitute_script(text, self.typography.superscripts())
    }

    pub fn subscript(&self, text: &str) -> String {
        substitute_script(text, self.typography.subscripts())
    }
}
