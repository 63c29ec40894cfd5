//! `FontSource` over an SFNT binary, backed by `read-fonts`
//!
//! The font bytes are owned by the adapter and re-borrowed as a
//! [`FontRef`] per query; `FontRef` only reads the table directory, so this
//! is cheap. Kerning pairs from a format 0 `kern` table are collected once
//! at load time.

use std::collections::HashMap;

use kurbo::{Affine, Point, Rect};
use read_fonts::tables::glyf::{Anchor, Glyph};
use read_fonts::types::{GlyphId, Tag};
use read_fonts::{FontData, FontRef, ReadError, TableProvider};
use tracing::{debug, warn};

use super::{CurvePoint, FontMetrics, FontSource, GlyphContours, OutlineFormat};
use crate::error::{OutlineError, Result};

/// Components nested deeper than this are treated as a broken font
const MAX_COMPONENT_DEPTH: usize = 8;

const CFF: Tag = Tag::new(b"CFF ");
const CFF2: Tag = Tag::new(b"CFF2");
const KERN: Tag = Tag::new(b"kern");

/// A TrueType/OpenType font loaded from memory
pub struct SfntFont {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    glyph_count: u32,
    format: OutlineFormat,
    kern_pairs: HashMap<(u32, u32), i16>,
}

impl std::fmt::Debug for SfntFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SfntFont")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .field("glyph_count", &self.glyph_count)
            .field("format", &self.format)
            .field("kern_pairs", &self.kern_pairs.len())
            .finish()
    }
}

impl SfntFont {
    /// Parse the first font in `data`
    pub fn new(data: Vec<u8>) -> Result<Self> {
        Self::from_index(data, 0)
    }

    /// Parse font `index` of a collection (or 0 for a single font)
    pub fn from_index(data: Vec<u8>, index: u32) -> Result<Self> {
        let font = FontRef::from_index(&data, index).map_err(parse_error)?;

        let units_per_em = font.head().map_err(table_error("head"))?.units_per_em();
        let glyph_count = u32::from(font.maxp().map_err(table_error("maxp"))?.num_glyphs());
        let format = if font.table_data(CFF).is_some() || font.table_data(CFF2).is_some() {
            OutlineFormat::Cff
        } else {
            OutlineFormat::TrueType
        };
        let kern_pairs = font
            .table_data(KERN)
            .map(read_kern_pairs)
            .unwrap_or_default();

        debug!(
            "Loaded font: {} glyphs, {} units/em, {} outlines, {} kerning pairs",
            glyph_count,
            units_per_em,
            format,
            kern_pairs.len()
        );

        Ok(Self {
            data,
            index,
            units_per_em,
            glyph_count,
            format,
            kern_pairs,
        })
    }

    /// The raw font binary, e.g. for handing to a shaper
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    fn font(&self) -> Result<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).map_err(parse_error)
    }

    fn check_glyph(&self, glyph_id: u32) -> Result<GlyphId> {
        if glyph_id >= self.glyph_count {
            return Err(OutlineError::InvalidGlyphReference(glyph_id));
        }
        Ok(GlyphId::new(glyph_id))
    }

    /// Append the points of `glyph_id` to `out`, flattening components
    fn collect_glyph(
        &self,
        font: &FontRef<'_>,
        glyph_id: u32,
        transform: Affine,
        depth: usize,
        out: &mut GlyphContours,
    ) -> Result<()> {
        if depth > MAX_COMPONENT_DEPTH {
            return Err(OutlineError::Parse(format!(
                "component nesting deeper than {MAX_COMPONENT_DEPTH} in glyph {glyph_id}"
            )));
        }
        let gid = self.check_glyph(glyph_id)?;
        let loca = font.loca(None).map_err(table_error("loca"))?;
        let glyf = font.glyf().map_err(table_error("glyf"))?;

        match loca.get_glyf(gid, &glyf).map_err(parse_error)? {
            // Empty glyphs (space and friends) have no loca extent
            None => Ok(()),
            Some(Glyph::Simple(simple)) => {
                let base = out.points.len();
                out.points.extend(simple.points().map(|point| {
                    let p = transform * Point::new(f64::from(point.x), f64::from(point.y));
                    CurvePoint {
                        x: p.x,
                        y: p.y,
                        on_curve: point.on_curve,
                    }
                }));
                out.end_points.extend(
                    simple
                        .end_pts_of_contours()
                        .iter()
                        .map(|end| base + usize::from(end.get())),
                );
                Ok(())
            }
            Some(Glyph::Composite(composite)) => {
                let start = out.points.len();
                for component in composite.components() {
                    let t = component.transform;
                    let linear = Affine::new([
                        f64::from(t.xx.to_f32()),
                        f64::from(t.yx.to_f32()),
                        f64::from(t.xy.to_f32()),
                        f64::from(t.yy.to_f32()),
                        0.0,
                        0.0,
                    ]);
                    let child_id = component.glyph.to_u32();

                    let placement = match component.anchor {
                        Anchor::Offset { x, y } => {
                            transform * Affine::translate((f64::from(x), f64::from(y))) * linear
                        }
                        Anchor::Point { base, component } => {
                            // Align a point of the component with a point
                            // already placed by earlier components
                            let unaligned = transform * linear;
                            let mut child = GlyphContours::new();
                            self.collect_glyph(font, child_id, unaligned, depth + 1, &mut child)?;
                            let placed = out.points.get(start + usize::from(base));
                            let own = child.points.get(usize::from(component));
                            let delta = match (placed, own) {
                                (Some(placed), Some(own)) => {
                                    (placed.x - own.x, placed.y - own.y)
                                }
                                _ => {
                                    warn!(
                                        "Glyph {}: anchor points {}/{} out of range, ignoring",
                                        glyph_id, base, component
                                    );
                                    (0.0, 0.0)
                                }
                            };
                            Affine::translate(delta) * unaligned
                        }
                    };

                    self.collect_glyph(font, child_id, placement, depth + 1, out)?;
                }
                Ok(())
            }
        }
    }
}

impl FontSource for SfntFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn outline_format(&self) -> OutlineFormat {
        self.format
    }

    fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    fn glyph_index(&self, ch: char) -> Option<u32> {
        let font = self.font().ok()?;
        let cmap = font.cmap().ok()?;
        cmap.map_codepoint(ch)
            .map(|gid| gid.to_u32())
            .filter(|&gid| gid != 0)
    }

    fn glyph_contours(&self, glyph_id: u32) -> Result<GlyphContours> {
        if self.format == OutlineFormat::Cff {
            return Err(OutlineError::UnsupportedOutlineFormat(self.format));
        }
        let font = self.font()?;
        let mut contours = GlyphContours::new();
        self.collect_glyph(&font, glyph_id, Affine::IDENTITY, 0, &mut contours)?;
        Ok(contours)
    }

    fn advance_width(&self, glyph_id: u32) -> Result<u16> {
        self.check_glyph(glyph_id)?;
        let font = self.font()?;
        let hmtx = font.hmtx().map_err(table_error("hmtx"))?;
        let metrics = hmtx.h_metrics();
        // Glyphs past numberOfHMetrics repeat the last advance
        let index = (glyph_id as usize).min(metrics.len().saturating_sub(1));
        metrics
            .get(index)
            .map(|metric| metric.advance())
            .ok_or(OutlineError::MissingTable("hmtx"))
    }

    fn kerning(&self, left: u32, right: u32) -> Result<i16> {
        self.check_glyph(left)?;
        self.check_glyph(right)?;
        Ok(self.kern_pairs.get(&(left, right)).copied().unwrap_or(0))
    }

    fn metrics(&self) -> Result<FontMetrics> {
        let font = self.font()?;
        let hhea = font.hhea().map_err(table_error("hhea"))?;
        let (x_height, cap_height) = match font.os2() {
            Ok(os2) => (
                os2.sx_height().map(f64::from),
                os2.s_cap_height().map(f64::from),
            ),
            Err(_) => (None, None),
        };
        Ok(FontMetrics::from_tables(
            f64::from(self.units_per_em),
            f64::from(hhea.ascender().to_i16()),
            f64::from(hhea.descender().to_i16()),
            f64::from(hhea.line_gap().to_i16()),
            x_height,
            cap_height,
        ))
    }

    fn bounds(&self) -> Result<Rect> {
        let font = self.font()?;
        let head = font.head().map_err(table_error("head"))?;
        Ok(Rect::new(
            f64::from(head.x_min()),
            f64::from(head.y_min()),
            f64::from(head.x_max()),
            f64::from(head.y_max()),
        ))
    }

    fn italic_angle(&self) -> f64 {
        self.font()
            .ok()
            .and_then(|font| font.post().ok())
            .map(|post| post.italic_angle().to_f64())
            .unwrap_or(0.0)
    }
}

fn parse_error(err: ReadError) -> OutlineError {
    OutlineError::Parse(err.to_string())
}

fn table_error(name: &'static str) -> impl Fn(ReadError) -> OutlineError {
    move |err| match err {
        ReadError::TableIsMissing(_) => OutlineError::MissingTable(name),
        other => OutlineError::Parse(other.to_string()),
    }
}

/// Collect horizontal format 0 pairs from a Microsoft-style `kern` table
///
/// Apple `kern` (version 1.0) and the state-machine formats are ignored;
/// shaping through harfrust covers those fonts via GPOS.
fn read_kern_pairs(data: FontData<'_>) -> HashMap<(u32, u32), i16> {
    let mut pairs = HashMap::new();
    let read_u16 = |offset: usize| data.read_at::<u16>(offset).ok();

    let (Some(0), Some(table_count)) = (read_u16(0), read_u16(2)) else {
        return pairs;
    };

    let mut offset = 4;
    for _ in 0..table_count {
        let (Some(length), Some(coverage)) = (read_u16(offset + 2), read_u16(offset + 4)) else {
            break;
        };
        let format = coverage >> 8;
        let horizontal = coverage & 0x1 != 0;
        let cross_stream = coverage & 0x4 != 0;

        if format == 0 && horizontal && !cross_stream {
            let pair_count = read_u16(offset + 6).unwrap_or(0);
            let mut pair = offset + 14;
            for _ in 0..pair_count {
                let left = read_u16(pair);
                let right = read_u16(pair + 2);
                let value = data.read_at::<i16>(pair + 4).ok();
                match (left, right, value) {
                    (Some(l), Some(r), Some(v)) => {
                        pairs.insert((u32::from(l), u32::from(r)), v);
                    }
                    _ => break,
                }
                pair += 6;
            }
        }

        if length == 0 {
            break;
        }
        offset += usize::from(length);
    }
    pairs
}
