//! TrueType contour decoding
//!
//! Turns the compact `glyf` point encoding (on-curve anchors, off-curve
//! quadratic controls, implied midpoints between consecutive controls) into
//! closed `kurbo` sub-paths made of line and quadratic segments.
//!
//! Decoding appends to a caller-owned [`BezPath`]. When a contour turns out
//! to be malformed, the contours decoded before it stay in the path and the
//! error is returned; nothing of the bad contour is emitted.

use kurbo::{BezPath, Point};
use tracing::debug;

use crate::error::{OutlineError, Result};
use crate::font_source::{CurvePoint, FontSource, GlyphContours, OutlineFormat};

/// Maps font units into output space: `origin + point * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub origin: Point,
}

impl Placement {
    pub fn new(scale: f64, origin: Point) -> Self {
        Self { scale, origin }
    }

    /// `size / units_per_em` scaling at `origin`
    pub fn for_size(size: f64, units_per_em: u16, origin: Point) -> Self {
        Self::new(size / f64::from(units_per_em.max(1)), origin)
    }

    fn apply(&self, point: CurvePoint) -> Point {
        Point::new(
            self.origin.x + point.x * self.scale,
            self.origin.y + point.y * self.scale,
        )
    }
}

/// The control point carried between iterations of the contour scan
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Empty,
    Control(CurvePoint),
}

/// Emits path elements in output space
struct ContourWriter<'a> {
    path: &'a mut BezPath,
    placement: Placement,
}

impl ContourWriter<'_> {
    fn move_to(&mut self, p: CurvePoint) {
        self.path.move_to(self.placement.apply(p));
    }

    fn line_to(&mut self, p: CurvePoint) {
        self.path.line_to(self.placement.apply(p));
    }

    fn quad_to(&mut self, control: CurvePoint, end: CurvePoint) {
        self.path
            .quad_to(self.placement.apply(control), self.placement.apply(end));
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Decode one contour and append it to `path` as a closed sub-path
///
/// Fails with [`OutlineError::MalformedContour`] for an empty point list,
/// leaving `path` untouched.
pub fn append_contour(
    path: &mut BezPath,
    points: &[CurvePoint],
    placement: Placement,
) -> Result<()> {
    let Some((&first, rest)) = points.split_first() else {
        return Err(OutlineError::MalformedContour {
            glyph: 0,
            contour: 0,
            reason: "contour has no points",
        });
    };

    let mut out = ContourWriter { path, placement };

    // Pick the anchor. `deferred` holds a leading off-curve point that can
    // only be consumed when the contour wraps around.
    let (anchor, mut pending, deferred, remaining) = if first.on_curve {
        (first, Pending::Empty, None, rest)
    } else {
        match rest.split_first() {
            Some((&second, tail)) if !second.on_curve => {
                (first.midpoint(second), Pending::Control(second), Some(first), tail)
            }
            Some((&second, tail)) => (second, Pending::Empty, Some(first), tail),
            None => {
                // A lone control point has no outline to speak of
                out.move_to(first);
                out.close();
                return Ok(());
            }
        }
    };

    out.move_to(anchor);

    for &point in remaining {
        pending = match (pending, point.on_curve) {
            (Pending::Empty, true) => {
                out.line_to(point);
                Pending::Empty
            }
            (Pending::Empty, false) => Pending::Control(point),
            (Pending::Control(control), true) => {
                out.quad_to(control, point);
                Pending::Empty
            }
            (Pending::Control(control), false) => {
                out.quad_to(control, control.midpoint(point));
                Pending::Control(point)
            }
        };
    }

    match (pending, deferred) {
        (Pending::Control(control), Some(leading)) => {
            out.quad_to(control, control.midpoint(leading));
            out.quad_to(leading, anchor);
        }
        (Pending::Control(control), None) => out.quad_to(control, anchor),
        (Pending::Empty, Some(leading)) => out.quad_to(leading, anchor),
        (Pending::Empty, None) => {}
    }

    out.close();
    Ok(())
}

/// Decode every contour of a glyph into `path`
///
/// Contours are validated one at a time, so a bad contour stops decoding
/// with the earlier ones already appended.
pub fn append_contours(
    path: &mut BezPath,
    contours: &GlyphContours,
    placement: Placement,
) -> Result<()> {
    let mut start = 0usize;
    for (index, &end) in contours.end_points.iter().enumerate() {
        let malformed = |reason| OutlineError::MalformedContour {
            glyph: 0,
            contour: index,
            reason,
        };

        let count = end.checked_add(1).and_then(|next| next.checked_sub(start));
        let points = match count {
            None | Some(0) => return Err(malformed("contour has no points")),
            Some(_) if end >= contours.points.len() => {
                return Err(malformed("end point index past the point data"))
            }
            Some(_) => &contours.points[start..=end],
        };

        append_contour(path, points, placement).map_err(|err| match err {
            OutlineError::MalformedContour { reason, .. } => malformed(reason),
            other => other,
        })?;
        start = end + 1;
    }
    Ok(())
}

/// Load a glyph from `font` and append its outline to `path`
///
/// CFF fonts are rejected up front so nothing is appended for them.
pub fn append_glyph(
    path: &mut BezPath,
    font: &dyn FontSource,
    glyph_id: u32,
    placement: Placement,
) -> Result<()> {
    let format = font.outline_format();
    if format != OutlineFormat::TrueType {
        return Err(OutlineError::UnsupportedOutlineFormat(format));
    }

    let contours = font.glyph_contours(glyph_id)?;
    debug!(
        "Decoding glyph {} ({} contours, {} points)",
        glyph_id,
        contours.contour_count(),
        contours.points.len()
    );
    append_contours(path, &contours, placement).map_err(|err| err.for_glyph(glyph_id))
}

/// Outline of a single glyph at `size`, placed at `origin`
pub fn glyph_path(
    font: &dyn FontSource,
    glyph_id: u32,
    size: f64,
    origin: Point,
) -> Result<BezPath> {
    let mut path = BezPath::new();
    let placement = Placement::for_size(size, font.units_per_em(), origin);
    append_glyph(&mut path, font, glyph_id, placement)?;
    Ok(path)
}
