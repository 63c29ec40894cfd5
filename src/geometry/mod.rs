//! Path sink helpers
//!
//! Thin wrappers over `kurbo` for the operations text outlines and
//! decorations need: moving and shearing finished outlines, turning centre
//! lines into filled strokes, dashing, dots and the faux-bold offset.

pub mod embolden;

use kurbo::{Affine, BezPath, Cap, Circle, Join, Point, Shape, Stroke, StrokeOpts, Vec2};

pub use embolden::embolden;

/// Accuracy used whenever kurbo approximates curves, in output units
pub const TOLERANCE: f64 = 1e-3;

pub fn translate(path: &mut BezPath, offset: Vec2) {
    if offset != Vec2::ZERO {
        path.apply_affine(Affine::translate(offset));
    }
}

/// Horizontal shear `x' = x + factor * y`, used for faux italics
pub fn shear(path: &mut BezPath, factor: f64) {
    if factor != 0.0 {
        path.apply_affine(Affine::skew(factor, 0.0));
    }
}

/// Append every element of `other` to `path`
pub fn append(path: &mut BezPath, other: &BezPath) {
    path.extend(other.iter());
}

/// [`TOLERANCE`], coarsened to what `path`'s coordinates can resolve
fn stroke_tolerance(path: &BezPath) -> f64 {
    let bounds = path.bounding_box();
    let magnitude = [bounds.x0, bounds.y0, bounds.x1, bounds.y1]
        .into_iter()
        .map(f64::abs)
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    TOLERANCE.max(magnitude * 1e-12)
}

/// Filled outline of `path` stroked with the given pen
pub fn stroke(path: &BezPath, width: f64, cap: Cap, join: Join) -> BezPath {
    let style = Stroke::new(width).with_caps(cap).with_join(join);
    kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), stroke_tolerance(path))
}

/// Like [`stroke`], but only every other `length` along the path is drawn
pub fn dash(path: &BezPath, length: f64, width: f64, cap: Cap, join: Join) -> BezPath {
    if length <= 0.0 {
        return stroke(path, width, cap, join);
    }
    let style = Stroke::new(width)
        .with_caps(cap)
        .with_join(join)
        .with_dashes(0.0, [length, length]);
    kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), stroke_tolerance(path))
}

pub fn circle(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(TOLERANCE)
}

/// Number of sub-paths, i.e. `MoveTo` elements
pub fn subpath_count(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count()
}
