//! Faux bold by offsetting outline vertices
//!
//! Every point of the path, control points included, moves along the
//! bisector of its two adjacent edge normals so that each straight edge ends
//! up `distance` further out. Which side is "out" comes from the sign of the
//! whole outline's area, so counters (holes) shrink while strokes thicken.
//! Negative distances thin the outline instead.

use kurbo::{BezPath, PathEl, Point, Vec2};

/// Longest shift, in multiples of `distance`, allowed at a sharp corner
const MITER_LIMIT: f64 = 4.0;

/// Points closer than this count as the same vertex
const EPSILON: f64 = 1e-9;

struct Subpath {
    elements: Vec<PathEl>,
    closed: bool,
}

impl Subpath {
    /// Control polygon: every point of every element, in order
    fn points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(p),
                PathEl::QuadTo(c, p) => points.extend([c, p]),
                PathEl::CurveTo(c1, c2, p) => points.extend([c1, c2, p]),
                PathEl::ClosePath => {}
            }
        }
        points
    }
}

fn split_subpaths(path: &BezPath) -> Vec<Subpath> {
    let mut subpaths: Vec<Subpath> = Vec::new();
    for &el in path.elements() {
        let start_new = match subpaths.last() {
            None => true,
            Some(last) => last.closed || matches!(el, PathEl::MoveTo(_)),
        };
        if start_new {
            subpaths.push(Subpath {
                elements: Vec::new(),
                closed: false,
            });
        }
        if let Some(current) = subpaths.last_mut() {
            current.closed = matches!(el, PathEl::ClosePath);
            current.elements.push(el);
        }
    }
    subpaths
}

/// Shoelace area over the closed control polygons, positive when the outer
/// contours run counter-clockwise in a y-up frame
fn signed_area(subpaths: &[Subpath]) -> f64 {
    subpaths
        .iter()
        .filter(|sub| sub.closed)
        .map(|sub| {
            let points = sub.points();
            let n = points.len();
            (0..n)
                .map(|i| {
                    let (a, b) = (points[i], points[(i + 1) % n]);
                    a.x * b.y - b.x * a.y
                })
                .sum::<f64>()
                * 0.5
        })
        .sum()
}

/// Nearest point distinct from `points[index]`, walking forwards or back
fn neighbour(points: &[Point], index: usize, forward: bool, closed: bool) -> Option<Point> {
    let n = points.len();
    let here = points[index];
    (1..n)
        .map_while(|step| match (forward, closed) {
            (true, true) => Some((index + step) % n),
            (false, true) => Some((index + n - step) % n),
            (true, false) => Some(index + step).filter(|&j| j < n),
            (false, false) => index.checked_sub(step),
        })
        .map(|j| points[j])
        .find(|p| (*p - here).hypot() > EPSILON)
}

/// Right-hand normal of the edge from `a` to `b`
fn right_normal(a: Point, b: Point) -> Vec2 {
    let dir = (b - a).normalize();
    Vec2::new(dir.y, -dir.x)
}

fn vertex_shift(normal_in: Option<Vec2>, normal_out: Option<Vec2>, distance: f64) -> Vec2 {
    match (normal_in, normal_out) {
        (Some(n_in), Some(n_out)) => {
            let denom = 1.0 + n_in.dot(n_out);
            if denom < EPSILON {
                // Edge doubles back on itself
                return n_in * distance;
            }
            let shift = (n_in + n_out) * (distance / denom);
            let limit = MITER_LIMIT * distance.abs();
            if shift.hypot() > limit {
                shift.normalize() * limit
            } else {
                shift
            }
        }
        (Some(n), None) | (None, Some(n)) => n * distance,
        (None, None) => Vec2::ZERO,
    }
}

fn offset_points(points: &[Point], closed: bool, distance: f64) -> Vec<Point> {
    (0..points.len())
        .map(|i| {
            let here = points[i];
            let normal_in = neighbour(points, i, false, closed).map(|prev| right_normal(prev, here));
            let normal_out = neighbour(points, i, true, closed).map(|next| right_normal(here, next));
            here + vertex_shift(normal_in, normal_out, distance)
        })
        .collect()
}

/// Offset every contour of `path` outward by `distance`
///
/// The element structure is preserved: lines stay lines and curves keep
/// their degree.
pub fn embolden(path: &BezPath, distance: f64) -> BezPath {
    if distance == 0.0 {
        return path.clone();
    }

    let subpaths = split_subpaths(path);
    let outward = if signed_area(&subpaths) < 0.0 { -1.0 } else { 1.0 };

    let mut out = BezPath::new();
    for sub in &subpaths {
        let shifted = offset_points(&sub.points(), sub.closed, distance * outward);
        let mut next = shifted.into_iter();
        let mut take = || next.next().unwrap_or(Point::ZERO);
        for el in &sub.elements {
            match el {
                PathEl::MoveTo(_) => out.move_to(take()),
                PathEl::LineTo(_) => out.line_to(take()),
                PathEl::QuadTo(..) => {
                    let c = take();
                    out.quad_to(c, take());
                }
                PathEl::CurveTo(..) => {
                    let (c1, c2) = (take(), take());
                    out.curve_to(c1, c2, take());
                }
                PathEl::ClosePath => out.close_path(),
            }
        }
    }
    out
}
