//! Text decorations: lines, dots and waves under, over or through a run
//!
//! Every decoration is returned as a filled outline spanning `width`
//! from the run's origin. Thickness and offsets follow the face size, the
//! dot, dash and wave periods are fixed lengths in output units.

use std::str::FromStr;

use kurbo::{BezPath, Cap, Join, Point};
use serde::{Deserialize, Serialize};

use super::Face;
use crate::geometry;

/// Distance of the underline below the baseline, relative to the size
pub const UNDERLINE_DISTANCE: f64 = 0.15;
/// Line thickness relative to the size
pub const UNDERLINE_THICKNESS: f64 = 0.075;

/// Anything that can draw itself along a run of text
pub trait Decorator {
    fn decorate(&self, face: &Face, width: f64) -> BezPath;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    Underline,
    Overline,
    Strikethrough,
    DoubleUnderline,
    DottedUnderline,
    DashedUnderline,
    SineUnderline,
    SawtoothUnderline,
}

impl Decoration {
    pub const ALL: [Decoration; 8] = [
        Decoration::Underline,
        Decoration::Overline,
        Decoration::Strikethrough,
        Decoration::DoubleUnderline,
        Decoration::DottedUnderline,
        Decoration::DashedUnderline,
        Decoration::SineUnderline,
        Decoration::SawtoothUnderline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Decoration::Underline => "underline",
            Decoration::Overline => "overline",
            Decoration::Strikethrough => "strikethrough",
            Decoration::DoubleUnderline => "double",
            Decoration::DottedUnderline => "dotted",
            Decoration::DashedUnderline => "dashed",
            Decoration::SineUnderline => "sine",
            Decoration::SawtoothUnderline => "sawtooth",
        }
    }
}

impl FromStr for Decoration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.trim_end_matches("-underline").trim_end_matches("_underline");
        Decoration::ALL
            .into_iter()
            .find(|deco| deco.name() == wanted)
            .ok_or_else(|| format!("unknown decoration '{s}'"))
    }
}

impl Decorator for Decoration {
    fn decorate(&self, face: &Face, width: f64) -> BezPath {
        if width <= 0.0 {
            return BezPath::new();
        }
        match self {
            Decoration::Underline => underline(face, width),
            Decoration::Overline => overline(face, width),
            Decoration::Strikethrough => strikethrough(face, width),
            Decoration::DoubleUnderline => double_underline(face, width),
            Decoration::DottedUnderline => dotted_underline(face, width),
            Decoration::DashedUnderline => dashed_underline(face, width),
            Decoration::SineUnderline => sine_underline(face, width),
            Decoration::SawtoothUnderline => sawtooth_underline(face, width),
        }
    }
}

fn line(path: &mut BezPath, x0: f64, x1: f64, y: f64) {
    path.move_to((x0, y));
    path.line_to((x1, y));
}

/// Most dots, dashes or wave segments drawn under one run
const MAX_REPEATS: f64 = 10_000.0;

/// Whole repeats of a period fitting in `span`, clamped to [`MAX_REPEATS`]
fn repeats(span: f64) -> usize {
    if span.is_finite() && span > 0.0 {
        span.trunc().min(MAX_REPEATS) as usize
    } else {
        0
    }
}

fn thickness(face: &Face) -> f64 {
    face.size() * UNDERLINE_THICKNESS
}

fn baseline_offset(face: &Face) -> f64 {
    -face.size() * UNDERLINE_DISTANCE
}

/// Horizontal line at height `y`, slanted along with faux italics
fn sheared_line(face: &Face, width: f64, y: f64) -> BezPath {
    let dx = face.faux_italic() * y;
    let mut path = BezPath::new();
    line(&mut path, dx, width + dx, y);
    geometry::stroke(&path, thickness(face), Cap::Butt, Join::Bevel)
}

fn underline(face: &Face, width: f64) -> BezPath {
    let mut path = BezPath::new();
    line(&mut path, 0.0, width, baseline_offset(face));
    geometry::stroke(&path, thickness(face), Cap::Butt, Join::Bevel)
}

fn overline(face: &Face, width: f64) -> BezPath {
    let y = face.metrics().x_height + face.size() * UNDERLINE_DISTANCE;
    sheared_line(face, width, y)
}

fn strikethrough(face: &Face, width: f64) -> BezPath {
    sheared_line(face, width, face.metrics().x_height / 2.0)
}

fn double_underline(face: &Face, width: f64) -> BezPath {
    let r = thickness(face);
    let y = baseline_offset(face) * 0.75;
    let mut path = BezPath::new();
    line(&mut path, 0.0, width, y);
    line(&mut path, 0.0, width, y - r * 2.0);
    geometry::stroke(&path, r, Cap::Butt, Join::Bevel)
}

fn dotted_underline(face: &Face, width: f64) -> BezPath {
    let r = thickness(face) * 0.8;
    let w = width - r;
    let y = baseline_offset(face);

    let steps = (w - r) / (15.0 * UNDERLINE_THICKNESS);
    let mut path = BezPath::new();
    if steps.is_nan() || steps <= -1.0 {
        return path;
    }
    let count = repeats(steps) + 1;
    let step = if count > 1 {
        (w - r) / (count - 1) as f64
    } else {
        0.0
    };
    for i in 0..count {
        geometry::append(&mut path, &geometry::circle(Point::new(r + i as f64 * step, y), r));
    }
    path
}

fn dashed_underline(face: &Face, width: f64) -> BezPath {
    let r = thickness(face);
    let y = baseline_offset(face);
    let count = repeats(width / (2.0 * 12.0 * UNDERLINE_THICKNESS)) as f64;

    let mut path = BezPath::new();
    line(&mut path, 0.0, width, y);
    if count < 1.0 {
        // Too short for a gap
        return geometry::stroke(&path, r, Cap::Butt, Join::Bevel);
    }
    let dash = width / (2.0 * count - 1.0);
    geometry::dash(&path, dash, r, Cap::Butt, Join::Bevel)
}

fn sine_underline(face: &Face, width: f64) -> BezPath {
    let r = thickness(face);
    let w = width - r;
    let dh = -face.size() * 0.15;
    let y = baseline_offset(face);

    let count = repeats(0.5 + w / (12.0 * UNDERLINE_THICKNESS));
    if count == 0 {
        return BezPath::new();
    }
    let d = (w - r) / count as f64;

    let mut dx = r;
    let mut path = BezPath::new();
    path.move_to((dx, y));
    for i in 0..count {
        // Cubic approximation of half a sine period
        if i % 2 == 0 {
            path.curve_to((dx + d * 0.3642, y), (dx + d * 0.6358, y + dh), (dx + d, y + dh));
        } else {
            path.curve_to((dx + d * 0.3642, y + dh), (dx + d * 0.6358, y), (dx + d, y));
        }
        dx += d;
    }
    geometry::stroke(&path, r, Cap::Round, Join::Round)
}

fn sawtooth_underline(face: &Face, width: f64) -> BezPath {
    let r = thickness(face);
    let mut dx = 0.707 * r;
    let w = width - 2.0 * dx;
    let dh = -face.size() * 0.15;
    let y = baseline_offset(face);

    let count = repeats(0.5 + w / (8.0 * UNDERLINE_THICKNESS));
    if count == 0 {
        return BezPath::new();
    }
    let d = w / count as f64;

    let mut path = BezPath::new();
    path.move_to((dx, y));
    for i in 0..count {
        let to = if i % 2 == 0 { y + dh } else { y };
        path.line_to((dx + d, to));
        dx += d;
    }
    geometry::stroke(&path, r, Cap::Butt, Join::Miter)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::face::font::FontBuilder;
    use crate::face::style::{FontStyle, FontVariant, FontWeight};
    use crate::font_source::test_font::TestFont;
    use crate::geometry::subpath_count;
    use kurbo::{Rect, Shape};

    /// Size 10 with the test font's x-height of 500/1000
    fn face(italic: bool) -> Face {
        let font = Arc::new(FontBuilder::new("Test Sans", TestFont::latin()).build());
        Face::new(
            font,
            10.0,
            FontStyle::new(FontWeight::Regular, italic),
            FontVariant::Normal,
        )
    }

    fn assert_near(actual: f64, expected: f64, eps: f64) {
        assert!((actual - expected).abs() < eps, "{actual} != {expected}");
    }

    fn assert_rect_near(actual: Rect, expected: Rect) {
        assert_near(actual.x0, expected.x0, 1e-9);
        assert_near(actual.y0, expected.y0, 1e-9);
        assert_near(actual.x1, expected.x1, 1e-9);
        assert_near(actual.y1, expected.y1, 1e-9);
    }

    #[test]
    fn test_underline_sits_below_the_baseline() {
        let path = Decoration::Underline.decorate(&face(false), 20.0);
        // y = -1.5, thickness 0.75
        assert_rect_near(path.bounding_box(), Rect::new(0.0, -1.875, 20.0, -1.125));
    }

    #[test]
    fn test_overline_and_strikethrough_follow_x_height() {
        let over = Decoration::Overline.decorate(&face(false), 20.0).bounding_box();
        assert_near(over.center().y, 6.5, 1e-9);
        let strike = Decoration::Strikethrough.decorate(&face(false), 20.0).bounding_box();
        assert_near(strike.center().y, 2.5, 1e-9);
    }

    #[test]
    fn test_overline_is_sheared_with_faux_italic() {
        let over = Decoration::Overline.decorate(&face(true), 20.0).bounding_box();
        assert_near(over.x0, 0.3 * 6.5, 1e-9);
        assert_near(over.x1, 20.0 + 0.3 * 6.5, 1e-9);
        // The underline stays put
        let under = Decoration::Underline.decorate(&face(true), 20.0).bounding_box();
        assert_near(under.x0, 0.0, 1e-9);
    }

    #[test]
    fn test_double_underline_has_two_lines() {
        let path = Decoration::DoubleUnderline.decorate(&face(false), 20.0);
        assert_eq!(subpath_count(&path), 2);
        // Lines at -1.125 and -2.625
        assert_rect_near(path.bounding_box(), Rect::new(0.0, -3.0, 20.0, -0.75));
    }

    #[test]
    fn test_dots_span_the_width() {
        let path = Decoration::DottedUnderline.decorate(&face(false), 20.0);
        // r = 0.6, spacing target 1.125 over 18.8 units
        assert_eq!(subpath_count(&path), 17);
        let bounds = path.bounding_box();
        assert_near(bounds.x0, 0.0, 1e-2);
        assert_near(bounds.x1, 20.0, 1e-2);
    }

    #[test]
    fn test_dashes_start_and_end_on_a_dash() {
        // 13 units at a 0.9 target period makes 7 dashes of exactly 1
        let path = Decoration::DashedUnderline.decorate(&face(false), 13.0);
        assert_eq!(subpath_count(&path), 7);
        assert_rect_near(path.bounding_box(), Rect::new(0.0, -1.875, 13.0, -1.125));
    }

    #[test]
    fn test_sine_wave_amplitude() {
        let bounds = Decoration::SineUnderline.decorate(&face(false), 20.0).bounding_box();
        // Between y = -1.5 and y = -3.0, plus half the thickness
        assert_near(bounds.y0, -3.375, 1e-2);
        assert_near(bounds.y1, -1.125, 1e-2);
    }

    #[test]
    fn test_sawtooth_stays_within_the_width() {
        let path = Decoration::SawtoothUnderline.decorate(&face(false), 20.0);
        assert!(!path.elements().is_empty());
        let bounds = path.bounding_box();
        assert!(bounds.x0 > 0.0 && bounds.x1 < 20.0, "{bounds:?}");
    }

    #[test]
    fn test_short_and_empty_widths_stay_finite() {
        let face = face(false);
        for deco in Decoration::ALL {
            assert!(deco.decorate(&face, 0.0).elements().is_empty(), "{deco:?}");
            for width in [0.1, 0.5, 1.0, 3.0] {
                let bounds = deco.decorate(&face, width).bounding_box();
                assert!(
                    bounds.x0.is_finite() && bounds.x1.is_finite(),
                    "{deco:?} at {width}: {bounds:?}"
                );
            }
        }
    }

    #[test]
    fn test_repeats_are_clamped() {
        assert_eq!(repeats(16.7), 16);
        assert_eq!(repeats(-0.5), 0);
        assert_eq!(repeats(f64::NAN), 0);
        assert_eq!(repeats(f64::INFINITY), 0);
        assert_eq!(repeats(1e300), MAX_REPEATS as usize);
    }

    #[test]
    fn test_huge_widths_are_bounded() {
        let face = face(false);
        let dots = Decoration::DottedUnderline.decorate(&face, 1e20);
        assert_eq!(subpath_count(&dots), MAX_REPEATS as usize + 1);
        let dashes = Decoration::DashedUnderline.decorate(&face, 1e20);
        assert!(subpath_count(&dashes) <= MAX_REPEATS as usize + 1);

        for deco in Decoration::ALL {
            let bounds = deco.decorate(&face, 1e20).bounding_box();
            assert!(
                bounds.x0.is_finite() && bounds.x1.is_finite() && bounds.x1 > 1e19,
                "{deco:?}: {bounds:?}"
            );
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sine".parse::<Decoration>(), Ok(Decoration::SineUnderline));
        assert_eq!("Dotted-Underline".parse::<Decoration>(), Ok(Decoration::DottedUnderline));
        assert_eq!("underline".parse::<Decoration>(), Ok(Decoration::Underline));
        assert!("wavy".parse::<Decoration>().is_err());
    }
}
