//! Line clipping against an axis-aligned window.
//!
//! Two classical algorithms with the same contract: given a segment and a
//! [`ClipWindow`], return the part of the segment inside the window, or
//! `None` when nothing of it is inside.
//!
//! - Cohen–Sutherland: outcode classification plus repeated intersection
//!   with one violated boundary at a time.
//! - Liang–Barsky: parametric `p0 + t·(p1 − p0)` with `t` narrowed by the
//!   four half-plane constraints.

use core::fmt;
use core::str::FromStr;

use log::trace;

use crate::basics::{ClipWindow, Point, PointF};
use crate::error::GridError;

// ============================================================================
// Outcodes (Cohen-Sutherland)
// ============================================================================

pub const OUTCODE_INSIDE: u32 = 0;
/// `x < x_min`
pub const OUTCODE_LEFT: u32 = 1;
/// `x > x_max`
pub const OUTCODE_RIGHT: u32 = 2;
/// `y < y_min`
pub const OUTCODE_BOTTOM: u32 = 4;
/// `y > y_max`
pub const OUTCODE_TOP: u32 = 8;

/// Compute the Cohen-Sutherland outcode for `(x, y)`.
///
/// ```text
///          |          |
///   1001   |   1000   |  1010
///          |          |
/// ---------+----------+--------- y_max
///          |          |
///   0001   |   0000   |  0010
///          |          |
/// ---------+----------+--------- y_min
///          |          |
///   0101   |   0100   |  0110
///          |          |
///        x_min      x_max
/// ```
///
/// At most one of LEFT/RIGHT and one of BOTTOM/TOP is ever set.
#[inline]
pub fn outcode(x: f64, y: f64, window: &ClipWindow) -> u32 {
    let horizontal = if x < window.x_min {
        OUTCODE_LEFT
    } else if x > window.x_max {
        OUTCODE_RIGHT
    } else {
        OUTCODE_INSIDE
    };
    let vertical = if y < window.y_min {
        OUTCODE_BOTTOM
    } else if y > window.y_max {
        OUTCODE_TOP
    } else {
        OUTCODE_INSIDE
    };
    horizontal | vertical
}

// ============================================================================
// Algorithm selector and result
// ============================================================================

/// Which line clipper to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipAlgorithm {
    #[default]
    CohenSutherland,
    LiangBarsky,
}

impl FromStr for ClipAlgorithm {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cohen" | "cohen-sutherland" | "cohen_sutherland" | "cs" => {
                Ok(ClipAlgorithm::CohenSutherland)
            }
            "liang" | "liang-barsky" | "liang_barsky" | "lb" => Ok(ClipAlgorithm::LiangBarsky),
            _ => Err(GridError::UnknownClipAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for ClipAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClipAlgorithm::CohenSutherland => "cohen-sutherland",
            ClipAlgorithm::LiangBarsky => "liang-barsky",
        })
    }
}

/// The visible part of a clipped segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p0: PointF,
    pub p1: PointF,
}

impl Segment {
    pub fn new(p0: PointF, p1: PointF) -> Self {
        Self { p0, p1 }
    }

    /// Both endpoints snapped to the nearest cell.
    pub fn round(&self) -> (Point, Point) {
        (self.p0.round(), self.p1.round())
    }
}

/// Clip `p0`–`p1` against `window` with the chosen algorithm.
pub fn clip_line(
    p0: PointF,
    p1: PointF,
    window: &ClipWindow,
    algorithm: ClipAlgorithm,
) -> Option<Segment> {
    let result = match algorithm {
        ClipAlgorithm::CohenSutherland => cohen_sutherland(p0, p1, window),
        ClipAlgorithm::LiangBarsky => liang_barsky(p0, p1, window),
    };
    trace!(
        "{} clip ({}, {})-({}, {}): {}",
        algorithm,
        p0.x,
        p0.y,
        p1.x,
        p1.y,
        if result.is_some() { "accepted" } else { "rejected" }
    );
    result
}

// ============================================================================
// Cohen-Sutherland
// ============================================================================

/// Each pass moves one endpoint onto one boundary; two per endpoint suffice
/// for a rectangle. The cap only matters for non-finite input.
const MAX_CS_PASSES: usize = 8;

/// Clip a segment using Cohen-Sutherland.
///
/// When both outcodes are zero the segment is accepted as is; when they
/// share a bit it is rejected. Otherwise the outside endpoint (`p0` first)
/// is moved onto the first violated boundary in TOP, BOTTOM, RIGHT, LEFT
/// order and the loop repeats. Intersections are always taken along the
/// input segment, not the partly clipped one, so a segment that only
/// grazes a window corner lands exactly on it. An intersection that comes
/// out NaN or infinite rejects the segment.
pub fn cohen_sutherland(p0: PointF, p1: PointF, window: &ClipWindow) -> Option<Segment> {
    let (mut x0, mut y0) = (p0.x, p0.y);
    let (mut x1, mut y1) = (p1.x, p1.y);
    let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
    let mut code0 = outcode(x0, y0, window);
    let mut code1 = outcode(x1, y1, window);

    for _ in 0..MAX_CS_PASSES {
        if (code0 | code1) == 0 {
            return Some(Segment::new(PointF::new(x0, y0), PointF::new(x1, y1)));
        }
        if (code0 & code1) != 0 {
            return None;
        }

        let code_out = if code0 != 0 { code0 } else { code1 };
        let hit = if code_out & OUTCODE_TOP != 0 {
            PointF::new(p0.x + dx * (window.y_max - p0.y) / dy, window.y_max)
        } else if code_out & OUTCODE_BOTTOM != 0 {
            PointF::new(p0.x + dx * (window.y_min - p0.y) / dy, window.y_min)
        } else if code_out & OUTCODE_RIGHT != 0 {
            PointF::new(window.x_max, p0.y + dy * (window.x_max - p0.x) / dx)
        } else {
            PointF::new(window.x_min, p0.y + dy * (window.x_min - p0.x) / dx)
        };
        if !hit.is_finite() {
            return None;
        }
        let (x, y) = (hit.x, hit.y);

        if code_out == code0 {
            x0 = x;
            y0 = y;
            code0 = outcode(x0, y0, window);
        } else {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1, window);
        }
    }
    None
}

// ============================================================================
// Liang-Barsky
// ============================================================================

/// Clip a segment using Liang-Barsky.
///
/// For the left, right, bottom and top constraints in turn, `p` is the
/// directional component and `q` the distance to the boundary. A segment
/// parallel to and outside a boundary (`p == 0`, `q < 0`) is rejected.
/// Otherwise `r = q / p` raises `t0` (entering, `p < 0`) or lowers `t1`
/// (leaving, `p > 0`); the segment is rejected as soon as `t0 > t1`.
pub fn liang_barsky(p0: PointF, p1: PointF, window: &ClipWindow) -> Option<Segment> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;

    let p = [-dx, dx, -dy, dy];
    let q = [
        p0.x - window.x_min,
        window.x_max - p0.x,
        p0.y - window.y_min,
        window.y_max - p0.y,
    ];

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (&pi, &qi) in p.iter().zip(q.iter()) {
        if pi == 0.0 {
            if qi < 0.0 {
                return None;
            }
            continue;
        }
        let r = qi / pi;
        if pi < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    if t0 > t1 {
        return None;
    }

    Some(Segment::new(
        PointF::new(p0.x + t0 * dx, p0.y + t0 * dy),
        PointF::new(p0.x + t1 * dx, p0.y + t1 * dy),
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn window() -> ClipWindow {
        ClipWindow::for_grid(10, 10)
    }

    fn pf(x: f64, y: f64) -> PointF {
        PointF::new(x, y)
    }

    fn assert_segment_eq(a: &Segment, b: &Segment) {
        assert!(
            (a.p0.x - b.p0.x).abs() < EPS
                && (a.p0.y - b.p0.y).abs() < EPS
                && (a.p1.x - b.p1.x).abs() < EPS
                && (a.p1.y - b.p1.y).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_outcode_inside() {
        assert_eq!(outcode(5.0, 5.0, &window()), OUTCODE_INSIDE);
        assert_eq!(outcode(0.0, 9.0, &window()), OUTCODE_INSIDE);
    }

    #[test]
    fn test_outcode_sides() {
        let w = window();
        assert_eq!(outcode(-1.0, 5.0, &w), OUTCODE_LEFT);
        assert_eq!(outcode(10.0, 5.0, &w), OUTCODE_RIGHT);
        assert_eq!(outcode(5.0, -1.0, &w), OUTCODE_BOTTOM);
        assert_eq!(outcode(5.0, 10.0, &w), OUTCODE_TOP);
    }

    #[test]
    fn test_outcode_corners() {
        let w = window();
        assert_eq!(outcode(-1.0, -1.0, &w), OUTCODE_LEFT | OUTCODE_BOTTOM);
        assert_eq!(outcode(11.0, 12.0, &w), OUTCODE_RIGHT | OUTCODE_TOP);
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!(
            "cohen".parse::<ClipAlgorithm>().unwrap(),
            ClipAlgorithm::CohenSutherland
        );
        assert_eq!(
            "Liang-Barsky".parse::<ClipAlgorithm>().unwrap(),
            ClipAlgorithm::LiangBarsky
        );
        assert!("sutherland-hodgman".parse::<ClipAlgorithm>().is_err());
    }

    #[test]
    fn test_left_crossing_both_algorithms() {
        let expected = Segment::new(pf(0.0, 5.0), pf(5.0, 5.0));
        for algo in [ClipAlgorithm::CohenSutherland, ClipAlgorithm::LiangBarsky] {
            let s = clip_line(pf(-5.0, 5.0), pf(5.0, 5.0), &window(), algo).unwrap();
            assert_segment_eq(&s, &expected);
            assert_eq!(s.round(), (Point::new(0, 5), Point::new(5, 5)));
        }
    }

    #[test]
    fn test_fully_inside_unchanged() {
        let a = pf(1.0, 2.0);
        let b = pf(8.0, 7.0);
        assert_eq!(cohen_sutherland(a, b, &window()), Some(Segment::new(a, b)));
        assert_eq!(liang_barsky(a, b, &window()), Some(Segment::new(a, b)));
    }

    #[test]
    fn test_fully_outside_rejected() {
        let a = pf(-5.0, 12.0);
        let b = pf(20.0, 15.0);
        assert_eq!(cohen_sutherland(a, b, &window()), None);
        assert_eq!(liang_barsky(a, b, &window()), None);
    }

    #[test]
    fn test_outside_corner_not_trivially_rejected() {
        // Both endpoints outside on different sides, line misses the window.
        let a = pf(-4.0, 6.0);
        let b = pf(4.0, 14.0);
        assert_eq!(cohen_sutherland(a, b, &window()), None);
        assert_eq!(liang_barsky(a, b, &window()), None);
    }

    #[test]
    fn test_diagonal_through_window() {
        let a = pf(-3.0, -3.0);
        let b = pf(12.0, 12.0);
        let expected = Segment::new(pf(0.0, 0.0), pf(9.0, 9.0));
        assert_segment_eq(&cohen_sutherland(a, b, &window()).unwrap(), &expected);
        assert_segment_eq(&liang_barsky(a, b, &window()).unwrap(), &expected);
    }

    #[test]
    fn test_vertical_line_crossing_top() {
        let a = pf(4.0, 5.0);
        let b = pf(4.0, 20.0);
        let expected = Segment::new(pf(4.0, 5.0), pf(4.0, 9.0));
        assert_segment_eq(&cohen_sutherland(a, b, &window()).unwrap(), &expected);
        assert_segment_eq(&liang_barsky(a, b, &window()).unwrap(), &expected);
    }

    #[test]
    fn test_vertical_line_outside_rejected() {
        let a = pf(-1.0, 0.0);
        let b = pf(-1.0, 9.0);
        assert_eq!(cohen_sutherland(a, b, &window()), None);
        assert_eq!(liang_barsky(a, b, &window()), None);
    }

    #[test]
    fn test_line_on_boundary_accepted_by_both() {
        let a = pf(0.0, 0.0);
        let b = pf(0.0, 9.0);
        assert!(cohen_sutherland(a, b, &window()).is_some());
        assert!(liang_barsky(a, b, &window()).is_some());
    }

    #[test]
    fn test_corner_graze_agrees() {
        // each touches the window in exactly one corner cell
        let cases = [
            ((11.0, -1.0), (8.0, 14.0), (9.0, 9.0)),
            ((11.0, 10.0), (8.0, -5.0), (9.0, 0.0)),
            ((12.0, -6.0), (8.0, 14.0), (9.0, 9.0)),
            ((12.0, 15.0), (8.0, -5.0), (9.0, 0.0)),
        ];
        for ((x0, y0), (x1, y1), (cx, cy)) in cases {
            let corner = Segment::new(pf(cx, cy), pf(cx, cy));
            let cs = cohen_sutherland(pf(x0, y0), pf(x1, y1), &window());
            let lb = liang_barsky(pf(x0, y0), pf(x1, y1), &window());
            assert_segment_eq(&cs.unwrap(), &corner);
            assert_segment_eq(&lb.unwrap(), &corner);
        }
    }

    #[test]
    fn test_small_lattice_agreement() {
        let w = window();
        for x0 in -6..16 {
            for y0 in -6..16 {
                for x1 in -6..16 {
                    for y1 in -6..16 {
                        let a = pf(x0 as f64, y0 as f64);
                        let b = pf(x1 as f64, y1 as f64);
                        match (cohen_sutherland(a, b, &w), liang_barsky(a, b, &w)) {
                            (Some(cs), Some(lb)) => assert_segment_eq(&cs, &lb),
                            (None, None) => {}
                            other => panic!("{:?}-{:?}: {:?}", a, b, other),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_degenerate_point_segment() {
        let inside = pf(3.0, 3.0);
        let outside = pf(-3.0, 3.0);
        assert!(cohen_sutherland(inside, inside, &window()).is_some());
        assert!(liang_barsky(inside, inside, &window()).is_some());
        assert!(cohen_sutherland(outside, outside, &window()).is_none());
        assert!(liang_barsky(outside, outside, &window()).is_none());
    }

    #[test]
    fn test_nan_input_rejected_by_cohen_sutherland() {
        let a = pf(f64::NAN, 20.0);
        let b = pf(5.0, 5.0);
        assert_eq!(cohen_sutherland(a, b, &window()), None);
    }

    #[test]
    fn test_segment_round() {
        let s = Segment::new(pf(0.5, 2.49), pf(-0.5, 8.5));
        assert_eq!(s.round(), (Point::new(1, 2), Point::new(0, 9)));
    }
}
