//! Shape transforms about the centroid.
//!
//! Every transform is a pure function from a point list to a new point
//! list of the same length and order. Rotation, scaling and mirroring
//! pivot on the arithmetic mean of the points, recomputed on each call
//! (for a concave polygon that pivot may lie outside the shape).

use core::fmt;

use crate::basics::{deg2rad, Point, PointF};
use crate::error::GridError;
use crate::trans_affine::TransAffine;

/// Arithmetic mean of `points`. An empty slice has its centroid at the origin.
pub fn centroid(points: &[Point]) -> PointF {
    if points.is_empty() {
        return PointF::default();
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
    let n = points.len() as f64;
    PointF::new(sx / n, sy / n)
}

/// Round half to even.
///
/// Used to place mirror axes: with ties going to even, reflecting twice
/// always lands on the starting cells.
fn round_half_even(v: f64) -> f64 {
    if (v - v.trunc()).abs() == 0.5 {
        2.0 * (v / 2.0).round()
    } else {
        v.round()
    }
}

/// A transform request for a stored shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeTransform {
    /// Move every point by `(dx, dy)`.
    Shift { dx: i32, dy: i32 },
    /// Rotate counter-clockwise in math orientation (clockwise on a
    /// y-down grid) by `degrees` about the centroid.
    Rotate { degrees: f64 },
    /// Uniform scale about the centroid. `factor` must be positive.
    Scale { factor: f64 },
    /// Reflect x about the centroid's x.
    MirrorX,
    /// Reflect y about the centroid's y.
    MirrorY,
}

impl ShapeTransform {
    /// Reject parameters the transform is not defined for.
    pub fn validate(&self) -> Result<(), GridError> {
        match *self {
            ShapeTransform::Scale { factor } if !(factor > 0.0) => {
                Err(GridError::NonPositiveScaleFactor(factor))
            }
            _ => Ok(()),
        }
    }

    /// Compute the transformed point list.
    ///
    /// Rotation and scaling round each result to the nearest cell; shift
    /// is exact and fails if a coordinate leaves the `i32` range.
    /// Mirroring reflects about the centroid line snapped to the nearest
    /// half cell, which keeps the result on the grid and makes applying
    /// the same mirror twice return the original points.
    pub fn apply(&self, points: &[Point]) -> Result<Vec<Point>, GridError> {
        Ok(match *self {
            ShapeTransform::Shift { dx, dy } => shift(points, dx, dy)?,
            ShapeTransform::Rotate { degrees } => rotate(points, degrees),
            ShapeTransform::Scale { factor } => scale(points, factor),
            ShapeTransform::MirrorX => mirror_x(points),
            ShapeTransform::MirrorY => mirror_y(points),
        })
    }
}

impl fmt::Display for ShapeTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeTransform::Shift { dx, dy } => write!(f, "shift({}, {})", dx, dy),
            ShapeTransform::Rotate { degrees } => write!(f, "rotate({}°)", degrees),
            ShapeTransform::Scale { factor } => write!(f, "scale({})", factor),
            ShapeTransform::MirrorX => f.write_str("mirror-x"),
            ShapeTransform::MirrorY => f.write_str("mirror-y"),
        }
    }
}

/// `(x + dx, y + dy)` for every point.
pub fn shift(points: &[Point], dx: i32, dy: i32) -> Result<Vec<Point>, GridError> {
    points
        .iter()
        .map(|p| match (p.x.checked_add(dx), p.y.checked_add(dy)) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(GridError::CoordinateOverflow {
                x: p.x as i64 + dx as i64,
                y: p.y as i64 + dy as i64,
            }),
        })
        .collect()
}

fn map_rounded(points: &[Point], m: &TransAffine) -> Vec<Point> {
    points.iter().map(|&p| m.transform_point(p).round()).collect()
}

fn about_centroid(points: &[Point], m: TransAffine) -> Vec<Point> {
    map_rounded(points, &m.about(centroid(points)))
}

/// Rotate by `degrees` about the centroid, rounding to the nearest cell.
pub fn rotate(points: &[Point], degrees: f64) -> Vec<Point> {
    about_centroid(points, TransAffine::new_rotation(deg2rad(degrees)))
}

/// Scale both axes by `factor` about the centroid, rounding to the nearest
/// cell. `factor <= 0` is not meaningful; see [`ShapeTransform::validate`].
pub fn scale(points: &[Point], factor: f64) -> Vec<Point> {
    about_centroid(points, TransAffine::new_scaling_uniform(factor))
}

/// `x' = 2·cx − x`, with `2·cx` snapped to an integer; y unchanged.
pub fn mirror_x(points: &[Point]) -> Vec<Point> {
    let axis = round_half_even(2.0 * centroid(points).x) / 2.0;
    map_rounded(points, &TransAffine::new_mirror_x().about(PointF::new(axis, 0.0)))
}

/// `y' = 2·cy − y`, with `2·cy` snapped to an integer; x unchanged.
pub fn mirror_y(points: &[Point]) -> Vec<Point> {
    let axis = round_half_even(2.0 * centroid(points).y) / 2.0;
    map_rounded(points, &TransAffine::new_mirror_y().about(PointF::new(0.0, axis)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn square() -> Vec<Point> {
        pts(&[(10, 10), (14, 10), (14, 14), (10, 14)])
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&square()), PointF::new(12.0, 12.0));
        assert_eq!(
            centroid(&pts(&[(0, 0), (1, 0), (3, 0)])),
            PointF::new(4.0 / 3.0, 0.0)
        );
        assert_eq!(centroid(&[]), PointF::default());
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.5), 0.0);
        assert_eq!(round_half_even(1.5), 2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(-0.5), 0.0);
        assert_eq!(round_half_even(-1.5), -2.0);
        assert_eq!(round_half_even(2.4), 2.0);
        assert_eq!(round_half_even(2.6), 3.0);
    }

    #[test]
    fn test_shift() {
        assert_eq!(
            shift(&square(), 3, -2).unwrap(),
            pts(&[(13, 8), (17, 8), (17, 12), (13, 12)])
        );
    }

    #[test]
    fn test_shift_overflow_rejected() {
        let tri = pts(&[(1, 1), (5, 1), (1, 5)]);
        assert_eq!(
            shift(&tri, i32::MAX, 0),
            Err(GridError::CoordinateOverflow {
                x: i32::MAX as i64 + 1,
                y: 1,
            })
        );
        assert!(shift(&tri, 0, i32::MIN).is_ok());
        assert!(shift(&pts(&[(0, -1)]), 0, i32::MIN).is_err());
    }

    #[test]
    fn test_rotate_far_off_grid_saturates() {
        let far = pts(&[(i32::MAX, 0), (i32::MAX, 10), (i32::MAX - 10, 0)]);
        let r = rotate(&far, 180.0);
        assert_eq!(r.len(), 3);
        assert_eq!(r[2].x, i32::MAX);
    }

    #[test]
    fn test_rotate_90_square_maps_onto_itself() {
        // +90° in math orientation: (x, y) relative -> (-y, x)
        let r = rotate(&square(), 90.0);
        assert_eq!(r, pts(&[(14, 10), (14, 14), (10, 14), (10, 10)]));
    }

    #[test]
    fn test_rotate_360_identity() {
        let tri = pts(&[(3, 7), (20, 11), (9, 30)]);
        assert_eq!(rotate(&tri, 360.0), tri);
        assert_eq!(rotate(&tri, -720.0), tri);
    }

    #[test]
    fn test_rotate_preserves_length_and_order() {
        let tri = pts(&[(3, 7), (20, 11), (9, 30)]);
        let r = rotate(&tri, 33.0);
        assert_eq!(r.len(), 3);
        assert_ne!(r, tri);
    }

    #[test]
    fn test_scale_grow() {
        assert_eq!(
            scale(&square(), 2.0),
            pts(&[(8, 8), (16, 8), (16, 16), (8, 16)])
        );
    }

    #[test]
    fn test_scale_shrink_rounds() {
        // relative offsets ±2 * 0.25 = ±0.5 -> 12 ± 0.5 rounds half up
        assert_eq!(
            scale(&square(), 0.25),
            pts(&[(12, 12), (13, 12), (13, 13), (12, 13)])
        );
    }

    #[test]
    fn test_mirror_x() {
        let tri = pts(&[(0, 0), (4, 0), (0, 2)]);
        // cx = 4/3 -> axis snapped to 3/2 (2cx = 8/3 rounds to 3)
        assert_eq!(mirror_x(&tri), pts(&[(3, 0), (-1, 0), (3, 2)]));
    }

    #[test]
    fn test_mirror_y_keeps_x() {
        let tri = pts(&[(5, 1), (9, 1), (5, 7)]);
        let m = mirror_y(&tri);
        assert_eq!(m, pts(&[(5, 5), (9, 5), (5, -1)]));
    }

    #[test]
    fn test_mirror_involution_quarter_centroid() {
        // cx = 0.25, so 2cx = 0.5 sits exactly on a tie
        let shape = pts(&[(0, 0), (0, 5), (0, 9), (1, 3)]);
        assert_eq!(mirror_x(&mirror_x(&shape)), shape);
        let shape_t: Vec<_> = shape.iter().map(|p| Point::new(p.y, p.x)).collect();
        assert_eq!(mirror_y(&mirror_y(&shape_t)), shape_t);
    }

    #[test]
    fn test_validate_scale() {
        assert!(ShapeTransform::Scale { factor: 2.0 }.validate().is_ok());
        assert_eq!(
            ShapeTransform::Scale { factor: 0.0 }.validate(),
            Err(GridError::NonPositiveScaleFactor(0.0))
        );
        assert!(ShapeTransform::Scale { factor: -1.0 }.validate().is_err());
        assert!(ShapeTransform::Scale { factor: f64::NAN }.validate().is_err());
        assert!(ShapeTransform::MirrorX.validate().is_ok());
    }

    #[test]
    fn test_apply_dispatch() {
        let sq = square();
        assert_eq!(
            ShapeTransform::Shift { dx: 1, dy: 1 }.apply(&sq),
            shift(&sq, 1, 1)
        );
        assert_eq!(
            ShapeTransform::Rotate { degrees: 45.0 }.apply(&sq),
            Ok(rotate(&sq, 45.0))
        );
        assert_eq!(ShapeTransform::MirrorY.apply(&sq), Ok(mirror_y(&sq)));
    }

    #[test]
    fn test_display() {
        assert_eq!(ShapeTransform::Shift { dx: 1, dy: -1 }.to_string(), "shift(1, -1)");
        assert_eq!(ShapeTransform::MirrorX.to_string(), "mirror-x");
    }
}
