//! Affine transformation matrix.
//!
//! A 2×3 matrix for rotation, scaling and reflection of grid points about
//! a pivot (the shape's centroid): build the linear part, then fix the
//! translation with [`TransAffine::about`].

use crate::basics::{Point, PointF};

/// 2D affine transformation matrix.
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// Transform: `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    // ====================================================================
    // Construction
    // ====================================================================

    fn linear(sx: f64, shy: f64, shx: f64, sy: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Rotation by `a` radians: `[cos −sin; sin cos]`.
    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self::linear(ca, sa, -sa, ca)
    }

    pub fn new_scaling_uniform(s: f64) -> Self {
        Self::linear(s, 0.0, 0.0, s)
    }

    /// `x' = -x`.
    pub fn new_mirror_x() -> Self {
        Self::linear(-1.0, 0.0, 0.0, 1.0)
    }

    /// `y' = -y`.
    pub fn new_mirror_y() -> Self {
        Self::linear(1.0, 0.0, 0.0, -1.0)
    }

    /// Keep the linear part and set the translation so that `pivot` maps
    /// onto itself.
    pub fn about(mut self, pivot: PointF) -> Self {
        self.tx = pivot.x - (pivot.x * self.sx + pivot.y * self.shx);
        self.ty = pivot.y - (pivot.x * self.shy + pivot.y * self.sy);
        self
    }

    // ====================================================================
    // Transformations
    // ====================================================================

    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let tmp = *x;
        *x = tmp * self.sx + *y * self.shx + self.tx;
        *y = tmp * self.shy + *y * self.sy + self.ty;
    }

    /// Transform a grid cell; the result is not rounded.
    #[inline]
    pub fn transform_point(&self, p: Point) -> PointF {
        let mut x = p.x as f64;
        let mut y = p.y as f64;
        self.transform(&mut x, &mut y);
        PointF::new(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================
