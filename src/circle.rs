//! Midpoint circle rasterization.
//!
//! [`MidpointCircle`] walks one octant (from `(r, 0)` toward the diagonal)
//! and [`CirclePoints`] mirrors each offset into the other seven octants.

use crate::basics::{ifloor, Point};
use crate::canvas::Canvas;
use crate::color::Rgba8;

// ============================================================================
// Circle
// ============================================================================

/// A circle as the user built it: a centre cell and a real radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circle through `edge`; radius is the Euclidean distance to it.
    pub fn from_edge(center: Point, edge: Point) -> Self {
        Self::new(center, center.distance(&edge))
    }

    /// Cells of the outline, in paint order. The radius is floored.
    pub fn points(&self) -> CirclePoints {
        CirclePoints::new(self.center, self.radius)
    }
}

// ============================================================================
// MidpointCircle
// ============================================================================

/// Octant walker for the midpoint circle algorithm.
///
/// Starts at `x = ⌊r⌋, y = 0` with decision term `err = 1 - x`. Each step
/// yields the current `(x, y)` offset, then increments `y` and moves `x`
/// inward when the decision term is non-negative. Stops once `x < y`.
#[derive(Debug, Clone)]
pub struct MidpointCircle {
    x: i32,
    y: i32,
    err: i64,
}

impl MidpointCircle {
    pub fn new(radius: f64) -> Self {
        let x = ifloor(radius);
        Self {
            x,
            y: 0,
            err: 1 - x as i64,
        }
    }
}

impl Iterator for MidpointCircle {
    /// `(x, y)` offset from the centre in the first octant, `x >= y`.
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.x < self.y {
            return None;
        }
        let out = (self.x, self.y);
        self.y += 1;
        if self.err < 0 {
            self.err += 2 * self.y as i64 + 1;
        } else {
            self.x -= 1;
            self.err += 2 * (self.y as i64 - self.x as i64 + 1);
        }
        Some(out)
    }
}

/// The eight reflections of an octant offset about `center`.
///
/// Coordinates saturate at the `i32` range; such cells are off any grid.
#[inline]
pub fn octant_points(center: Point, x: i32, y: i32) -> [Point; 8] {
    let at = |dx: i32, dy: i32| {
        Point::new(center.x.saturating_add(dx), center.y.saturating_add(dy))
    };
    [
        at(x, y),
        at(y, x),
        at(-y, x),
        at(-x, y),
        at(-x, -y),
        at(-y, -x),
        at(y, -x),
        at(x, -y),
    ]
}

// ============================================================================
// CirclePoints
// ============================================================================

/// Every outline cell of a circle: 8 per octant step, duplicates included
/// where reflections coincide (on the axes and the diagonal).
#[derive(Debug, Clone)]
pub struct CirclePoints {
    center: Point,
    octant: MidpointCircle,
    pending: [Point; 8],
    next_idx: usize,
}

impl CirclePoints {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            octant: MidpointCircle::new(radius),
            pending: [center; 8],
            next_idx: 8,
        }
    }
}

impl Iterator for CirclePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next_idx == 8 {
            let (x, y) = self.octant.next()?;
            self.pending = octant_points(self.center, x, y);
            self.next_idx = 0;
        }
        let p = self.pending[self.next_idx];
        self.next_idx += 1;
        Some(p)
    }
}

/// Rasterize the outline of the circle at `center` with `radius`.
///
/// A negative radius paints nothing; a radius below 1 paints the centre.
pub fn draw_circle<C: Canvas + ?Sized>(canvas: &mut C, center: Point, radius: f64, color: Rgba8) {
    for p in CirclePoints::new(center, radius) {
        canvas.set_pixel(p.x, p.y, color);
    }
}

// ============================================================================
// Tests
// ============================================================================
