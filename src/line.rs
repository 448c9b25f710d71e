//! Line rasterization: DDA and integer Bresenham.
//!
//! Both rasterizers are iterators over the cells of a segment, endpoints
//! included, in order from `p0` to `p1`. They are finite, lazy, and
//! restartable (clone the iterator, or build a new one from the same
//! endpoints). [`draw_line`] and [`draw_polygon`] feed them into a
//! [`Canvas`].

use core::fmt;
use core::str::FromStr;

use crate::basics::{round_half_up, Point};
use crate::canvas::Canvas;
use crate::color::Rgba8;
use crate::error::GridError;

// ============================================================================
// Algorithm selector
// ============================================================================

/// Which line rasterizer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineAlgorithm {
    Dda,
    #[default]
    Bresenham,
}

impl FromStr for LineAlgorithm {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dda" => Ok(LineAlgorithm::Dda),
            "bresenham" => Ok(LineAlgorithm::Bresenham),
            _ => Err(GridError::UnknownLineAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineAlgorithm::Dda => "dda",
            LineAlgorithm::Bresenham => "bresenham",
        })
    }
}

// ============================================================================
// DDA line
// ============================================================================

/// Floating-point DDA (Digital Differential Analyzer) line.
///
/// Takes `steps = max(|dx|, |dy|)` increments of `(dx/steps, dy/steps)`
/// and yields `steps + 1` rounded samples. The position is accumulated,
/// not recomputed per step, so rounding can occasionally yield the same
/// cell twice; painting is idempotent.
#[derive(Debug, Clone)]
pub struct DdaLine {
    x: f64,
    y: f64,
    x_inc: f64,
    y_inc: f64,
    remaining: u64,
}

impl DdaLine {
    pub fn new(p0: Point, p1: Point) -> Self {
        let dx = p1.x as f64 - p0.x as f64;
        let dy = p1.y as f64 - p0.y as f64;
        let steps = (p1.x as i64 - p0.x as i64)
            .abs()
            .max((p1.y as i64 - p0.y as i64).abs()) as u64;
        let (x_inc, y_inc) = if steps == 0 {
            (0.0, 0.0)
        } else {
            (dx / steps as f64, dy / steps as f64)
        };
        Self {
            x: p0.x as f64,
            y: p0.y as f64,
            x_inc,
            y_inc,
            remaining: steps + 1,
        }
    }
}

impl Iterator for DdaLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let p = Point::new(round_half_up(self.x), round_half_up(self.y));
        self.x += self.x_inc;
        self.y += self.y_inc;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for DdaLine {}

// ============================================================================
// Bresenham line
// ============================================================================

/// Integer-only Bresenham line.
///
/// Uses the doubled error term `e2 = 2 * err` against `-dy` / `dx` so no
/// fractions are needed. Yields exactly `max(|dx|, |dy|) + 1` cells.
/// State is kept in `i64` so endpoints anywhere in the `i32` range work.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl BresenhamLine {
    pub fn new(p0: Point, p1: Point) -> Self {
        let (x0, y0) = (p0.x as i64, p0.y as i64);
        let (x1, y1) = (p1.x as i64, p1.y as i64);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if p0.x < p1.x { 1 } else { -1 },
            sy: if p0.y < p1.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        // x and y stay between the endpoints, so they fit in i32
        let p = Point::new(self.x as i32, self.y as i32);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(p);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(p)
    }
}

// ============================================================================
// Either rasterizer
// ============================================================================

/// The cells of a segment under a chosen [`LineAlgorithm`].
#[derive(Debug, Clone)]
pub enum LinePoints {
    Dda(DdaLine),
    Bresenham(BresenhamLine),
}

impl LinePoints {
    pub fn new(p0: Point, p1: Point, algorithm: LineAlgorithm) -> Self {
        match algorithm {
            LineAlgorithm::Dda => LinePoints::Dda(DdaLine::new(p0, p1)),
            LineAlgorithm::Bresenham => LinePoints::Bresenham(BresenhamLine::new(p0, p1)),
        }
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        match self {
            LinePoints::Dda(li) => li.next(),
            LinePoints::Bresenham(li) => li.next(),
        }
    }
}

/// Rasterize the segment `p0`–`p1` into `canvas`.
pub fn draw_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    p0: Point,
    p1: Point,
    color: Rgba8,
    algorithm: LineAlgorithm,
) {
    for p in LinePoints::new(p0, p1, algorithm) {
        canvas.set_pixel(p.x, p.y, color);
    }
}

/// Rasterize the closed outline through `points`: every consecutive pair,
/// then last back to first. A single point paints one cell; an empty
/// slice paints nothing.
pub fn draw_polygon<C: Canvas + ?Sized>(
    canvas: &mut C,
    points: &[Point],
    color: Rgba8,
    algorithm: LineAlgorithm,
) {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return;
    };
    for edge in points.windows(2) {
        draw_line(canvas, edge[0], edge[1], color, algorithm);
    }
    draw_line(canvas, last, first, color, algorithm);
}

// ============================================================================
// Tests
// ============================================================================
