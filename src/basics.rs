//! Foundation types, constants, and rounding helpers.
//!
//! Everything else in the crate depends on these: integer grid cells,
//! floating points for intermediate geometry, and the clip window.

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round to the nearest integer, halves rounding toward positive infinity.
///
/// `-2.5` rounds to `-2`, `2.5` rounds to `3`. Every "round to nearest cell"
/// in the crate goes through this so DDA samples, transformed vertices and
/// clipped endpoints land on the same cells.
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Floor a double to the nearest integer toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    v.floor() as i32
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

// ============================================================================
// Point
// ============================================================================

/// A grid cell address.
///
/// Committed points satisfy `0 <= x < cols` and `0 <= y < rows`, but
/// intermediate results (a shape shifted off the edge, a rotated vertex)
/// may lie anywhere; painting them is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x as f64 - self.x as f64;
        let dy = other.y as f64 - self.y as f64;
        dx.hypot(dy)
    }
}

/// A point with floating coordinates (clip results, centroids).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Snap to the nearest cell.
    #[inline]
    pub fn round(&self) -> Point {
        Point::new(round_half_up(self.x), round_half_up(self.y))
    }

    /// True if both coordinates are finite (no NaN/∞ from a degenerate division).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        PointF::new(p.x as f64, p.y as f64)
    }
}

// ============================================================================
// ClipWindow
// ============================================================================

/// An axis-aligned clip rectangle, bounds inclusive on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ClipWindow {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The window covering a whole `rows` × `cols` grid: `[0, cols-1] × [0, rows-1]`.
    pub fn for_grid(rows: u32, cols: u32) -> Self {
        Self::new(
            0.0,
            cols.saturating_sub(1) as f64,
            0.0,
            rows.saturating_sub(1) as f64,
        )
    }
}

// ============================================================================
// Grid configuration
// ============================================================================

/// Grid dimensions, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    /// Edge length of one cell in screen pixels (used only by front ends).
    pub cell_size: u32,
}

impl GridConfig {
    pub const DEFAULT_ROWS: u32 = 80;
    pub const DEFAULT_COLS: u32 = 120;
    pub const DEFAULT_CELL_SIZE: u32 = 10;

    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// The full-grid clip window.
    pub fn clip_window(&self) -> ClipWindow {
        ClipWindow::for_grid(self.rows, self.cols)
    }

    /// Returns `true` if the cell lies on the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.cols as i64 && (y as i64) < self.rows as i64
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROWS, Self::DEFAULT_COLS)
    }
}

// ============================================================================
// Tests
// ============================================================================
