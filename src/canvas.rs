//! Paint sinks.
//!
//! The rasterizer only ever needs one operation, [`Canvas::set_pixel`].
//! Painting outside the grid is a no-op by contract, so callers never
//! validate coordinates before painting.

use crate::basics::{GridConfig, Point};
use crate::color::Rgba8;

/// A write-only cell sink addressed by `(x, y)`.
pub trait Canvas {
    /// Paint one cell. Must silently ignore cells outside the grid.
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        (**self).set_pixel(x, y, color);
    }
}

/// Records every paint call in order, out-of-range ones included.
impl Canvas for Vec<(Point, Rgba8)> {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        self.push((Point::new(x, y), color));
    }
}

// ============================================================================
// GridCanvas
// ============================================================================

/// An in-memory `rows × cols` colour matrix, row-major.
#[derive(Debug, Clone)]
pub struct GridCanvas {
    config: GridConfig,
    cells: Vec<Rgba8>,
}

impl GridCanvas {
    /// A grid with every cell in the background colour.
    pub fn new(config: GridConfig) -> Self {
        let len = config.rows as usize * config.cols as usize;
        Self {
            config,
            cells: vec![Rgba8::BACKGROUND; len],
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> u32 {
        self.config.rows
    }

    pub fn cols(&self) -> u32 {
        self.config.cols
    }

    /// Returns `true` if `(x, y)` is on the grid.
    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        self.config.contains(x, y)
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.config.cols as usize + x as usize
    }

    /// Colour of the cell at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if self.inbox(x, y) {
            Some(self.cells[self.offset(x, y)])
        } else {
            None
        }
    }

    /// Fill every cell with `color`.
    pub fn clear(&mut self, color: Rgba8) {
        self.cells.fill(color);
    }

    /// Cells whose colour differs from the background, in row-major order.
    pub fn painted(&self) -> Vec<Point> {
        let cols = self.config.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_background())
            .map(|(i, _)| Point::new((i % cols) as i32, (i / cols) as i32))
            .collect()
    }

    /// RGBA bytes, one pixel per cell, row-major, top-to-bottom.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|c| c.to_array()).collect()
    }

    /// RGBA bytes with every cell expanded to `cell_size × cell_size` pixels.
    pub fn to_rgba_scaled(&self, cell_size: u32) -> Vec<u8> {
        let s = cell_size.max(1) as usize;
        let cols = self.config.cols as usize;
        let rows = self.config.rows as usize;
        let mut out = Vec::with_capacity(rows * s * cols * s * 4);
        for y in 0..rows {
            let row = &self.cells[y * cols..(y + 1) * cols];
            for _ in 0..s {
                for c in row {
                    for _ in 0..s {
                        out.extend_from_slice(&c.to_array());
                    }
                }
            }
        }
        out
    }

    /// One character per cell: `.` for background, `#` otherwise.
    pub fn to_ascii(&self) -> String {
        let cols = self.config.cols as usize;
        let mut s = String::with_capacity(self.cells.len() + self.config.rows as usize);
        for row in self.cells.chunks(cols.max(1)) {
            for c in row {
                s.push(if c.is_background() { '.' } else { '#' });
            }
            s.push('\n');
        }
        s
    }
}

impl Canvas for GridCanvas {
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if self.inbox(x, y) {
            let i = self.offset(x, y);
            self.cells[i] = color;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
