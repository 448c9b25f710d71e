//! Committed shapes, circles, and the pending selection.
//!
//! Shapes are indexed by creation order. A shape is only ever replaced
//! wholesale (a transform yields a new point list for the same index);
//! circles are append-only.

use log::debug;

use crate::basics::Point;
use crate::circle::Circle;
use crate::error::GridError;

// ============================================================================
// Shape
// ============================================================================

/// A closed polygon: at least three points, the last joined back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    points: Vec<Point>,
}

impl Shape {
    pub const MIN_POINTS: usize = 3;

    pub fn new(points: Vec<Point>) -> Result<Self, GridError> {
        if points.len() < Self::MIN_POINTS {
            return Err(GridError::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

// ============================================================================
// ShapeStore
// ============================================================================

/// Shapes and circles created so far.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    circles: Vec<Circle>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape; returns its index.
    pub fn push_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        let index = self.shapes.len() - 1;
        debug!("stored shape #{} ({} points)", index, self.shapes[index].len());
        index
    }

    /// Append a circle; returns its index among circles.
    pub fn push_circle(&mut self, circle: Circle) -> usize {
        self.circles.push(circle);
        debug!(
            "stored circle #{} at ({}, {}) r={}",
            self.circles.len() - 1,
            circle.center.x,
            circle.center.y,
            circle.radius
        );
        self.circles.len() - 1
    }

    pub fn shape(&self, index: usize) -> Result<&Shape, GridError> {
        self.shapes
            .get(index)
            .ok_or(GridError::ShapeIndexOutOfBounds {
                index,
                len: self.shapes.len(),
            })
    }

    /// Overwrite the shape at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, shape: Shape) -> Result<Shape, GridError> {
        let len = self.shapes.len();
        let slot = self
            .shapes
            .get_mut(index)
            .ok_or(GridError::ShapeIndexOutOfBounds { index, len })?;
        debug!("replaced shape #{}", index);
        Ok(core::mem::replace(slot, shape))
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Index of the most recently created shape.
    pub fn last_index(&self) -> Option<usize> {
        self.shapes.len().checked_sub(1)
    }

    /// Drop every shape and circle.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.circles.clear();
    }
}

// ============================================================================
// SelectionBuffer
// ============================================================================

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The point was appended at this position.
    Added(usize),
    /// The point was already selected; nothing changed.
    Ignored,
    /// The first point was clicked again with at least two points selected.
    CloseLoop,
}

/// Points picked but not yet committed. No coordinate appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionBuffer {
    points: Vec<Point>,
}

impl SelectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click at `p`.
    pub fn click(&mut self, p: Point) -> SelectionEvent {
        if self.points.len() >= 2 && self.points.first() == Some(&p) {
            return SelectionEvent::CloseLoop;
        }
        if self.points.contains(&p) {
            return SelectionEvent::Ignored;
        }
        self.points.push(p);
        SelectionEvent::Added(self.points.len() - 1)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Take the selected points, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<Point> {
        core::mem::take(&mut self.points)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
