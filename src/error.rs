//! Error type for session operations.

use thiserror::Error;

/// Reasons a session operation was refused.
///
/// A refused operation never paints and never touches the shape store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("shape index {index} out of bounds ({len} shapes stored)")]
    ShapeIndexOutOfBounds { index: usize, len: usize },
    #[error("a shape needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },
    #[error("a circle needs a centre and an edge point, got {count} selected")]
    IncompleteCircle { count: usize },
    #[error("scale factor must be positive, got {0}")]
    NonPositiveScaleFactor(f64),
    #[error("transformed point ({x}, {y}) is outside the coordinate range")]
    CoordinateOverflow { x: i64, y: i64 },
    #[error("invalid colour {0:?}")]
    InvalidColor(String),
    #[error("unknown line algorithm {0:?} (expected \"dda\" or \"bresenham\")")]
    UnknownLineAlgorithm(String),
    #[error("unknown clip algorithm {0:?} (expected \"cohen\" or \"liang\")")]
    UnknownClipAlgorithm(String),
}
