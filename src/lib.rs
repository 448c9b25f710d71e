//! # raster-grid
//!
//! The engine behind a pixel-grid drawing tool for teaching classical
//! raster graphics: users click cells to build polygons and circles,
//! transform them about their centroid, and clip segments against the
//! grid.
//!
//! - Line rasterization with DDA and integer Bresenham
//! - Midpoint circle rasterization with eight-way symmetry
//! - Shift, rotate, scale and mirror about a shape's centroid
//! - Cohen-Sutherland and Liang-Barsky line clipping
//!
//! ## Architecture
//!
//! Rasterizers are lazy iterators over grid cells; the `draw_*` functions
//! push those cells into a [`Canvas`], a write-only sink that ignores
//! out-of-grid writes. A [`Session`] owns one canvas together with the
//! [`ShapeStore`] and the pending [`SelectionBuffer`], and runs every
//! transform as erase, recompute, redraw, commit.
//!
//! ```
//! use raster_grid::{GridCanvas, GridConfig, Point, Session, ToolSettings};
//!
//! let config = GridConfig::new(20, 20);
//! let mut session = Session::new(config, GridCanvas::new(config));
//! let settings = ToolSettings::default();
//! let index = session
//!     .add_shape(vec![Point::new(2, 2), Point::new(8, 2), Point::new(2, 8)], &settings)
//!     .unwrap();
//! session.rotate_shape(index, 90.0, &settings).unwrap();
//! assert_eq!(session.store().shape_count(), 1);
//! ```

pub mod basics;
pub mod canvas;
pub mod circle;
pub mod clip;
pub mod color;
pub mod error;
pub mod line;
pub mod session;
pub mod shape_store;
pub mod trans_affine;
pub mod transform;

pub use basics::{ClipWindow, GridConfig, Point, PointF};
pub use canvas::{Canvas, GridCanvas};
pub use circle::{draw_circle, Circle};
pub use clip::{clip_line, ClipAlgorithm, Segment};
pub use color::Rgba8;
pub use error::GridError;
pub use line::{draw_line, draw_polygon, LineAlgorithm};
pub use session::{Session, ToolSettings};
pub use shape_store::{SelectionBuffer, Shape, ShapeStore};
pub use transform::{centroid, ShapeTransform};
