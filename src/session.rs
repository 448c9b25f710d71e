//! Session controller.
//!
//! A [`Session`] owns the canvas, the shape store and the selection
//! buffer, and runs every user-level operation to completion against
//! them. Tool state (algorithms, colour, rotation step, scale step) is
//! passed in explicitly as [`ToolSettings`] on each call.

use log::{debug, warn};

use crate::basics::{GridConfig, Point, PointF};
use crate::canvas::Canvas;
use crate::circle::{draw_circle, Circle};
use crate::clip::{clip_line, ClipAlgorithm};
use crate::color::Rgba8;
use crate::error::GridError;
use crate::line::{draw_line, draw_polygon, LineAlgorithm};
use crate::shape_store::{SelectionBuffer, SelectionEvent, Shape, ShapeStore};
use crate::transform::ShapeTransform;

// ============================================================================
// ToolSettings
// ============================================================================

/// The tool state an operation reads at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    pub line_algorithm: LineAlgorithm,
    pub clip_algorithm: ClipAlgorithm,
    /// Foreground colour for new lines, polygons and circles.
    pub color: Rgba8,
    /// Step for keyboard rotation, in degrees.
    pub rotation_degrees: f64,
    /// Step for keyboard scaling; shrinking uses the reciprocal.
    pub scale_factor: f64,
}

impl ToolSettings {
    pub const DEFAULT_ROTATION_DEGREES: f64 = 15.0;
    pub const DEFAULT_SCALE_FACTOR: f64 = 2.0;

    pub fn with_line_algorithm(mut self, algorithm: LineAlgorithm) -> Self {
        self.line_algorithm = algorithm;
        self
    }

    pub fn with_clip_algorithm(mut self, algorithm: ClipAlgorithm) -> Self {
        self.clip_algorithm = algorithm;
        self
    }

    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            line_algorithm: LineAlgorithm::Bresenham,
            clip_algorithm: ClipAlgorithm::CohenSutherland,
            color: Rgba8::BLACK,
            rotation_degrees: Self::DEFAULT_ROTATION_DEGREES,
            scale_factor: Self::DEFAULT_SCALE_FACTOR,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// One drawing session on a fixed-size grid.
pub struct Session<C: Canvas> {
    config: GridConfig,
    canvas: C,
    store: ShapeStore,
    selection: SelectionBuffer,
}

impl<C: Canvas> Session<C> {
    pub fn new(config: GridConfig, canvas: C) -> Self {
        Self {
            config,
            canvas,
            store: ShapeStore::new(),
            selection: SelectionBuffer::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionBuffer {
        &self.selection
    }

    // ------------------------------------------------------------------------
    // Building shapes
    // ------------------------------------------------------------------------

    /// Handle a click on cell `p`.
    ///
    /// New points are marked red (first) or blue (the rest). Clicking the
    /// first point again with two or more points selected commits the
    /// selection as a closed polygon; any other repeat click does nothing.
    /// Returns the index of the committed shape, if one was stored.
    pub fn click(&mut self, p: Point, settings: &ToolSettings) -> Option<usize> {
        match self.selection.click(p) {
            SelectionEvent::Added(i) => {
                let marker = if i == 0 {
                    Rgba8::SELECTION_FIRST
                } else {
                    Rgba8::SELECTION_REST
                };
                self.canvas.set_pixel(p.x, p.y, marker);
                None
            }
            SelectionEvent::Ignored => None,
            SelectionEvent::CloseLoop => self.connect_selection(settings).ok(),
        }
    }

    /// Draw the selection as a closed polygon and commit it.
    ///
    /// The outline is always drawn and the selection always cleared; the
    /// polygon is stored only when it has at least three points.
    pub fn connect_selection(&mut self, settings: &ToolSettings) -> Result<usize, GridError> {
        let points = self.selection.take();
        draw_polygon(
            &mut self.canvas,
            &points,
            settings.color,
            settings.line_algorithm,
        );
        let shape = Shape::new(points).map_err(|e| {
            warn!("selection not stored: {}", e);
            e
        })?;
        Ok(self.store.push_shape(shape))
    }

    /// Draw and store a polygon from an explicit point list.
    ///
    /// Unlike [`Session::connect_selection`], nothing is drawn when the
    /// list has fewer than three points.
    pub fn add_shape(
        &mut self,
        points: Vec<Point>,
        settings: &ToolSettings,
    ) -> Result<usize, GridError> {
        let shape = Shape::new(points).map_err(|e| {
            warn!("shape rejected: {}", e);
            e
        })?;
        draw_polygon(
            &mut self.canvas,
            shape.points(),
            settings.color,
            settings.line_algorithm,
        );
        Ok(self.store.push_shape(shape))
    }

    /// Build a circle from the first two selected points (centre, then a
    /// point on the circumference).
    pub fn create_circle_from_selection(
        &mut self,
        settings: &ToolSettings,
    ) -> Result<usize, GridError> {
        let (center, edge) = match self.selection.points() {
            [center, edge, ..] => (*center, *edge),
            pts => {
                let count = pts.len();
                warn!("circle needs two selected points, have {}", count);
                return Err(GridError::IncompleteCircle { count });
            }
        };
        self.selection.clear();
        self.canvas.set_pixel(center.x, center.y, Rgba8::BACKGROUND);
        self.canvas.set_pixel(edge.x, edge.y, Rgba8::BACKGROUND);
        Ok(self.add_circle(Circle::from_edge(center, edge), settings.color))
    }

    /// Rasterize and store a circle.
    pub fn add_circle(&mut self, circle: Circle, color: Rgba8) -> usize {
        draw_circle(&mut self.canvas, circle.center, circle.radius, color);
        self.store.push_circle(circle)
    }

    /// Rasterize a free segment. Free segments are not stored.
    pub fn draw_line(&mut self, p0: Point, p1: Point, settings: &ToolSettings) {
        draw_line(
            &mut self.canvas,
            p0,
            p1,
            settings.color,
            settings.line_algorithm,
        );
    }

    // ------------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------------

    /// Transform the shape at `index`: erase its outline, compute the new
    /// points, draw them, and store them in its place.
    ///
    /// An out-of-range index, a non-positive scale factor or a shift that
    /// leaves the coordinate range is rejected before anything is painted.
    /// Erasing redraws the old edges in the background colour, so an edge
    /// shared with another shape is erased too.
    pub fn transform_shape(
        &mut self,
        index: usize,
        transform: ShapeTransform,
        settings: &ToolSettings,
    ) -> Result<(), GridError> {
        let computed = self.store.shape(index).and_then(|shape| {
            transform.validate()?;
            let new = Shape::new(transform.apply(shape.points())?)?;
            Ok((shape.points().to_vec(), new))
        });
        let (old, shape) = match computed {
            Ok(pair) => pair,
            Err(e) => {
                warn!("{} rejected: {}", transform, e);
                return Err(e);
            }
        };

        draw_polygon(
            &mut self.canvas,
            &old,
            Rgba8::BACKGROUND,
            settings.line_algorithm,
        );
        draw_polygon(
            &mut self.canvas,
            shape.points(),
            settings.color,
            settings.line_algorithm,
        );
        self.store.replace(index, shape)?;
        debug!("applied {} to shape #{}", transform, index);
        Ok(())
    }

    pub fn shift_shape(
        &mut self,
        index: usize,
        dx: i32,
        dy: i32,
        settings: &ToolSettings,
    ) -> Result<(), GridError> {
        self.transform_shape(index, ShapeTransform::Shift { dx, dy }, settings)
    }

    pub fn rotate_shape(
        &mut self,
        index: usize,
        degrees: f64,
        settings: &ToolSettings,
    ) -> Result<(), GridError> {
        self.transform_shape(index, ShapeTransform::Rotate { degrees }, settings)
    }

    pub fn scale_shape(
        &mut self,
        index: usize,
        factor: f64,
        settings: &ToolSettings,
    ) -> Result<(), GridError> {
        self.transform_shape(index, ShapeTransform::Scale { factor }, settings)
    }

    pub fn mirror_shape_x(&mut self, index: usize, settings: &ToolSettings) -> Result<(), GridError> {
        self.transform_shape(index, ShapeTransform::MirrorX, settings)
    }

    pub fn mirror_shape_y(&mut self, index: usize, settings: &ToolSettings) -> Result<(), GridError> {
        self.transform_shape(index, ShapeTransform::MirrorY, settings)
    }

    // ------------------------------------------------------------------------
    // Clipping and reset
    // ------------------------------------------------------------------------

    /// Clip `p0`–`p1` against the full grid and draw the visible part in
    /// the background colour.
    ///
    /// The endpoints are rounded to the nearest cell and joined with
    /// Bresenham whatever line algorithm is selected. Returns the drawn
    /// segment, or `None` when the segment lies entirely outside.
    pub fn clip_segment(
        &mut self,
        p0: Point,
        p1: Point,
        algorithm: ClipAlgorithm,
    ) -> Option<(Point, Point)> {
        let window = self.config.clip_window();
        let segment = clip_line(PointF::from(p0), PointF::from(p1), &window, algorithm)?;
        let (a, b) = segment.round();
        draw_line(
            &mut self.canvas,
            a,
            b,
            Rgba8::BACKGROUND,
            LineAlgorithm::Bresenham,
        );
        Some((a, b))
    }

    /// Paint every cell background and forget all shapes, circles and
    /// selected points.
    pub fn clear(&mut self) {
        for y in 0..self.config.rows as i32 {
            for x in 0..self.config.cols as i32 {
                self.canvas.set_pixel(x, y, Rgba8::BACKGROUND);
            }
        }
        self.store.clear();
        self.selection.clear();
        debug!("session cleared");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::GridCanvas;

    type Recorded = Vec<(Point, Rgba8)>;

    fn recording(rows: u32, cols: u32) -> Session<Recorded> {
        Session::new(GridConfig::new(rows, cols), Vec::new())
    }

    fn triangle() -> Vec<Point> {
        vec![Point::new(2, 2), Point::new(8, 2), Point::new(2, 8)]
    }

    #[test]
    fn test_default_settings() {
        let s = ToolSettings::default();
        assert_eq!(s.line_algorithm, LineAlgorithm::Bresenham);
        assert_eq!(s.clip_algorithm, ClipAlgorithm::CohenSutherland);
        assert_eq!(s.color, Rgba8::BLACK);
        assert_eq!(s.rotation_degrees, 15.0);
        assert_eq!(s.scale_factor, 2.0);
    }

    #[test]
    fn test_click_markers() {
        let mut session = recording(10, 10);
        let settings = ToolSettings::default();
        session.click(Point::new(1, 1), &settings);
        session.click(Point::new(5, 1), &settings);
        session.click(Point::new(5, 1), &settings);
        assert_eq!(
            session.canvas(),
            &vec![
                (Point::new(1, 1), Rgba8::SELECTION_FIRST),
                (Point::new(5, 1), Rgba8::SELECTION_REST),
            ]
        );
        assert_eq!(session.selection().len(), 2);
    }

    #[test]
    fn test_close_loop_commits_shape() {
        let mut session = recording(10, 10);
        let settings = ToolSettings::default();
        for p in triangle() {
            assert_eq!(session.click(p, &settings), None);
        }
        assert_eq!(session.click(Point::new(2, 2), &settings), Some(0));
        assert!(session.selection().is_empty());
        assert_eq!(session.store().shape(0).unwrap().points(), &triangle()[..]);
    }

    #[test]
    fn test_close_loop_with_two_points_draws_but_does_not_store() {
        let mut session = recording(10, 10);
        let settings = ToolSettings::default();
        session.click(Point::new(1, 1), &settings);
        session.click(Point::new(4, 1), &settings);
        let before = session.canvas().len();
        assert_eq!(session.click(Point::new(1, 1), &settings), None);
        assert!(session.canvas().len() > before);
        assert_eq!(session.store().shape_count(), 0);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_add_shape_too_few_points_paints_nothing() {
        let mut session = recording(10, 10);
        let err = session
            .add_shape(vec![Point::new(0, 0)], &ToolSettings::default())
            .unwrap_err();
        assert_eq!(err, GridError::TooFewPoints { count: 1 });
        assert!(session.canvas().is_empty());
    }

    #[test]
    fn test_transform_out_of_bounds_is_noop() {
        let mut session = recording(20, 20);
        let settings = ToolSettings::default();
        session.add_shape(triangle(), &settings).unwrap();
        session
            .add_shape(vec![Point::new(10, 10), Point::new(15, 10), Point::new(10, 15)], &settings)
            .unwrap();
        session.canvas_mut().clear();

        let err = session.shift_shape(3, 1, 1, &settings).unwrap_err();
        assert_eq!(err, GridError::ShapeIndexOutOfBounds { index: 3, len: 2 });
        assert!(session.canvas().is_empty());
        assert_eq!(session.store().shape(0).unwrap().points(), &triangle()[..]);
    }

    #[test]
    fn test_scale_by_zero_rejected_before_erase() {
        let mut session = recording(20, 20);
        let settings = ToolSettings::default();
        session.add_shape(triangle(), &settings).unwrap();
        session.canvas_mut().clear();
        assert_eq!(
            session.scale_shape(0, 0.0, &settings),
            Err(GridError::NonPositiveScaleFactor(0.0))
        );
        assert!(session.canvas().is_empty());
    }

    #[test]
    fn test_shift_past_coordinate_range_is_noop() {
        let mut session = recording(20, 20);
        let settings = ToolSettings::default();
        session.add_shape(triangle(), &settings).unwrap();
        session.canvas_mut().clear();

        let err = session.shift_shape(0, i32::MAX, 0, &settings).unwrap_err();
        assert_eq!(
            err,
            GridError::CoordinateOverflow {
                x: i32::MAX as i64 + 2,
                y: 2,
            }
        );
        assert!(session.canvas().is_empty());
        assert_eq!(session.store().shape(0).unwrap().points(), &triangle()[..]);
    }

    #[test]
    fn test_transform_erases_then_redraws() {
        let mut session = recording(20, 20);
        let settings = ToolSettings::default();
        session.add_shape(triangle(), &settings).unwrap();
        session.canvas_mut().clear();

        session.shift_shape(0, 1, 0, &settings).unwrap();
        let calls = session.canvas();
        let first_fg = calls
            .iter()
            .position(|(_, c)| *c == Rgba8::BLACK)
            .unwrap();
        assert!(first_fg > 0);
        assert!(calls[..first_fg].iter().all(|(_, c)| *c == Rgba8::BACKGROUND));
        assert!(calls[first_fg..].iter().all(|(_, c)| *c == Rgba8::BLACK));
        assert_eq!(
            session.store().shape(0).unwrap().points(),
            &[Point::new(3, 2), Point::new(9, 2), Point::new(3, 8)][..]
        );
    }

    #[test]
    fn test_transform_on_grid_canvas() {
        let mut session = Session::new(GridConfig::new(20, 20), GridCanvas::new(GridConfig::new(20, 20)));
        let settings = ToolSettings::default();
        session.add_shape(triangle(), &settings).unwrap();
        session.mirror_shape_y(0, &settings).unwrap();
        // cy = 4, so y' = 8 - y
        let shape = session.store().shape(0).unwrap().points().to_vec();
        assert_eq!(shape, vec![Point::new(2, 6), Point::new(8, 6), Point::new(2, 0)]);
        let canvas = session.canvas();
        assert_eq!(canvas.pixel(8, 6), Some(Rgba8::BLACK));
        assert_eq!(canvas.pixel(8, 2), Some(Rgba8::BACKGROUND));
    }

    #[test]
    fn test_circle_from_selection() {
        let mut session = recording(40, 40);
        let settings = ToolSettings::default();
        assert_eq!(
            session.create_circle_from_selection(&settings),
            Err(GridError::IncompleteCircle { count: 0 })
        );
        session.click(Point::new(20, 20), &settings);
        session.click(Point::new(25, 20), &settings);
        session.canvas_mut().clear();
        assert_eq!(session.create_circle_from_selection(&settings), Ok(0));
        let calls = session.canvas();
        assert_eq!(calls[0], (Point::new(20, 20), Rgba8::BACKGROUND));
        assert_eq!(calls[1], (Point::new(25, 20), Rgba8::BACKGROUND));
        for p in [(25, 20), (15, 20), (20, 25), (20, 15)] {
            assert!(calls[2..].contains(&(Point::new(p.0, p.1), Rgba8::BLACK)));
        }
        assert_eq!(session.store().circles()[0].radius, 5.0);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_clip_segment_draws_background() {
        let mut session = recording(10, 10);
        let got = session.clip_segment(
            Point::new(-5, 5),
            Point::new(5, 5),
            ClipAlgorithm::LiangBarsky,
        );
        assert_eq!(got, Some((Point::new(0, 5), Point::new(5, 5))));
        assert_eq!(session.canvas().len(), 6);
        assert!(session.canvas().iter().all(|(_, c)| *c == Rgba8::BACKGROUND));
    }

    #[test]
    fn test_clip_segment_outside_draws_nothing() {
        let mut session = recording(10, 10);
        let got = session.clip_segment(
            Point::new(-5, -5),
            Point::new(-1, -8),
            ClipAlgorithm::CohenSutherland,
        );
        assert_eq!(got, None);
        assert!(session.canvas().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new(GridConfig::new(5, 5), GridCanvas::new(GridConfig::new(5, 5)));
        let settings = ToolSettings::default();
        session
            .add_shape(vec![Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)], &settings)
            .unwrap();
        session.add_circle(Circle::new(Point::new(2, 2), 1.0), Rgba8::RED);
        session.click(Point::new(3, 3), &settings);
        session.clear();
        assert!(session.canvas().painted().is_empty());
        assert_eq!(session.store().shape_count(), 0);
        assert!(session.store().circles().is_empty());
        assert!(session.selection().is_empty());
    }
}
