use raster_grid::{
    ClipAlgorithm, GridCanvas, GridConfig, LineAlgorithm, Point, Rgba8, Session, ShapeTransform,
    ToolSettings,
};
use wasm_bindgen::prelude::*;

/// Map a key press to a transform of the most recent shape.
///
/// Arrows shift by one cell (up is -y); Ctrl+Up/Down rotate by the
/// configured step; `+`/`-` scale by the factor or its reciprocal;
/// `x`/`y` mirror.
pub fn key_transform(key: &str, ctrl: bool, settings: &ToolSettings) -> Option<ShapeTransform> {
    let t = match (key, ctrl) {
        ("ArrowUp", true) => ShapeTransform::Rotate {
            degrees: settings.rotation_degrees,
        },
        ("ArrowDown", true) => ShapeTransform::Rotate {
            degrees: -settings.rotation_degrees,
        },
        ("ArrowUp", false) => ShapeTransform::Shift { dx: 0, dy: -1 },
        ("ArrowDown", false) => ShapeTransform::Shift { dx: 0, dy: 1 },
        ("ArrowLeft", _) => ShapeTransform::Shift { dx: -1, dy: 0 },
        ("ArrowRight", _) => ShapeTransform::Shift { dx: 1, dy: 0 },
        ("+", _) => ShapeTransform::Scale {
            factor: settings.scale_factor,
        },
        ("-", _) => ShapeTransform::Scale {
            factor: 1.0 / settings.scale_factor,
        },
        ("x" | "X", _) => ShapeTransform::MirrorX,
        ("y" | "Y", _) => ShapeTransform::MirrorY,
        _ => return None,
    };
    Some(t)
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// One grid and its shapes, driven from the page.
///
/// The page resolves its controls into calls on the `set_*` methods and
/// copies [`GridSession::render`] into an `ImageData` after each event.
#[wasm_bindgen]
pub struct GridSession {
    session: Session<GridCanvas>,
    settings: ToolSettings,
}

#[wasm_bindgen]
impl GridSession {
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32) -> GridSession {
        let config = GridConfig::new(rows, cols);
        GridSession {
            session: Session::new(config, GridCanvas::new(config)),
            settings: ToolSettings::default(),
        }
    }

    pub fn rows(&self) -> u32 {
        self.session.config().rows
    }

    pub fn cols(&self) -> u32 {
        self.session.config().cols
    }

    pub fn set_line_algorithm(&mut self, name: &str) -> Result<(), JsValue> {
        self.settings.line_algorithm = name.parse::<LineAlgorithm>().map_err(js_error)?;
        Ok(())
    }

    pub fn set_clip_algorithm(&mut self, name: &str) -> Result<(), JsValue> {
        self.settings.clip_algorithm = name.parse::<ClipAlgorithm>().map_err(js_error)?;
        Ok(())
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), JsValue> {
        self.settings.color = color.parse::<Rgba8>().map_err(js_error)?;
        Ok(())
    }

    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.settings.rotation_degrees = degrees;
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.settings.scale_factor = factor;
    }

    /// Click on a cell. Returns the index of a shape committed by the
    /// close-loop gesture.
    pub fn click(&mut self, x: i32, y: i32) -> Option<u32> {
        self.session
            .click(Point::new(x, y), &self.settings)
            .map(|i| i as u32)
    }

    pub fn connect(&mut self) -> Result<u32, JsValue> {
        self.session
            .connect_selection(&self.settings)
            .map(|i| i as u32)
            .map_err(js_error)
    }

    pub fn create_circle(&mut self) -> Result<u32, JsValue> {
        self.session
            .create_circle_from_selection(&self.settings)
            .map(|i| i as u32)
            .map_err(js_error)
    }

    /// Clip a segment against the grid with the selected algorithm.
    /// Returns `[x0, y0, x1, y1]`, or an empty array when rejected.
    pub fn clip(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> js_sys::Int32Array {
        let clipped = self.session.clip_segment(
            Point::new(x0, y0),
            Point::new(x1, y1),
            self.settings.clip_algorithm,
        );
        match clipped {
            Some((a, b)) => js_sys::Int32Array::from(&[a.x, a.y, b.x, b.y][..]),
            None => js_sys::Int32Array::new_with_length(0),
        }
    }

    /// Apply the transform bound to `key` to the most recent shape.
    /// Returns `false` when the key is unbound or no shape exists.
    pub fn key_down(&mut self, key: &str, ctrl: bool) -> Result<bool, JsValue> {
        let Some(transform) = key_transform(key, ctrl, &self.settings) else {
            return Ok(false);
        };
        let Some(index) = self.session.store().last_index() else {
            return Ok(false);
        };
        self.session
            .transform_shape(index, transform, &self.settings)
            .map_err(js_error)?;
        Ok(true)
    }

    pub fn shape_count(&self) -> u32 {
        self.session.store().shape_count() as u32
    }

    /// Flat `[x0, y0, x1, y1, ...]` of the shape at `index`.
    pub fn shape_points(&self, index: usize) -> Result<js_sys::Int32Array, JsValue> {
        let shape = self.session.store().shape(index).map_err(js_error)?;
        let flat: Vec<i32> = shape.points().iter().flat_map(|p| [p.x, p.y]).collect();
        Ok(js_sys::Int32Array::from(&flat[..]))
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// RGBA bytes, one pixel per cell (`rows * cols * 4`).
    pub fn render(&self) -> Vec<u8> {
        self.session.canvas().to_rgba()
    }
}

/// Get the library version string.
#[wasm_bindgen]
pub fn version() -> String {
    format!("raster-grid {}", env!("CARGO_PKG_VERSION"))
}
