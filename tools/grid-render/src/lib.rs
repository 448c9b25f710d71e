//! Helpers for the grid-render command-line tool: argument parsing and
//! BMP output.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use raster_grid::{GridCanvas, Point, ShapeTransform};

/// Parse `"x,y"` into a grid point.
pub fn parse_point(s: &str) -> Result<Point> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected \"x,y\", got {:?}", s))?;
    let x = x.trim().parse().with_context(|| format!("bad x in {:?}", s))?;
    let y = y.trim().parse().with_context(|| format!("bad y in {:?}", s))?;
    Ok(Point::new(x, y))
}

/// Parse a transform: `shift:dx,dy`, `rotate:deg`, `scale:f`, `mirror-x`
/// or `mirror-y`.
pub fn parse_transform(s: &str) -> Result<ShapeTransform> {
    let (name, arg) = match s.split_once(':') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (s.trim(), None),
    };
    let t = match (name, arg) {
        ("shift", Some(arg)) => {
            let d = parse_point(arg)?;
            ShapeTransform::Shift { dx: d.x, dy: d.y }
        }
        ("rotate", Some(arg)) => ShapeTransform::Rotate {
            degrees: arg.parse().with_context(|| format!("bad angle {:?}", arg))?,
        },
        ("scale", Some(arg)) => ShapeTransform::Scale {
            factor: arg.parse().with_context(|| format!("bad factor {:?}", arg))?,
        },
        ("mirror-x", None) => ShapeTransform::MirrorX,
        ("mirror-y", None) => ShapeTransform::MirrorY,
        _ => bail!("unknown transform {:?}", s),
    };
    t.validate()?;
    Ok(t)
}

/// Encode the canvas as a 32-bit top-down BMP, each cell `cell_size`
/// pixels square.
pub fn encode_bmp(canvas: &GridCanvas, cell_size: u32) -> Vec<u8> {
    let cell_size = cell_size.max(1);
    let w = canvas.cols() * cell_size;
    let h = canvas.rows() * cell_size;
    let rgba = canvas.to_rgba_scaled(cell_size);
    let row_size = w * 4;
    let image_size = row_size * h;
    let file_size = 14 + 40 + image_size;

    let mut out = Vec::with_capacity(file_size as usize);

    // BMP file header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(14u32 + 40).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(w as i32).to_le_bytes());
    out.extend_from_slice(&(-(h as i32)).to_le_bytes()); // top-down
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    // RGBA -> BGRA
    for px in rgba.chunks_exact(4) {
        out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
    }
    out
}

pub fn save_bmp(path: &Path, canvas: &GridCanvas, cell_size: u32) -> io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(&encode_bmp(canvas, cell_size))
}
