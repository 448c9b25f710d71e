use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use grid_render::{parse_point, parse_transform, save_bmp};
use log::info;
use raster_grid::{
    Circle, ClipAlgorithm, GridCanvas, GridConfig, LineAlgorithm, Point, Rgba8, Session,
    ShapeTransform, ToolSettings,
};

#[derive(Parser)]
#[command(name = "grid-render")]
#[command(about = "Rasterize lines, circles, polygons and clips onto a cell grid")]
struct Cmd {
    #[arg(long, default_value_t = GridConfig::DEFAULT_ROWS)]
    rows: u32,
    #[arg(long, default_value_t = GridConfig::DEFAULT_COLS)]
    cols: u32,
    /// Pixels per cell in BMP output
    #[arg(long, default_value_t = GridConfig::DEFAULT_CELL_SIZE)]
    cell_size: u32,
    /// Foreground colour (`#rrggbb`, `#rgb` or a CSS name)
    #[arg(long, default_value = "black")]
    color: Rgba8,
    /// `dda` or `bresenham`
    #[arg(long, default_value = "bresenham")]
    line: LineAlgorithm,
    /// Write a BMP here instead of printing the grid as text
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a segment
    Line {
        #[arg(value_parser = parse_point)]
        from: Point,
        #[arg(value_parser = parse_point)]
        to: Point,
    },
    /// Draw a circle through `edge`
    Circle {
        #[arg(value_parser = parse_point)]
        center: Point,
        #[arg(value_parser = parse_point)]
        edge: Point,
    },
    /// Draw a closed polygon, then apply transforms in order
    Polygon {
        #[arg(value_parser = parse_point, num_args = 3.., required = true)]
        points: Vec<Point>,
        /// `shift:dx,dy`, `rotate:deg`, `scale:f`, `mirror-x` or `mirror-y`
        #[arg(short, long = "transform", value_parser = parse_transform)]
        transforms: Vec<ShapeTransform>,
    },
    /// Draw a segment, then erase its part inside the grid
    Clip {
        #[arg(value_parser = parse_point)]
        from: Point,
        #[arg(value_parser = parse_point)]
        to: Point,
        /// `cohen` or `liang`
        #[arg(long, default_value = "cohen")]
        algorithm: ClipAlgorithm,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cmd = Cmd::parse();

    if cmd.rows == 0 || cmd.cols == 0 {
        bail!("grid must have at least one row and one column");
    }
    let config = GridConfig::new(cmd.rows, cmd.cols).with_cell_size(cmd.cell_size);
    let settings = ToolSettings::default()
        .with_line_algorithm(cmd.line)
        .with_color(cmd.color);
    let mut session = Session::new(config, GridCanvas::new(config));

    match cmd.action {
        Action::Line { from, to } => session.draw_line(from, to, &settings),
        Action::Circle { center, edge } => {
            session.add_circle(Circle::from_edge(center, edge), settings.color);
        }
        Action::Polygon { points, transforms } => {
            let index = session.add_shape(points, &settings)?;
            for t in transforms {
                session.transform_shape(index, t, &settings)?;
                info!("{} -> {:?}", t, session.store().shape(index)?.points());
            }
        }
        Action::Clip {
            from,
            to,
            algorithm,
        } => {
            session.draw_line(from, to, &settings);
            match session.clip_segment(from, to, algorithm) {
                Some((a, b)) => println!("clipped to ({}, {})-({}, {})", a.x, a.y, b.x, b.y),
                None => println!("rejected"),
            }
        }
    }

    match cmd.output {
        Some(path) => {
            save_bmp(&path, session.canvas(), config.cell_size)?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", session.canvas().to_ascii()),
    }
    Ok(())
}
