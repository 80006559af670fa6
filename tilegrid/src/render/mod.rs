//! Rasterization of tile grids into PNG images.
//!
//! A [`GridRenderer`] turns a point and a zoom level into an RGB image of
//! the surrounding tiles: grid lines, per-tile labels, a marker at the
//! point, and a two-line header. Images are synthetic placeholders; no
//! map imagery is involved.
//!
//! # Example
//!
//! ```no_run
//! use tilegrid::coord::GeoPoint;
//! use tilegrid::render::{GridRenderer, RenderOptions};
//!
//! let renderer = GridRenderer::new(RenderOptions::default()).unwrap();
//! let rendered = renderer.render(GeoPoint::new(53.1959, 50.1008), 12).unwrap();
//! rendered.image.save("grid_z12.png").unwrap();
//! ```

mod font;
mod output;

pub use font::load_font;
pub use output::{output_path, render_zooms, SavedGrid, ZoomOutcome};

use std::path::PathBuf;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
    draw_text_mut,
};
use imageproc::rect::Rect;
use thiserror::Error;

use crate::coord::{CoordError, GeoPoint, TilePosition, DEFAULT_TILE_SIZE};
use crate::grid::{GridCell, GridError, TileGrid};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const OFF_MAP: Rgb<u8> = Rgb([230, 230, 230]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const MARKER: Rgb<u8> = Rgb([220, 0, 0]);

const LABEL_SCALE: f32 = 14.0;
const HEADER_SCALE: f32 = 18.0;
const LABEL_MARGIN: i32 = 6;
const MARKER_RADIUS: i32 = 4;
/// Distance of the header's first line from the bottom edge.
const HEADER_OFFSET: i32 = 40;

/// Errors that can occur while rendering or saving a grid.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The point or zoom could not be projected.
    #[error(transparent)]
    Coord(#[from] CoordError),

    /// The grid could not be laid out.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A font file could not be read or parsed.
    #[error("Failed to load font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    /// The output directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The image could not be encoded or written.
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Settings for grid rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Cells per side; must be odd.
    pub grid_size: u32,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Add longitude/latitude extents under each tile label.
    pub show_bounds: bool,
    /// Font file for labels. `None` searches the usual system locations.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            grid_size: 3,
            tile_size: DEFAULT_TILE_SIZE,
            show_bounds: true,
            font_path: None,
        }
    }
}

impl RenderOptions {
    /// Set the grid size.
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the tile size.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Enable or disable bounds labels.
    pub fn with_show_bounds(mut self, show_bounds: bool) -> Self {
        self.show_bounds = show_bounds;
        self
    }

    /// Use a specific font file.
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }
}

/// A rendered grid image together with the layout it was drawn from.
#[derive(Debug, Clone)]
pub struct RenderedGrid {
    pub image: RgbImage,
    pub grid: TileGrid,
}

impl RenderedGrid {
    /// The projected point at the centre of the grid.
    pub fn position(&self) -> &TilePosition {
        self.grid.center()
    }
}

/// Draws labelled tile grids.
///
/// The renderer holds its font, so create one and reuse it across zoom
/// levels. It is `Sync` and can be shared between worker threads.
pub struct GridRenderer {
    options: RenderOptions,
    font: Option<FontVec>,
}

impl GridRenderer {
    /// Create a renderer, loading the label font.
    ///
    /// # Errors
    ///
    /// `RenderError::Font` if an explicit font path is configured and
    /// cannot be loaded.
    pub fn new(options: RenderOptions) -> Result<Self, RenderError> {
        let font = load_font(options.font_path.as_deref())?;
        Ok(Self { options, font })
    }

    /// Create a renderer that draws no text.
    pub fn without_labels(options: RenderOptions) -> Self {
        Self {
            options,
            font: None,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Whether labels will be drawn.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render the grid around `point` at `zoom`.
    pub fn render(&self, point: GeoPoint, zoom: u8) -> Result<RenderedGrid, RenderError> {
        let position = point.to_tile_position(zoom, self.options.tile_size)?;
        let grid = TileGrid::around(&position, self.options.grid_size)?;

        let side = grid.pixel_size();
        let mut image = RgbImage::from_pixel(side, side, BACKGROUND);

        self.draw_cells(&mut image, &grid)?;
        draw_grid_lines(&mut image, &grid);

        let (mx, my) = grid.marker();
        let center = (mx as i32, my as i32);
        draw_filled_circle_mut(&mut image, center, MARKER_RADIUS, MARKER);
        draw_hollow_circle_mut(&mut image, center, MARKER_RADIUS, INK);

        self.draw_header(&mut image, point, &position);

        tracing::debug!(
            zoom,
            x = position.tile.x,
            y = position.tile.y,
            px = position.offset.px,
            py = position.offset.py,
            "Rendered tile grid"
        );

        Ok(RenderedGrid { image, grid })
    }

    fn draw_cells(&self, image: &mut RgbImage, grid: &TileGrid) -> Result<(), RenderError> {
        let ts = grid.tile_size();
        let zoom = grid.center().tile.zoom;

        for cell in grid.cells() {
            let (ox, oy) = grid.cell_origin(cell);
            if !cell.is_on_map() {
                draw_filled_rect_mut(
                    image,
                    Rect::at(ox as i32, oy as i32).of_size(ts, ts),
                    OFF_MAP,
                );
            }

            if let Some(font) = &self.font {
                let lines = self.cell_lines(cell, zoom)?;
                draw_lines(
                    image,
                    font,
                    ox as i32 + LABEL_MARGIN,
                    oy as i32 + LABEL_MARGIN,
                    LABEL_SCALE,
                    &lines,
                );
            }
        }
        Ok(())
    }

    fn cell_lines(&self, cell: &GridCell, zoom: u8) -> Result<Vec<String>, CoordError> {
        let mut lines = cell.label(zoom);
        if self.options.show_bounds {
            if let Some(bounds) = cell.bounds()? {
                lines.push(format!("lon {:.4}..{:.4}", bounds.lon_min, bounds.lon_max));
                lines.push(format!("lat {:.4}..{:.4}", bounds.lat_min, bounds.lat_max));
            }
        }
        Ok(lines)
    }

    fn draw_header(&self, image: &mut RgbImage, point: GeoPoint, position: &TilePosition) {
        let Some(font) = &self.font else {
            return;
        };
        let lines = header_lines(point, position);
        let y = image.height() as i32 - HEADER_OFFSET;
        draw_lines(image, font, 10, y, HEADER_SCALE, &lines);
    }
}

/// The two header lines describing the point and its centre tile.
pub fn header_lines(point: GeoPoint, position: &TilePosition) -> [String; 2] {
    [
        format!("Point: {} | Z={}", point, position.tile.zoom),
        format!(
            "Center tile: X={}, Y={} | px={}, py={} (tile_size={})",
            position.tile.x,
            position.tile.y,
            position.offset.px,
            position.offset.py,
            position.tile_size
        ),
    ]
}

/// Draw tile borders, including the closing edge on the last pixel.
fn draw_grid_lines(image: &mut RgbImage, grid: &TileGrid) {
    let side = grid.pixel_size();
    let last = (side - 1) as f32;

    for i in 0..=grid.size() {
        let pos = (i * grid.tile_size()).min(side - 1) as f32;
        draw_line_segment_mut(image, (pos, 0.0), (pos, last), INK);
        draw_line_segment_mut(image, (0.0, pos), (last, pos), INK);
    }
}

fn draw_lines(image: &mut RgbImage, font: &FontVec, x: i32, y: i32, scale: f32, lines: &[String]) {
    let px_scale = PxScale::from(scale);
    let line_height = (scale * 1.2).round() as i32;
    for (i, line) in lines.iter().enumerate() {
        draw_text_mut(image, INK, x, y + i as i32 * line_height, px_scale, font, line);
    }
}
