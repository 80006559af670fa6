//! Layout of an N×N neighbourhood of tiles around a projected point.
//!
//! The grid is pure geometry: which tile sits in which cell, where the
//! point's marker goes, and what each cell should be labelled. Drawing is
//! left to [`crate::render`].
//!
//! Columns wrap around the antimeridian, so a grid centred on the last
//! column shows column 0 to its right. Rows do not wrap: cells above row 0
//! or below the last row are off the map and carry no tile.

use thiserror::Error;

use crate::coord::{tiles_per_axis, CoordError, TileBounds, TileCoord, TilePosition};

/// Largest canvas edge, in pixels, a grid may span.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

/// Errors that can occur while laying out a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Grid size must be a positive odd number so the point's tile is centred.
    #[error("Invalid grid size: {0} (must be a positive odd number, e.g. 3 or 5)")]
    InvalidSize(u32),

    /// `size × tile_size` exceeds [`MAX_CANVAS_SIZE`].
    #[error(
        "Grid of {size} tiles at {tile_size} px is too large (canvas limit is {} px per side)",
        MAX_CANVAS_SIZE
    )]
    CanvasTooLarge { size: u32, tile_size: u32 },

    /// Bounds lookup for a cell failed.
    #[error(transparent)]
    Coord(#[from] CoordError),
}

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Cell column within the grid (0 = left).
    pub column: u32,
    /// Cell row within the grid (0 = top).
    pub row: u32,
    /// Tile column before wrapping, relative to the world grid.
    pub raw_x: i64,
    /// Tile row, which may fall outside the map.
    pub raw_y: i64,
    /// The tile shown in this cell, or `None` if the row is off the map.
    pub tile: Option<TileCoord>,
}

impl GridCell {
    /// Whether the cell shows a real tile.
    pub fn is_on_map(&self) -> bool {
        self.tile.is_some()
    }

    /// Bounds of the tile in this cell, if it is on the map.
    pub fn bounds(&self) -> Result<Option<TileBounds>, CoordError> {
        self.tile.map(|tile| tile.bounds()).transpose()
    }

    /// Label lines for this cell.
    ///
    /// The first line is `X=<x>  Y=<y>`, the second `Z=<z>`. Off-map cells
    /// show their raw row so the neighbourhood still reads naturally.
    pub fn label(&self, zoom: u8) -> Vec<String> {
        let x = self.tile.map_or(self.raw_x, |t| i64::from(t.x));
        let mut lines = vec![format!("X={}  Y={}", x, self.raw_y), format!("Z={}", zoom)];
        if !self.is_on_map() {
            lines.push("(off map)".to_string());
        }
        lines
    }
}

/// An odd-sized square of tiles centred on a projected point.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    size: u32,
    center: TilePosition,
    cells: Vec<GridCell>,
}

impl TileGrid {
    /// Lay out a `size`×`size` grid around `position`.
    ///
    /// # Errors
    ///
    /// `GridError::InvalidSize` if `size` is zero or even, and
    /// `GridError::CanvasTooLarge` if the canvas would exceed
    /// [`MAX_CANVAS_SIZE`] pixels per side.
    pub fn around(position: &TilePosition, size: u32) -> Result<Self, GridError> {
        if size == 0 || size % 2 == 0 {
            return Err(GridError::InvalidSize(size));
        }
        canvas_size(size, position.tile_size)?;

        let half = i64::from(size / 2);
        let n = i64::from(tiles_per_axis(position.tile.zoom));
        let center_x = i64::from(position.tile.x);
        let center_y = i64::from(position.tile.y);

        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |column| (column, row)))
            .map(|(column, row)| {
                let raw_x = center_x + i64::from(column) - half;
                let raw_y = center_y + i64::from(row) - half;
                let tile = (0..n).contains(&raw_y).then(|| TileCoord {
                    x: raw_x.rem_euclid(n) as u32,
                    y: raw_y as u32,
                    zoom: position.tile.zoom,
                });
                GridCell {
                    column,
                    row,
                    raw_x,
                    raw_y,
                    tile,
                }
            })
            .collect();

        Ok(Self {
            size,
            center: *position,
            cells,
        })
    }

    /// Number of cells along one side.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The projected point the grid is centred on.
    pub fn center(&self) -> &TilePosition {
        &self.center
    }

    /// Tile size in pixels.
    pub fn tile_size(&self) -> u32 {
        self.center.tile_size
    }

    /// Canvas edge length in pixels.
    ///
    /// Never exceeds [`MAX_CANVAS_SIZE`]; `around` rejects larger grids.
    pub fn pixel_size(&self) -> u32 {
        self.size * self.center.tile_size
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell at grid position (`column`, `row`).
    pub fn cell(&self, column: u32, row: u32) -> Option<&GridCell> {
        if column >= self.size || row >= self.size {
            return None;
        }
        self.cells.get((row * self.size + column) as usize)
    }

    /// Pixel position of the projected point on the grid canvas.
    pub fn marker(&self) -> (u32, u32) {
        let origin = (self.size / 2) * self.center.tile_size;
        (
            origin + self.center.offset.px,
            origin + self.center.offset.py,
        )
    }

    /// Top-left pixel of a cell on the grid canvas.
    pub fn cell_origin(&self, cell: &GridCell) -> (u32, u32) {
        let ts = self.center.tile_size;
        (cell.column * ts, cell.row * ts)
    }
}

/// Canvas edge length for `size` cells of `tile_size` pixels.
///
/// # Errors
///
/// `GridError::CanvasTooLarge` on overflow or when the edge exceeds
/// [`MAX_CANVAS_SIZE`].
pub fn canvas_size(size: u32, tile_size: u32) -> Result<u32, GridError> {
    size.checked_mul(tile_size)
        .filter(|&side| side <= MAX_CANVAS_SIZE)
        .ok_or(GridError::CanvasTooLarge { size, tile_size })
}
