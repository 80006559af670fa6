//! Common argument validation and setting resolution shared across commands.

use std::path::PathBuf;

use tilegrid::config::ConfigFile;
use tilegrid::coord::{GeoPoint, MAX_ZOOM};
use tilegrid::grid::{canvas_size, MAX_CANVAS_SIZE};
use tilegrid::render::RenderOptions;

use crate::error::CliError;

/// Tile sizes accepted on the command line.
pub const MIN_TILE_SIZE: u32 = 8;
pub const MAX_TILE_SIZE: u32 = 2048;

/// Largest grid accepted on the command line.
pub const MAX_GRID_SIZE: u32 = 99;

/// Reject a point that cannot be projected.
pub fn validate_point(lat: f64, lon: f64) -> Result<GeoPoint, CliError> {
    let point = GeoPoint::new(lat, lon);
    point.validate()?;
    Ok(point)
}

/// Grid size must be a positive odd number no larger than [`MAX_GRID_SIZE`].
pub fn validate_grid(grid: u32) -> Result<u32, CliError> {
    if grid == 0 || grid % 2 == 0 {
        return Err(CliError::InvalidArgument(format!(
            "--grid must be a positive odd number (e.g. 3 or 5), got {}",
            grid
        )));
    }
    if grid > MAX_GRID_SIZE {
        return Err(CliError::InvalidArgument(format!(
            "--grid must be at most {}, got {}",
            MAX_GRID_SIZE, grid
        )));
    }
    Ok(grid)
}

/// The whole canvas must fit within the renderer's pixel limit.
pub fn validate_canvas(grid: u32, tile_size: u32) -> Result<u32, CliError> {
    canvas_size(grid, tile_size).map_err(|_| {
        CliError::InvalidArgument(format!(
            "--grid {} with --tile-size {} exceeds {} px per side",
            grid, tile_size, MAX_CANVAS_SIZE
        ))
    })
}

pub fn validate_tile_size(tile_size: u32) -> Result<u32, CliError> {
    if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&tile_size) {
        return Err(CliError::InvalidArgument(format!(
            "--tile-size must be in [{}..{}], got {}",
            MIN_TILE_SIZE, MAX_TILE_SIZE, tile_size
        )));
    }
    Ok(tile_size)
}

/// Every zoom must be in range, and at least one must be given.
pub fn validate_zooms(zooms: &[u8]) -> Result<(), CliError> {
    if zooms.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one zoom level is required".to_string(),
        ));
    }
    if let Some(bad) = zooms.iter().find(|&&z| z > MAX_ZOOM) {
        return Err(CliError::InvalidArgument(format!(
            "zoom levels must be in [0..{}], got {}",
            MAX_ZOOM, bad
        )));
    }
    Ok(())
}

/// Render-related flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RenderFlags {
    pub grid: Option<u32>,
    pub tile_size: Option<u32>,
    pub font: Option<PathBuf>,
    pub no_bounds: bool,
}

/// Resolve render options from CLI flags and config.
///
/// CLI takes precedence, then config. The result is validated.
pub fn resolve_render_options(
    flags: &RenderFlags,
    config: &ConfigFile,
) -> Result<RenderOptions, CliError> {
    let grid = validate_grid(flags.grid.unwrap_or(config.grid.size))?;
    let tile_size = validate_tile_size(flags.tile_size.unwrap_or(config.grid.tile_size))?;
    validate_canvas(grid, tile_size)?;
    let font_path = flags.font.clone().or_else(|| config.render.font.clone());

    Ok(RenderOptions {
        grid_size: grid,
        tile_size,
        show_bounds: config.render.show_bounds && !flags.no_bounds,
        font_path,
    })
}

/// Resolve the output directory from CLI flag and config.
pub fn resolve_out_dir(cli_out: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    cli_out.unwrap_or_else(|| config.output.directory.clone())
}
