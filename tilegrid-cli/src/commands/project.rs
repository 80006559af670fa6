//! Project command - print the tile and pixel offset for a point.

use tilegrid::coord::{project, TileBounds, TilePosition};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the project command.
pub struct ProjectArgs {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
    pub tile_size: Option<u32>,
}

/// Run the project command.
pub fn run(runner: &CliRunner, args: ProjectArgs) -> Result<(), CliError> {
    runner.log_startup("project");
    let tile_size = args.tile_size.unwrap_or(runner.config().grid.tile_size);

    let position = project(args.lat, args.lon, args.zoom, tile_size)?;
    let bounds = position.tile.bounds()?;

    for line in describe(&position, &bounds) {
        println!("{}", line);
    }
    Ok(())
}

fn describe(position: &TilePosition, bounds: &TileBounds) -> Vec<String> {
    vec![
        format!(
            "Tile:   X={}, Y={}, Z={}",
            position.tile.x, position.tile.y, position.tile.zoom
        ),
        format!(
            "Pixel:  px={}, py={} (tile_size={})",
            position.offset.px, position.offset.py, position.tile_size
        ),
        format!("Bounds: {}", bounds),
    ]
}
