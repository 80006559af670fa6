//! Bounds command - print the geographic extent of a tile.

use tilegrid::coord::tile_bounds;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the bounds command.
pub fn run(runner: &CliRunner, x: u32, y: u32, zoom: u8) -> Result<(), CliError> {
    runner.log_startup("bounds");
    let bounds = tile_bounds(x, y, zoom)?;

    println!("Tile X={}, Y={}, Z={}", x, y, zoom);
    println!("  lon_min = {:.8}", bounds.lon_min);
    println!("  lon_max = {:.8}", bounds.lon_max);
    println!("  lat_min = {:.8}", bounds.lat_min);
    println!("  lat_max = {:.8}", bounds.lat_max);
    Ok(())
}
