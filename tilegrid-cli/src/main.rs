//! tilegrid CLI - Command-line interface
//!
//! Renders labelled Web Mercator tile grids around a point and prints tile
//! coordinates and bounds.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::RenderFlags;
use commands::config::ConfigCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Debug, Parser)]
#[command(name = "tilegrid", version, about = "Web Mercator (XYZ) tile grids around a point")]
#[command(after_help = "Examples:\n  \
    tilegrid render --lat 53.1959 --lon 50.1008 --zooms 12 13 14 --grid 3 --out ./out\n  \
    tilegrid render --lat 59.9386 --lon 30.3141 --zooms 12 --grid 5 --tile-size 256 --out ./out_spb\n  \
    tilegrid project --lat 53.1959 --lon 50.1008 --zoom 12")]
struct Cli {
    /// Use this configuration file instead of ~/.tilegrid/config.ini
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render an N×N tile grid around a point for each zoom level
    Render {
        /// Latitude in degrees (WGS84), within ±85.0511
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees (WGS84), within [-180, 180]
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Zoom levels to render, e.g. 12 13 14
        #[arg(long, num_args = 1.., required = true)]
        zooms: Vec<u8>,

        /// Grid size (odd number, at most 99) [config: grid.size, default 3]
        #[arg(long)]
        grid: Option<u32>,

        /// Tile size in pixels, 8..2048 [config: grid.tile_size, default 256]
        #[arg(long)]
        tile_size: Option<u32>,

        /// Output directory [config: output.directory, default ./out]
        #[arg(long)]
        out: Option<PathBuf>,

        /// Font file for labels [config: render.font]
        #[arg(long)]
        font: Option<PathBuf>,

        /// Do not print tile bounds under each label
        #[arg(long)]
        no_bounds: bool,
    },

    /// Print the tile and pixel offset containing a point
    Project {
        /// Latitude in degrees (WGS84)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees (WGS84)
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Zoom level (0-22)
        #[arg(long)]
        zoom: u8,

        /// Tile size in pixels [config: grid.tile_size]
        #[arg(long)]
        tile_size: Option<u32>,
    },

    /// Print the geographic bounds of a tile
    Bounds {
        /// Tile column
        #[arg(long)]
        x: u32,

        /// Tile row
        #[arg(long)]
        y: u32,

        /// Zoom level (0-22)
        #[arg(long)]
        zoom: u8,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Config { action } => commands::config::run(action, cli.config_path),
        Commands::Render {
            lat,
            lon,
            zooms,
            grid,
            tile_size,
            out,
            font,
            no_bounds,
        } => {
            let runner = CliRunner::new(cli.config_path)?;
            commands::render::run(
                &runner,
                commands::render::RenderArgs {
                    lat,
                    lon,
                    zooms,
                    flags: RenderFlags {
                        grid,
                        tile_size,
                        font,
                        no_bounds,
                    },
                    out,
                },
            )
        }
        Commands::Project {
            lat,
            lon,
            zoom,
            tile_size,
        } => {
            let runner = CliRunner::new(cli.config_path)?;
            commands::project::run(
                &runner,
                commands::project::ProjectArgs {
                    lat,
                    lon,
                    zoom,
                    tile_size,
                },
            )
        }
        Commands::Bounds { x, y, zoom } => {
            let runner = CliRunner::new(cli.config_path)?;
            commands::bounds::run(&runner, x, y, zoom)
        }
    }
}
