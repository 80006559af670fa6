//! tilegrid - Web Mercator tile math and tile-grid rendering
//!
//! The [`coord`] module converts WGS84 points to XYZ tile indices with a
//! pixel offset and converts tile indices back to bounding boxes. The
//! remaining modules lay out, draw and save labelled grids of neighbouring
//! tiles for visual inspection.

pub mod config;
pub mod coord;
pub mod grid;
pub mod logging;
pub mod render;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
