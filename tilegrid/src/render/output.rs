//! Batch rendering of several zoom levels to PNG files.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use rayon::prelude::*;

use super::{GridRenderer, RenderError};
use crate::coord::{GeoPoint, TilePosition};

/// A grid image that was written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedGrid {
    pub path: PathBuf,
    pub position: TilePosition,
}

/// Result of rendering one zoom level.
#[derive(Debug)]
pub struct ZoomOutcome {
    pub zoom: u8,
    pub result: Result<SavedGrid, RenderError>,
}

impl ZoomOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// File name used for a zoom level's image: `<out_dir>/grid_z<zoom>.png`.
pub fn output_path(out_dir: &Path, zoom: u8) -> PathBuf {
    out_dir.join(format!("grid_z{}.png", zoom))
}

/// Render and save one image per zoom level.
///
/// Zoom levels are rendered in parallel. The returned outcomes follow the
/// order of `zooms`, and a failure at one zoom level does not prevent the
/// others from being written.
///
/// # Errors
///
/// Returns `RenderError::CreateDir` if `out_dir` cannot be created; per-zoom
/// failures are reported in the outcomes instead.
pub fn render_zooms(
    renderer: &GridRenderer,
    point: GeoPoint,
    zooms: &[u8],
    out_dir: &Path,
) -> Result<Vec<ZoomOutcome>, RenderError> {
    std::fs::create_dir_all(out_dir).map_err(|source| RenderError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let outcomes = zooms
        .par_iter()
        .map(|&zoom| ZoomOutcome {
            zoom,
            result: render_one(renderer, point, zoom, out_dir),
        })
        .collect::<Vec<_>>();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    tracing::info!(
        total = outcomes.len(),
        failed,
        out_dir = %out_dir.display(),
        "Grid rendering finished"
    );

    Ok(outcomes)
}

fn render_one(
    renderer: &GridRenderer,
    point: GeoPoint,
    zoom: u8,
    out_dir: &Path,
) -> Result<SavedGrid, RenderError> {
    let rendered = renderer.render(point, zoom)?;
    let path = output_path(out_dir, zoom);

    rendered
        .image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| RenderError::Save {
            path: path.clone(),
            source,
        })?;

    tracing::info!(zoom, path = %path.display(), "Saved tile grid");

    Ok(SavedGrid {
        path,
        position: *rendered.position(),
    })
}
