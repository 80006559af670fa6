//! Render command - draw tile grids around a point for several zoom levels.

use std::path::PathBuf;

use tilegrid::render::{render_zooms, GridRenderer, ZoomOutcome};

use super::common::{resolve_out_dir, resolve_render_options, validate_point, validate_zooms, RenderFlags};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the render command.
pub struct RenderArgs {
    pub lat: f64,
    pub lon: f64,
    pub zooms: Vec<u8>,
    pub flags: RenderFlags,
    pub out: Option<PathBuf>,
}

/// Run the render command.
///
/// All arguments are validated before anything is drawn. Each zoom level
/// reports its own success or failure line; the command fails if any did.
pub fn run(runner: &CliRunner, args: RenderArgs) -> Result<(), CliError> {
    runner.log_startup("render");
    let config = runner.config();

    let point = validate_point(args.lat, args.lon)?;
    validate_zooms(&args.zooms)?;
    let options = resolve_render_options(&args.flags, config)?;
    let out_dir = resolve_out_dir(args.out, config);

    let renderer = GridRenderer::new(options)?;
    if !renderer.has_font() {
        println!("Note: no usable font found, images will have no text labels");
    }

    let outcomes = render_zooms(&renderer, point, &args.zooms, &out_dir)?;
    for outcome in &outcomes {
        println!("{}", format_outcome(outcome));
    }

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        return Err(CliError::RenderFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

/// One status line per zoom level.
pub fn format_outcome(outcome: &ZoomOutcome) -> String {
    match &outcome.result {
        Ok(saved) => format!(
            "[OK] Z={}: saved {} | tile=({},{}) px=({},{})",
            outcome.zoom,
            saved.path.display(),
            saved.position.tile.x,
            saved.position.tile.y,
            saved.position.offset.px,
            saved.position.offset.py
        ),
        Err(e) => format!("[ERROR] Z={}: {}", outcome.zoom, e),
    }
}
