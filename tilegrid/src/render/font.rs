//! Font discovery for grid labels.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

use super::RenderError;

/// Well-known system font locations, tried in order.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load the font used for labels.
///
/// An explicit path must load. Without one, the system candidates are
/// tried and `Ok(None)` means labels will be skipped.
pub fn load_font(explicit: Option<&Path>) -> Result<Option<FontVec>, RenderError> {
    if let Some(path) = explicit {
        return load_font_file(path).map(Some);
    }

    for candidate in SYSTEM_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match load_font_file(path) {
            Ok(font) => {
                tracing::debug!(path = %path.display(), "Loaded label font");
                return Ok(Some(font));
            }
            Err(e) => tracing::debug!(error = %e, "Skipping unusable system font"),
        }
    }

    tracing::warn!("No usable system font found; grid labels will not be drawn");
    Ok(None)
}

fn load_font_file(path: &Path) -> Result<FontVec, RenderError> {
    let data = std::fs::read(path).map_err(|e| RenderError::Font {
        path: PathBuf::from(path),
        reason: e.to_string(),
    })?;
    FontVec::try_from_vec(data).map_err(|e| RenderError::Font {
        path: PathBuf::from(path),
        reason: e.to_string(),
    })
}
