//! CLI error type.

use std::fmt;

use tilegrid::config::ConfigError;
use tilegrid::coord::CoordError;
use tilegrid::logging::LoggingError;
use tilegrid::render::RenderError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or saved.
    Config(String),

    /// Logging could not be initialized.
    Logging(LoggingError),

    /// A command-line argument is out of range.
    InvalidArgument(String),

    /// Coordinates or tile indices were rejected.
    Coord(CoordError),

    /// Rendering could not start.
    Render(RenderError),

    /// Some zoom levels failed to render.
    RenderFailed { failed: usize, total: usize },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::Coord(e) => write!(f, "Invalid arguments: {}", e),
            CliError::Render(e) => write!(f, "Rendering failed: {}", e),
            CliError::RenderFailed { failed, total } => {
                write!(f, "{} of {} zoom levels failed to render", failed, total)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Logging(e) => Some(e),
            CliError::Coord(e) => Some(e),
            CliError::Render(e) => Some(e),
            CliError::Config(_) | CliError::InvalidArgument(_) | CliError::RenderFailed { .. } => {
                None
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coord(e)
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Coord(e) => CliError::Coord(e),
            other => CliError::Render(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::InvalidArgument("--grid must be odd".to_string());
        assert_eq!(err.to_string(), "Invalid arguments: --grid must be odd");

        let err = CliError::RenderFailed {
            failed: 1,
            total: 3,
        };
        assert_eq!(err.to_string(), "1 of 3 zoom levels failed to render");
    }

    #[test]
    fn test_render_coord_error_is_unwrapped() {
        let err: CliError = RenderError::Coord(CoordError::InvalidZoom(23)).into();
        assert!(matches!(err, CliError::Coord(CoordError::InvalidZoom(23))));
    }

    #[test]
    fn test_coord_error_has_source() {
        use std::error::Error;
        let err = CliError::Coord(CoordError::InvalidLongitude(181.0));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("181"));
    }
}
