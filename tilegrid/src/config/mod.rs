//! Configuration file support.
//!
//! Settings live in an INI file at `~/.tilegrid/config.ini`:
//!
//! ```ini
//! [grid]
//! size = 3
//! tile_size = 256
//!
//! [output]
//! directory = ./out
//!
//! [render]
//! font = /usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf
//! show_bounds = true
//!
//! [logging]
//! level = warn
//! file = /tmp/tilegrid.log
//! ```
//!
//! Missing keys fall back to defaults. Command-line flags take precedence
//! over anything set here.

mod keys;

pub use keys::ConfigKey;

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::coord::DEFAULT_TILE_SIZE;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or parsed.
    #[error("Failed to load {}: {source}", path.display())]
    Load { path: PathBuf, source: ini::Error },

    /// The file or its directory could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A value could not be parsed for its key.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The key is not a known configuration setting.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// Grid layout settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    pub size: u32,
    pub tile_size: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 3,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./out"),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub font: Option<PathBuf>,
    pub show_bounds: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font: None,
            show_bounds: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Optional log file; stderr is always used.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Typed view of the configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub grid: GridSettings,
    pub output: OutputSettings,
    pub render: RenderSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Build from parsed INI data; unknown sections and keys are ignored.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Convert to INI data, omitting unset optional values.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }

    /// Save to the default location, creating its directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating its parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.to_ini()
            .write_to_file(path)
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Directory holding tilegrid's configuration.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilegrid")
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.ini")
}
