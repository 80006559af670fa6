//! Typed configuration keys for `config get/set/list`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};

/// A single configuration setting, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    GridSize,
    GridTileSize,
    OutputDirectory,
    RenderFont,
    RenderShowBounds,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// All keys, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::GridSize,
            ConfigKey::GridTileSize,
            ConfigKey::OutputDirectory,
            ConfigKey::RenderFont,
            ConfigKey::RenderShowBounds,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::GridSize | ConfigKey::GridTileSize => "grid",
            ConfigKey::OutputDirectory => "output",
            ConfigKey::RenderFont | ConfigKey::RenderShowBounds => "render",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::GridSize => "size",
            ConfigKey::GridTileSize => "tile_size",
            ConfigKey::OutputDirectory => "directory",
            ConfigKey::RenderFont => "font",
            ConfigKey::RenderShowBounds => "show_bounds",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string; empty when an optional value is unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::GridSize => config.grid.size.to_string(),
            ConfigKey::GridTileSize => config.grid.tile_size.to_string(),
            ConfigKey::OutputDirectory => config.output.directory.display().to_string(),
            ConfigKey::RenderFont => optional_path(&config.render.font),
            ConfigKey::RenderShowBounds => config.render.show_bounds.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => optional_path(&config.logging.file),
        }
    }

    /// Parse `value` and store it. An empty value clears optional settings.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::GridSize => config.grid.size = self.parse_positive(value)?,
            ConfigKey::GridTileSize => config.grid.tile_size = self.parse_positive(value)?,
            ConfigKey::OutputDirectory => {
                if value.is_empty() {
                    return Err(self.invalid(value, "directory must not be empty"));
                }
                config.output.directory = PathBuf::from(value);
            }
            ConfigKey::RenderFont => config.render.font = non_empty_path(value),
            ConfigKey::RenderShowBounds => {
                config.render.show_bounds = match value.to_lowercase().as_str() {
                    "true" | "yes" | "1" | "on" => true,
                    "false" | "no" | "0" | "off" => false,
                    _ => return Err(self.invalid(value, "expected true or false")),
                }
            }
            ConfigKey::LoggingLevel => {
                if value.is_empty() {
                    return Err(self.invalid(value, "level must not be empty"));
                }
                config.logging.level = value.to_string();
            }
            ConfigKey::LoggingFile => config.logging.file = non_empty_path(value),
        }
        Ok(())
    }

    fn parse_positive(&self, value: &str) -> Result<u32, ConfigError> {
        match value.parse::<u32>() {
            Ok(0) => Err(self.invalid(value, "must be greater than 0")),
            Ok(v) => Ok(v),
            Err(e) => Err(self.invalid(value, &e.to_string())),
        }
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

fn optional_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}
