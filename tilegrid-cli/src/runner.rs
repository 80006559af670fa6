//! Shared command setup: configuration loading and logging.

use std::path::PathBuf;

use tilegrid::config::ConfigFile;
use tilegrid::logging::{init_logging, WorkerGuard};

use crate::error::CliError;

/// Loaded configuration plus the logging guard for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load configuration (from `config_path` or the default location)
    /// and install logging.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(&path)?,
            None => ConfigFile::load()?,
        };
        let log_guard = init_logging(&config.logging)?;
        Ok(Self {
            config,
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Record which command is running.
    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            command,
            version = tilegrid::VERSION,
            "tilegrid starting"
        );
    }
}
