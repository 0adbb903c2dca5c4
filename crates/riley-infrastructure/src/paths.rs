//! Path management for Riley configuration files.
//!
//! ```text
//! ~/.config/riley/             # Config directory (platform config dir)
//! └── config.toml              # Settings
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for riley_core::RileyError {
    fn from(err: PathError) -> Self {
        riley_core::RileyError::config(err.to_string())
    }
}

pub struct RileyPaths;

impl RileyPaths {
    const APP_DIR: &'static str = "riley";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Returns the Riley configuration directory (e.g., `~/.config/riley/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(Self::CONFIG_FILE))
    }
}
