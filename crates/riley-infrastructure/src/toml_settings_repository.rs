//! TOML-backed settings repository.

use std::path::PathBuf;

use async_trait::async_trait;
use riley_core::settings::{Settings, SettingsRepository};
use riley_core::{Mode, Result, RileyError};
use tracing::{debug, warn};

use crate::dto::SettingsDto;
use crate::paths::RileyPaths;

/// Environment variable that overrides the configured default mode.
pub const MODE_ENV_VAR: &str = "RILEY_MODE";

/// Reads settings from `config.toml`.
///
/// A missing or empty file yields the defaults. `RILEY_MODE` is applied on
/// top of whatever the file says.
#[derive(Debug, Clone)]
pub struct TomlSettingsRepository {
    path: PathBuf,
}

impl TomlSettingsRepository {
    /// Repository for the default location (`~/.config/riley/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(RileyPaths::config_file()?))
    }

    /// Repository for an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the file without applying environment overrides.
    pub async fn load_file(&self) -> Result<Settings> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RileyError::io(format!(
                "Failed to read settings file at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        parse_settings(&content)
    }
}

#[async_trait]
impl SettingsRepository for TomlSettingsRepository {
    async fn load(&self) -> Result<Settings> {
        let settings = self.load_file().await?;
        Ok(apply_mode_override(
            settings,
            std::env::var(MODE_ENV_VAR).ok().as_deref(),
        ))
    }
}

/// Parses the contents of a settings file.
pub fn parse_settings(content: &str) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let dto: SettingsDto = toml::from_str(content)?;
    Settings::try_from(dto)
}

/// Renders settings in the same format the file uses.
pub fn render_settings(settings: &Settings) -> Result<String> {
    Ok(toml::to_string_pretty(&SettingsDto::from(settings))?)
}

/// Replaces the default mode when the override names a valid mode.
///
/// Invalid values are ignored.
pub fn apply_mode_override(mut settings: Settings, mode_override: Option<&str>) -> Settings {
    if let Some(value) = mode_override {
        match Mode::parse(value) {
            Ok(mode) => {
                debug!(%mode, "Default mode overridden from {}", MODE_ENV_VAR);
                settings.default_mode = mode;
            }
            Err(e) => warn!("Ignoring {}: {}", MODE_ENV_VAR, e),
        }
    }
    settings
}
