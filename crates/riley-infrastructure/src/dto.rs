//! On-disk representation of the settings file.
//!
//! Every field is optional so a partial file only overrides what it names.
//! The mode stays a plain string here and is validated on conversion.

use riley_core::settings::{AllowedTools, Settings};
use riley_core::{Mode, RileyError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_self_editing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<AllowedTools>,
}

impl TryFrom<SettingsDto> for Settings {
    type Error = RileyError;

    fn try_from(dto: SettingsDto) -> Result<Self, Self::Error> {
        let defaults = Settings::default();
        let default_mode = match dto.default_mode {
            Some(name) => Mode::parse(&name)?,
            None => defaults.default_mode,
        };

        Ok(Settings {
            default_mode,
            voice_enabled: dto.voice_enabled.unwrap_or(defaults.voice_enabled),
            allow_self_editing: dto
                .allow_self_editing
                .unwrap_or(defaults.allow_self_editing),
            allowed_tools: dto.allowed_tools.unwrap_or(defaults.allowed_tools),
        })
    }
}

impl From<&Settings> for SettingsDto {
    fn from(settings: &Settings) -> Self {
        Self {
            default_mode: Some(settings.default_mode.to_string()),
            voice_enabled: Some(settings.voice_enabled),
            allow_self_editing: Some(settings.allow_self_editing),
            allowed_tools: Some(settings.allowed_tools.clone()),
        }
    }
}
