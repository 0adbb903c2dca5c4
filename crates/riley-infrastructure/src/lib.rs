pub mod dto;
pub mod paths;
pub mod toml_settings_repository;

pub use paths::RileyPaths;
pub use toml_settings_repository::{
    MODE_ENV_VAR, TomlSettingsRepository, apply_mode_override, parse_settings, render_settings,
};
