//! User settings domain model and repository trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::error::Result;
use crate::mode::Mode;

/// Which mocked tools the console may dispatch to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowedTools {
    pub invention: bool,
    pub web_search: bool,
    pub wiki: bool,
    pub github: bool,
    pub equation: bool,
    pub auto_repair: bool,
}

impl Default for AllowedTools {
    fn default() -> Self {
        Self {
            invention: true,
            web_search: true,
            wiki: true,
            github: true,
            equation: true,
            auto_repair: true,
        }
    }
}

impl AllowedTools {
    /// Whether the tool behind an action kind is enabled.
    ///
    /// Search is served by the web search tool.
    pub fn permits(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Invention => self.invention,
            ActionKind::Equation => self.equation,
            ActionKind::Search => self.web_search,
            ActionKind::Github => self.github,
            ActionKind::Repair => self.auto_repair,
        }
    }

    /// Names of the enabled tools, in declaration order.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("invention", self.invention),
            ("web_search", self.web_search),
            ("wiki", self.wiki),
            ("github", self.github),
            ("equation", self.equation),
            ("auto_repair", self.auto_repair),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

/// Console settings loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub default_mode: Mode,
    pub voice_enabled: bool,
    pub allow_self_editing: bool,
    pub allowed_tools: AllowedTools,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: Mode::Assistant,
            voice_enabled: false,
            allow_self_editing: false,
            allowed_tools: AllowedTools::default(),
        }
    }
}

/// Source of [`Settings`].
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads settings, falling back to defaults when nothing is configured.
    async fn load(&self) -> Result<Settings>;
}
