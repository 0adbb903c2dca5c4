//! Tone and source annotations attached to assistant replies.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Emotional register of a reply. Used for both the emotion and style labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Empathetic,
    Analytical,
    Enthusiastic,
    Engaging,
}

/// Which mocked engine produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseSource {
    InventionEngine,
    WikiResearcher,
    GithubLearning,
    AutoRepair,
    ReasoningEngine,
}
