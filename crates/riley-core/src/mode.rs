//! Persona modes.
//!
//! A mode is a persona label. It never changes what the router does; it only
//! decides the tone attached to plain-conversation replies.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::RileyError;
use crate::tone::Tone;

/// The fixed set of personas Riley can operate in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// Helpful and supportive
    #[default]
    Assistant,
    /// Highly intellectual and analytical
    Genius,
    /// Creative and innovative
    Inventor,
    /// Curious and informative
    Explorer,
    /// Methodical and precise
    Scientist,
    /// Practical and solution-oriented
    Engineer,
    /// Narrative and engaging
    Storyteller,
    /// Educational and explanatory
    Teacher,
}

impl Mode {
    /// Parses a mode name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, RileyError> {
        name.trim()
            .parse()
            .map_err(|_| RileyError::InvalidMode(name.trim().to_string()))
    }

    /// All modes in display order.
    pub fn all() -> Vec<Mode> {
        Mode::iter().collect()
    }

    /// One-line description of the persona.
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Genius => {
                "Highly intellectual and analytical, focusing on deep insights and complex problem-solving."
            }
            Mode::Inventor => {
                "Creative and innovative, specializing in generating novel ideas and solutions."
            }
            Mode::Explorer => {
                "Curious and informative, focused on discovering and sharing knowledge."
            }
            Mode::Scientist => {
                "Methodical and precise, emphasizing evidence-based reasoning and experimentation."
            }
            Mode::Engineer => {
                "Practical and solution-oriented, focusing on implementation and optimization."
            }
            Mode::Storyteller => {
                "Narrative and engaging, specializing in creative expression and communication."
            }
            Mode::Assistant => {
                "Helpful and supportive, prioritizing user needs and practical assistance."
            }
            Mode::Teacher => {
                "Educational and explanatory, focusing on clear instruction and knowledge transfer."
            }
        }
    }

    /// Tone used for conversational replies in this mode.
    ///
    /// Engineer has no dedicated tone and stays neutral.
    pub fn conversational_tone(&self) -> Tone {
        match self {
            Mode::Assistant | Mode::Teacher => Tone::Empathetic,
            Mode::Genius | Mode::Scientist => Tone::Analytical,
            Mode::Inventor | Mode::Explorer => Tone::Enthusiastic,
            Mode::Storyteller => Tone::Engaging,
            Mode::Engineer => Tone::Neutral,
        }
    }
}
