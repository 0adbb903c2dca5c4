//! Error types for the Riley console.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole workspace.
///
/// Typed variants with `From` conversions for the error types the crates
/// actually meet (file system, JSON, TOML).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RileyError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A mode name that is not one of the known personas
    #[error("Unknown mode '{0}'")]
    InvalidMode(String),

    /// A `/command` that the console does not understand
    #[error("Unknown command '/{0}'")]
    UnknownCommand(String),

    /// A command argument that could not be understood
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The in-flight request was cancelled before it resolved
    #[error("Request cancelled")]
    Cancelled,

    /// The response backend failed to produce a reply
    #[error("Backend error: {0}")]
    Backend(String),
}

impl RileyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RileyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RileyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RileyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RileyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RileyError>`.
pub type Result<T> = std::result::Result<T, RileyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
        let err: RileyError = io.into();
        match err {
            RileyError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("Expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_error_is_serialization() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("default_mode = ");
        let err: RileyError = parse.unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: TOML"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            RileyError::InvalidMode("pirate".into()).to_string(),
            "Unknown mode 'pirate'"
        );
        assert_eq!(
            RileyError::UnknownCommand("dance".into()).to_string(),
            "Unknown command '/dance'"
        );
        assert!(RileyError::Cancelled.is_cancelled());
    }
}
