//! Error types for the Symptom2Disease workspace.

use thiserror::Error;

/// A shared error type for the entire workspace.
///
/// Each workflow stage gets its own variant so callers can decide whether a
/// failure is a hard stop (canonical translation, prediction) or something to
/// absorb (display translation, explanation, audio).
#[derive(Error, Debug, Clone)]
pub enum S2dError {
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

    /// A pre-trained artifact is missing, malformed, or incompatible
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Translation service failure
    #[error("Translation error: {0}")]
    Translation(String),

    /// Vectorization or classification failure
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Explanation service failure
    #[error("Explanation error: {0}")]
    Explanation(String),

    /// Speech synthesis failure
    #[error("Speech synthesis error: {0}")]
    Speech(String),

    /// HTTP-level failure talking to an external service
    #[error("Network error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl S2dError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Artifact error
    pub fn artifact(message: impl Into<String>) -> Self {
        Self::Artifact(message.into())
    }

    /// Creates a Translation error
    pub fn translation(message: impl Into<String>) -> Self {
        Self::Translation(message.into())
    }

    /// Creates a Prediction error
    pub fn prediction(message: impl Into<String>) -> Self {
        Self::Prediction(message.into())
    }

    /// Creates an Explanation error
    pub fn explanation(message: impl Into<String>) -> Self {
        Self::Explanation(message.into())
    }

    /// Creates a Speech error
    pub fn speech(message: impl Into<String>) -> Self {
        Self::Speech(message.into())
    }

    /// Creates a Network error
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Network {
            status,
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an artifact error
    pub fn is_artifact(&self) -> bool {
        matches!(self, Self::Artifact(_))
    }

    /// Check if this is a translation error
    pub fn is_translation(&self) -> bool {
        matches!(self, Self::Translation(_))
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<std::io::Error> for S2dError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for S2dError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for S2dError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, S2dError>`.
pub type Result<T> = std::result::Result<T, S2dError>;
