//! Theme error types

use thiserror::Error;
use tinct_core::ParseColorError;

/// Errors raised while building a registry or loading theme configuration.
///
/// Resolution itself never fails; these only surface at load time.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A token was registered under an empty identifier
    #[error("token identifier must not be empty")]
    EmptyIdentifier,

    /// A `#hex` literal could not be parsed
    #[error("invalid color `{value}` for token `{id}`: {source}")]
    InvalidColor {
        id: String,
        value: String,
        #[source]
        source: ParseColorError,
    },

    /// A seed entry has the wrong shape
    #[error("invalid seed entry for token `{id}`: {reason}")]
    InvalidSeed { id: String, reason: String },

    /// Seed data or a JSON theme failed to parse
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML theme config failed to parse
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Variant name not recognized
    #[error("unknown theme variant `{0}` (expected light, dark, hcDark or hcLight)")]
    UnknownVariant(String),

    /// Preset id not recognized
    #[error("unknown theme preset `{0}`")]
    UnknownPreset(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
