// File: src/error.rs
// Purpose: Configuration errors raised by broken rule or alias tables

use crate::value::Value;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, FilterError>;

/// Programmer or configuration mistakes.
///
/// User input that fails validation is never reported through this type; it
/// comes back as [`crate::Filtered::Invalid`]. These errors mean the rule or
/// alias table needs fixing and should not be shown to end users.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("alias `{alias}` maps to an empty canonical name")]
    EmptyAliasTarget { alias: String },

    #[error("field `{field}` was submitted (value: `{value}`) but its rule declares no pattern")]
    MissingPattern { field: String, value: Value },

    #[error("invalid pattern `{pattern}` for field `{field}`: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read config file {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
