// src/error.rs

//! Unified error handling for the content layer.

use std::fmt;

use thiserror::Error;

/// Result type alias for content operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Content store rejected a request
    #[error("Content store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// An external record did not have the expected shape
    #[error("Schema mismatch in {collection}: {message}")]
    Schema {
        collection: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Translation collaborator failed
    #[error("Translation error: {0}")]
    Translation(String),
}

impl AppError {
    /// Create a content store API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a schema mismatch error with collection context.
    pub fn schema(collection: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Schema {
            collection: collection.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a translation error.
    pub fn translation(message: impl fmt::Display) -> Self {
        Self::Translation(message.to_string())
    }
}
