//! # Error Module
//!
//! The single error type shared by every pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the adapter pipeline.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The model file could not be read.
    #[error("Failed to read model artifact {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model file is not a JSON object of string values.
    #[error("Failed to decode model artifact {path}: {source}")]
    ArtifactDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The request declared a content type other than JSON.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The caller asked for a response content type other than JSON.
    #[error("Unsupported accept type: {0}")]
    UnsupportedAccept(String),

    /// The request body is not valid UTF-8, UTF-16 or UTF-32 text.
    #[error("Invalid payload encoding: {0}")]
    InvalidEncoding(&'static str),

    /// The request body is not valid JSON.
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The request object has no `data` key.
    #[error("Missing 'data' key in input JSON")]
    MissingData,

    /// The `data` value cannot be used as a lookup key.
    #[error("Invalid lookup key: {0}")]
    InvalidKey(&'static str),
}

impl AdapterError {
    /// True for errors caused by the request rather than the server.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::ArtifactIo { .. } | Self::ArtifactDecode { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type AdapterResult<T> = Result<T, AdapterError>;
