//! Error types for mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from configuration loading and mapping runs.
///
/// Only [`MappingError::ConfigurationNotFound`] aborts a mapping run;
/// individual field failures resolve to null values instead.
#[derive(Debug, Error)]
pub enum MappingError {
    /// No configuration matched the requested manufacturer/document type.
    #[error("unknown manufacturer '{manufacturer}' for document type {document_type}")]
    ConfigurationNotFound {
        manufacturer: String,
        document_type: String,
    },
    /// Failed to read a configuration file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A configuration file contained invalid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A configuration file parsed but is structurally unusable.
    #[error("invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}

impl MappingError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
