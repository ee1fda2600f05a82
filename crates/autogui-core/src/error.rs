//! Error types.
//!
//! Rendering errors propagate up to the nearest error sink
//! (see [`Renderer::error_sink`](crate::Renderer::error_sink)); storage
//! errors additionally carry user-friendly messages and remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error used as the source of hook failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure while rendering a subtree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A custom render hook failed.
    #[error("{type_name}: {source}")]
    Hook {
        type_name: String,
        #[source]
        source: BoxError,
    },

    /// An external transform (e.g. LaTeX) exited unsuccessfully.
    #[error("{program} failed with {status}")]
    Transform {
        program: String,
        status: String,
        output: String,
    },

    /// Cache directory or cached artifact could not be used.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Storage collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RenderError {
    /// Wrap an arbitrary error raised by a custom hook.
    pub fn hook(type_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Hook {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// Longer description shown when hovering an error in the UI.
    pub fn detail(&self) -> String {
        match self {
            Self::Transform { output, .. } => output.clone(),
            other => {
                let mut detail = other.to_string();
                let mut source = std::error::Error::source(other);
                while let Some(cause) = source {
                    detail.push_str("\n  caused by: ");
                    detail.push_str(&cause.to_string());
                    source = cause.source();
                }
                detail
            }
        }
    }
}

/// Write-back rejection for a single record/map field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field '{0}' is read-only")]
    ReadOnly(String),

    #[error("no field named '{0}'")]
    Missing(String),
}

/// Storage operation error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored data could not be encoded.
    #[error("Failed to serialize object graph")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Stored data could not be decoded.
    #[error("Failed to deserialize object graph from {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::Serialization { .. } => "An error occurred while saving the data.".to_string(),
            Self::Deserialization { path, .. } => format!(
                "The saved data at {} could not be read. The file may be corrupted.",
                path.display()
            ),
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the file to {}. Please check disk space and permissions.",
                target_path.display()
            ),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Delete the file to start over with the default state.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Content cache error.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to {operation} cache entry: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode cached image: {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Configuration file error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to {operation} config file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
