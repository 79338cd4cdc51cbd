//! Error types for regsum.
//!
//! Library crates use [`RegSumError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all regsum operations.
#[derive(Debug, thiserror::Error)]
pub enum RegSumError {
    /// A section label carried no usable section number.
    #[error("malformed section label: {label:?}")]
    MalformedSectionLabel { label: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Source document could not be read by its adapter.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid input (empty document, out-of-range ratio, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The build pipeline was aborted before every section was built.
    #[error("index build cancelled")]
    Cancelled,
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RegSumError>;

impl RegSumError {
    /// Create a malformed-label error for the offending raw label.
    pub fn malformed_label(label: impl Into<String>) -> Self {
        Self::MalformedSectionLabel {
            label: label.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
