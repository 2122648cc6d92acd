//! Error types for sourcelens.
//!
//! Library crates use [`SourceLensError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all sourcelens operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceLensError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Article markup extraction or node-stream parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Bias table loading error.
    #[error("bias table error: {0}")]
    Table(String),

    /// Source list loading error.
    #[error("source list error: {0}")]
    Sources(String),

    /// Artifact writing error.
    #[error("report error: {0}")]
    Report(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (schema mismatch, invalid format, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SourceLensError>;

impl SourceLensError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SourceLensError::config("missing data directory");
        assert_eq!(err.to_string(), "config error: missing data directory");

        let err = SourceLensError::validation("sources row 3 has no name");
        assert!(err.to_string().contains("sources row 3"));
    }
}
