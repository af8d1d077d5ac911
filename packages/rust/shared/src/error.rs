//! Error types for channelscope.
//!
//! Library crates use [`ChannelScopeError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all channelscope operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelScopeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching the dataset. Fatal for the run:
    /// there is no table to work on.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// TSV parsing or schema error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A chart or aggregation asked for a column the dataset does not have.
    /// Localized to that chart, never fatal to the pipeline.
    #[error("column '{column}' is missing from the dataset")]
    MissingColumn { column: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ChannelScopeError>;

impl ChannelScopeError {
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

    /// Create a missing-column error for a chart/aggregation request.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
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
        let err = ChannelScopeError::config("bad source url");
        assert_eq!(err.to_string(), "config error: bad source url");

        let err = ChannelScopeError::missing_column("Подписчики");
        assert!(err.to_string().contains("Подписчики"));
    }
}
