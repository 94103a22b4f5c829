//! Content-layer errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving restaurant content.
///
/// None of these reach a rendered page: callers degrade to fallback or
/// empty data and log the error.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The expected directory or data file does not exist
    #[error("content storage not found: {}", .0.display())]
    StorageAbsent(PathBuf),

    /// A data file exists but its record list could not be read
    #[error("unreadable data file {}: {message}", path.display())]
    InvalidData { path: PathBuf, message: String },

    /// A single record's source could not be parsed
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content API could not be reached or answered with a bad status
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The content API answered with an error body
    #[error("content api error: {0}")]
    Remote(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ContentError {
    pub(crate) fn parse(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the soft "not found" condition
    pub fn is_storage_absent(&self) -> bool {
        matches!(self, Self::StorageAbsent(_))
    }

    /// Conditions a file system source answers with fallback data: the
    /// storage is missing, or a data file holds no readable list.
    pub fn serves_fallback(&self) -> bool {
        matches!(self, Self::StorageAbsent(_) | Self::InvalidData { .. })
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
