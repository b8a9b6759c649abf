//! Cache error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the cache.
///
/// Read-side problems (missing, malformed or tampered artifacts) are never
/// errors; they are reported as a [`crate::cache::store::Lookup::Miss`].
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to write cache artifact {path:?}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("x and y must have the same length (x: {x}, y: {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("non-finite value in {series} at index {index}")]
    NonFinite { series: &'static str, index: usize },

    #[error("invalid generation parameters: {0}")]
    InvalidParameters(String),
}

impl CacheError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Storage {
            path: path.into(),
            source,
        }
    }
}

pub type CacheResult<T> = Result<T, CacheError>;
