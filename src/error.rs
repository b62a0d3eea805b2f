//! Error types for georesolve.

use thiserror::Error;

/// Result type for georesolve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for georesolve operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The gazetteer source is missing or yielded no usable rows.
    ///
    /// Fatal at initialization: a resolver cannot be built without at least
    /// one populated category.
    #[error("Gazetteer data unavailable: {0}")]
    DataUnavailable(String),

    /// Resolution was requested before a gazetteer index was supplied.
    ///
    /// Recoverable: build again after providing an index.
    #[error("Resolver not initialized: {0}")]
    NotInitialized(String),

    /// A span tagger backend failed.
    #[error("Tagger failed: {0}")]
    Tagger(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Gazetteer file parsing error.
    #[cfg(feature = "ingest")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a data unavailable error.
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Error::DataUnavailable(msg.into())
    }

    /// Create a not initialized error.
    pub fn not_initialized(msg: impl Into<String>) -> Self {
        Error::NotInitialized(msg.into())
    }

    /// Create a tagger error.
    pub fn tagger(msg: impl Into<String>) -> Self {
        Error::Tagger(msg.into())
    }
}
