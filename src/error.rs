use thiserror::Error;

/// Errors that can occur while loading the catalog, recommending or storing ratings
#[derive(Error, Debug)]
pub enum MunchError {
    /// The catalog file could not be decoded as CSV
    #[error("Failed to read catalog: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller asked for zero recommendations
    #[error("top_n must be at least 1")]
    InvalidTopN,

    /// Rating outside the accepted 1-5 range
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(f64),

    /// Rating store failure
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
