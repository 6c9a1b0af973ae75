//! Error types for catalog operations.

use thiserror::Error;

/// Errors from fetching, parsing, or persisting catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TAP service failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// File read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed tabular data, either from the service or a cache file.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The service response lacked a required column.
    #[error("Missing column in catalog response: {0}")]
    MissingColumn(String),
}

/// Standard Result type for all catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
