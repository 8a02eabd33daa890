//! Error handling for the stratification pipeline.

use std::io;

/// Specialized error type for the stratification pipeline
#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    /// Error opening or reading a snapshot or artifact file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error building or consuming Arrow batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error converting rows to or from Arrow batches
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),

    /// Error parsing a configuration file
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Invalid configuration, rejected before the expensive phases run
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid or degenerate input data
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for stratification pipeline operations
pub type Result<T> = std::result::Result<T, StudyError>;
