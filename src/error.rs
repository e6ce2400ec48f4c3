//! Error types for loading and aggregating census records.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CensusError {
    /// No record carried the fields needed to pick a maximum.
    #[error("No valid records to aggregate")]
    EmptyDataset,

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}

pub type CensusResult<T> = std::result::Result<T, CensusError>;
