use crate::parsing::scalar::ParseError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset file '{0}'")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("Failed to read CSV record from '{0}'")]
    Csv(PathBuf, #[source] csv::Error),

    #[error("Dataset file '{path}' has no header row")]
    EmptyHeader { path: PathBuf },

    #[error("Row at line {line} of '{path}' has {found} columns, header has {expected}")]
    ShortRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Malformed record for date {date}: {reason}")]
    MalformedRecord { date: String, reason: String },

    #[error("Invalid feature {column} of example {row} (date {date})")]
    Parse {
        row: usize,
        column: usize,
        date: String,
        #[source]
        source: ParseError,
    },

    #[error("Examples have inconsistent feature counts: row {row} has {found}, expected {expected}")]
    RaggedFeatures {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Failed to write dataset file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode dataset file '{0}'")]
    WritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
