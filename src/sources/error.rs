use crate::parsing::scalar::ParseError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceFileError {
    #[error("Failed to open source file '{0}'")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("Failed to read CSV record from source file '{0}'")]
    Csv(PathBuf, #[source] csv::Error),

    #[error("Source file '{path}' contains no readings")]
    EmptyInput { path: PathBuf },

    #[error("Malformed header in source file '{path}': {reason}")]
    MalformedHeader { path: PathBuf, reason: String },

    #[error("Missing required column '{column}' in source file '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Malformed row in source file '{path}' at line {line}: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Invalid value in column '{column}' of source file '{path}' at line {line}")]
    Parse {
        path: PathBuf,
        line: u64,
        column: String,
        #[source]
        source: ParseError,
    },

    // Raised by the file-independent aggregation entry point
    #[error("No readings to aggregate")]
    NoReadings,
}

impl SourceFileError {
    /// Short name of the failure kind, for reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceFileError::Open(..) | SourceFileError::Csv(..) => "io",
            SourceFileError::EmptyInput { .. } | SourceFileError::NoReadings => "empty_input",
            SourceFileError::MalformedHeader { .. }
            | SourceFileError::MissingColumn { .. }
            | SourceFileError::MalformedRow { .. } => "malformed_file",
            SourceFileError::Parse { .. } => "parse",
        }
    }
}
