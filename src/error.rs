use crate::dataset::error::DatasetError;
use crate::sources::error::SourceFileError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    SourceFile(#[from] SourceFileError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Failed to read configuration file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse configuration file '{0}'")]
    ConfigParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to list input directory '{0}'")]
    DirectoryRead(PathBuf, #[source] std::io::Error),

    #[error("No usable input files in '{0}'")]
    NoUsableFiles(PathBuf),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
