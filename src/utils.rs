use crate::error::PipelineError;
use std::path::{Path, PathBuf};

/// Lists the regular, non-hidden files of `dir`, sorted by file name.
pub async fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| PipelineError::DirectoryRead(dir.to_path_buf(), e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PipelineError::DirectoryRead(dir.to_path_buf(), e))?
    {
        let is_file = entry
            .file_type()
            .await
            .map_err(|e| PipelineError::DirectoryRead(dir.to_path_buf(), e))?
            .is_file();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if is_file && !hidden {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
