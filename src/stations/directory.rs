//! Aggregation of a whole directory of raw station files.

use crate::config::StationColumns;
use crate::error::PipelineError;
use crate::parsing::scalar::ScalarParser;
use crate::sources::error::SourceFileError;
use crate::stations::aggregate::aggregate_station_file;
use crate::stations::merge::merge_daily_records;
use crate::types::daily_record::DailyRecord;
use crate::types::date_map::DateMap;
use crate::utils::list_input_files;
use futures_util::future::join_all;
use log::{error, info};
use std::path::{Path, PathBuf};
use tokio::task;

/// Result of aggregating a station directory.
#[derive(Debug)]
pub struct StationDirectoryReport {
    /// Daily records merged over every file that aggregated successfully.
    pub merged: DateMap<DailyRecord>,
    /// Files that contributed to `merged`, in merge order.
    pub processed: Vec<PathBuf>,
    /// Files excluded from the merge, with the reason.
    pub failures: Vec<(PathBuf, SourceFileError)>,
}

/// Aggregates every file in `dir` on blocking workers and merges the results.
///
/// Files are merged in file-name order. A file that fails (missing column, malformed row,
/// no readings, ...) is logged and excluded; the run fails only if no file succeeds.
pub async fn aggregate_station_directory(
    dir: &Path,
    columns: &StationColumns,
    parser: ScalarParser,
) -> Result<StationDirectoryReport, PipelineError> {
    let files = list_input_files(dir).await?;
    info!("Aggregating {} station files from {}", files.len(), dir.display());

    let tasks = files.iter().cloned().map(|path| {
        let columns = columns.clone();
        task::spawn_blocking(move || aggregate_station_file(&path, &columns, parser))
    });
    let results = join_all(tasks).await;

    let mut stations = Vec::new();
    let mut processed = Vec::new();
    let mut failures = Vec::new();
    for (path, result) in files.into_iter().zip(results) {
        match result? {
            Ok(days) => {
                info!("{}: {} days", path.display(), days.len());
                stations.push(days);
                processed.push(path);
            }
            Err(e) => {
                error!(
                    "Excluding station file {} ({}): {}",
                    path.display(),
                    e.kind(),
                    e
                );
                failures.push((path, e));
            }
        }
    }

    if stations.is_empty() {
        return Err(PipelineError::NoUsableFiles(dir.to_path_buf()));
    }

    let merged = merge_daily_records(&stations);
    info!(
        "Merged {} station files into {} days ({} files excluded)",
        stations.len(),
        merged.len(),
        failures.len()
    );
    Ok(StationDirectoryReport {
        merged,
        processed,
        failures,
    })
}
