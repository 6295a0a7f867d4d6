//! Raw EPA daily AQI files.
//!
//! The EPA "daily AQI by county" export has the fixed column layout
//! `[State, County, State Code, County Code, Date, AQI, Category, Defining Parameter,
//! Defining Site, Number of Sites Reporting]`. Only rows for the configured region are kept.

use crate::config::RegionFilter;
use crate::error::PipelineError;
use crate::sources::error::SourceFileError;
use crate::types::air_quality_record::AirQualityRecord;
use crate::types::date_map::DateMap;
use crate::utils::list_input_files;
use futures_util::future::join_all;
use log::{error, info};
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::task;

const STATE_COL: usize = 0;
const COUNTY_COL: usize = 1;
const DATE_COL: usize = 4;
const AQI_COL: usize = 5;
const CATEGORY_COL: usize = 6;
const PARAMETER_COL: usize = 7;

/// Reads one raw EPA file, keeping `Date -> (AQI, Category, Parameter)` for rows of `region`.
///
/// The header row never matches a region and is dropped with the other rows.
pub fn read_epa_file(
    path: &Path,
    region: &RegionFilter,
) -> Result<DateMap<AirQualityRecord>, SourceFileError> {
    let file = File::open(path).map_err(|e| SourceFileError::Open(path.to_path_buf(), e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = DateMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| SourceFileError::Csv(path.to_path_buf(), e))?;
        let state = record.get(STATE_COL).unwrap_or_default();
        let county = record.get(COUNTY_COL).unwrap_or_default();
        if !region.matches(state, county) {
            continue;
        }

        let line = record.position().map_or(0, |p| p.line());
        let field = |idx: usize| {
            record
                .get(idx)
                .ok_or_else(|| SourceFileError::MalformedRow {
                    path: path.to_path_buf(),
                    line,
                    reason: format!(
                        "expected at least {} columns, found {}",
                        PARAMETER_COL + 1,
                        record.len()
                    ),
                })
        };
        let date = field(DATE_COL)?;
        let aqi_record = AirQualityRecord::new(
            field(AQI_COL)?,
            field(CATEGORY_COL)?,
            field(PARAMETER_COL)?,
        );
        records.insert(date, aqi_record);
    }

    info!(
        "{}: {} days for {}, {}",
        path.display(),
        records.len(),
        region.county,
        region.state
    );
    Ok(records)
}

/// Result of collecting a directory of raw EPA files.
#[derive(Debug)]
pub struct AirQualityDirectoryReport {
    pub records: DateMap<AirQualityRecord>,
    pub processed: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, SourceFileError)>,
}

/// Reads every raw EPA file in `dir` and concatenates them in file-name order.
///
/// A date found in more than one file keeps the value from the last file. Unreadable files
/// are logged and excluded.
pub async fn collect_epa_directory(
    dir: &Path,
    region: &RegionFilter,
) -> Result<AirQualityDirectoryReport, PipelineError> {
    let files = list_input_files(dir).await?;
    let tasks = files.iter().cloned().map(|path| {
        let region = region.clone();
        task::spawn_blocking(move || read_epa_file(&path, &region))
    });
    let results = join_all(tasks).await;

    let mut records = DateMap::new();
    let mut processed = Vec::new();
    let mut failures = Vec::new();
    for (path, result) in files.into_iter().zip(results) {
        match result? {
            Ok(file_records) => {
                for (date, record) in file_records {
                    records.insert(date, record);
                }
                processed.push(path);
            }
            Err(e) => {
                error!("Excluding EPA file {} ({}): {}", path.display(), e.kind(), e);
                failures.push((path, e));
            }
        }
    }

    if processed.is_empty() {
        return Err(PipelineError::NoUsableFiles(dir.to_path_buf()));
    }
    Ok(AirQualityDirectoryReport {
        records,
        processed,
        failures,
    })
}
