//! Reading raw MesoWest station exports.
//!
//! A station file has a header row naming the columns, a units row, and one row per
//! instrument sample. `#` lines (station metadata in MesoWest downloads) are skipped.
//! Only the five configured quantity columns and the timestamp column are read.

use crate::config::StationColumns;
use crate::parsing::scalar::ScalarParser;
use crate::sources::error::SourceFileError;
use chrono::NaiveDate;
use csv::StringRecord;
use log::debug;
use std::fs::File;
use std::path::Path;

/// One instrument sample. Absent fields have already been replaced by `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day as found after the `T` separator.
    pub time: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    /// Degrees, meteorological convention as reported by the station.
    pub wind_direction: f64,
    pub pressure: f64,
}

/// Resolved positions of the required columns in one file's header.
struct ColumnIndices {
    timestamp: usize,
    temperature: usize,
    humidity: usize,
    wind_speed: usize,
    wind_direction: usize,
    pressure: usize,
}

impl ColumnIndices {
    fn resolve(
        header: &StringRecord,
        columns: &StationColumns,
        path: &Path,
    ) -> Result<Self, SourceFileError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SourceFileError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };

        if columns.timestamp_index >= header.len() {
            return Err(SourceFileError::MalformedHeader {
                path: path.to_path_buf(),
                reason: format!(
                    "timestamp column {} is outside a header of {} columns",
                    columns.timestamp_index,
                    header.len()
                ),
            });
        }

        Ok(Self {
            timestamp: columns.timestamp_index,
            temperature: find(&columns.temperature)?,
            humidity: find(&columns.humidity)?,
            wind_speed: find(&columns.wind_speed)?,
            wind_direction: find(&columns.wind_direction)?,
            pressure: find(&columns.pressure)?,
        })
    }
}

/// Splits a `date T time` timestamp, checking that the date part is a real calendar day.
pub fn split_timestamp(timestamp: &str) -> Option<(&str, &str)> {
    let (date, time) = timestamp.trim().split_once('T')?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((date, time))
}

/// Reads every sample of a station file, in file order.
///
/// Fails on the first malformed row: a required column missing from the header, a row
/// shorter than the header, an unparseable timestamp, or a non-numeric non-empty value
/// (subject to the parser's policy). A file without any sample rows is
/// [`SourceFileError::EmptyInput`].
pub fn read_station_file(
    path: &Path,
    columns: &StationColumns,
    parser: ScalarParser,
) -> Result<Vec<RawReading>, SourceFileError> {
    let file = File::open(path).map_err(|e| SourceFileError::Open(path.to_path_buf(), e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let header = reader
        .headers()
        .map_err(|e| SourceFileError::Csv(path.to_path_buf(), e))?
        .clone();
    if header.is_empty() {
        return Err(SourceFileError::MalformedHeader {
            path: path.to_path_buf(),
            reason: "missing header row".to_string(),
        });
    }
    let indices = ColumnIndices::resolve(&header, columns, path)?;

    let mut records = reader.records();
    // Units row
    let units = records
        .next()
        .transpose()
        .map_err(|e| SourceFileError::Csv(path.to_path_buf(), e))?;
    if units.is_none() {
        return Err(SourceFileError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let mut readings = Vec::new();
    for record in records {
        let record = record.map_err(|e| SourceFileError::Csv(path.to_path_buf(), e))?;
        let line = record.position().map_or(0, |p| p.line());
        readings.push(parse_reading(&record, &indices, &header, columns, parser, path, line)?);
    }

    if readings.is_empty() {
        return Err(SourceFileError::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    debug!("Read {} readings from {}", readings.len(), path.display());
    Ok(readings)
}

fn parse_reading(
    record: &StringRecord,
    indices: &ColumnIndices,
    header: &StringRecord,
    columns: &StationColumns,
    parser: ScalarParser,
    path: &Path,
    line: u64,
) -> Result<RawReading, SourceFileError> {
    if record.len() < header.len() {
        return Err(SourceFileError::MalformedRow {
            path: path.to_path_buf(),
            line,
            reason: format!(
                "expected {} columns, found {}",
                header.len(),
                record.len()
            ),
        });
    }

    let timestamp = record.get(indices.timestamp).unwrap_or_default();
    let (date, time) = split_timestamp(timestamp).ok_or_else(|| SourceFileError::MalformedRow {
        path: path.to_path_buf(),
        line,
        reason: format!("invalid timestamp '{}'", timestamp),
    })?;

    let value = |idx: usize, name: &str| {
        parser
            .parse_opt(record.get(idx))
            .map_err(|source| SourceFileError::Parse {
                path: path.to_path_buf(),
                line,
                column: name.to_string(),
                source,
            })
    };

    Ok(RawReading {
        date: date.to_string(),
        time: time.to_string(),
        temperature: value(indices.temperature, &columns.temperature)?,
        humidity: value(indices.humidity, &columns.humidity)?,
        wind_speed: value(indices.wind_speed, &columns.wind_speed)?,
        wind_direction: value(indices.wind_direction, &columns.wind_direction)?,
        pressure: value(indices.pressure, &columns.pressure)?,
    })
}
