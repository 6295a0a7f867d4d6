//! Loading of the compact `Date,<field>,...` files produced by the ingest steps.

use crate::dataset::error::DatasetError;
use crate::types::air_quality_record::AirQualityRecord;
use crate::types::date_map::DateMap;
use log::info;
use std::fs::File;
use std::path::Path;

/// A compact file: field names (without `Date`) and the raw text of each date's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactDataset {
    pub fields: Vec<String>,
    pub rows: DateMap<Vec<String>>,
}

impl CompactDataset {
    /// Interprets the rows as `AQI, Category, Parameter` air-quality records.
    pub fn into_air_quality(self) -> Result<DateMap<AirQualityRecord>, DatasetError> {
        let mut records = DateMap::with_capacity(self.rows.len());
        for (date, fields) in self.rows {
            let record =
                AirQualityRecord::from_fields(&fields).ok_or_else(|| DatasetError::MalformedRecord {
                    date: date.clone(),
                    reason: format!("expected 3 air-quality fields, found {}", fields.len()),
                })?;
            records.insert(date, record);
        }
        Ok(records)
    }
}

/// Reads a compact CSV file.
///
/// Values are not converted; that is left to whoever consumes them. A date listed twice
/// keeps its first position with the values of its last row.
pub fn load_dataset(path: &Path) -> Result<CompactDataset, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::Open(path.to_path_buf(), e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let header = reader
        .headers()
        .map_err(|e| DatasetError::Csv(path.to_path_buf(), e))?
        .clone();
    if header.is_empty() {
        return Err(DatasetError::EmptyHeader {
            path: path.to_path_buf(),
        });
    }
    let fields: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    let mut rows = DateMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| DatasetError::Csv(path.to_path_buf(), e))?;
        if record.len() < header.len() {
            return Err(DatasetError::ShortRow {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                expected: header.len(),
                found: record.len(),
            });
        }
        let mut values = record.iter();
        let date = values.next().unwrap_or_default().to_string();
        rows.insert(date, values.map(str::to_string).collect());
    }

    info!(
        "Loaded {} dates with fields {:?} from {}",
        rows.len(),
        fields,
        path.display()
    );
    Ok(CompactDataset { fields, rows })
}
