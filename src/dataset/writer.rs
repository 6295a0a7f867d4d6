//! Writing the compact per-date files with Polars' CSV writer.

use crate::dataset::error::DatasetError;
use crate::types::air_quality_record::AirQualityRecord;
use crate::types::daily_record::DailyRecord;
use crate::types::date_map::DateMap;
use log::info;
use polars::prelude::*;
use std::path::Path;

/// Builds a `Date, Temperature, Wind_X, Wind_Y, Humidity, Pressure` frame in map order.
pub fn daily_records_frame(records: &DateMap<DailyRecord>) -> PolarsResult<DataFrame> {
    let dates: Vec<&str> = records.keys().collect();
    let mut columns = vec![Column::new("Date".into(), dates)];
    for (idx, name) in DailyRecord::FIELD_NAMES.iter().enumerate() {
        let values: Vec<f64> = records.values().map(|r| r.to_array()[idx]).collect();
        columns.push(Column::new((*name).into(), values));
    }
    DataFrame::new(columns)
}

/// Builds a `Date, AQI, Category, Parameter` frame in map order.
pub fn air_quality_frame(records: &DateMap<AirQualityRecord>) -> PolarsResult<DataFrame> {
    let dates: Vec<&str> = records.keys().collect();
    let mut columns = vec![Column::new("Date".into(), dates)];
    for (idx, name) in AirQualityRecord::FIELD_NAMES.iter().enumerate() {
        let values: Vec<&str> = records.values().map(|r| r.to_fields()[idx]).collect();
        columns.push(Column::new((*name).into(), values));
    }
    DataFrame::new(columns)
}

/// Writes a frame as CSV with a header row.
pub fn write_csv(mut df: DataFrame, path: &Path) -> Result<(), DatasetError> {
    let mut file =
        std::fs::File::create(path).map_err(|e| DatasetError::Write(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| DatasetError::WritePolars(path.to_path_buf(), e))?;
    info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

pub fn write_daily_records(records: &DateMap<DailyRecord>, path: &Path) -> Result<(), DatasetError> {
    write_csv(daily_records_frame(records)?, path)
}

pub fn write_air_quality_records(
    records: &DateMap<AirQualityRecord>,
    path: &Path,
) -> Result<(), DatasetError> {
    write_csv(air_quality_frame(records)?, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::load_dataset;
    use crate::parsing::scalar::parse_scalar;

    #[test]
    fn test_daily_records_are_loadable() -> Result<(), Box<dyn std::error::Error>> {
        let records: DateMap<DailyRecord> = vec![
            (
                "2020-01-02".to_string(),
                DailyRecord::from_array([1.25, -0.5, 0.75, 61.0, 86012.5]),
            ),
            (
                "2020-01-01".to_string(),
                DailyRecord::from_array([-4.0, 0.0, 0.0, 70.0, 86100.0]),
            ),
        ]
        .into_iter()
        .collect();
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("meso_data.csv");

        write_daily_records(&records, &path)?;
        let loaded = load_dataset(&path)?;

        assert_eq!(loaded.fields, DailyRecord::FIELD_NAMES.to_vec());
        let dates: Vec<&str> = loaded.rows.keys().collect();
        assert_eq!(dates, vec!["2020-01-02", "2020-01-01"]);
        let values: Vec<f64> = loaded
            .rows
            .get("2020-01-02")
            .unwrap()
            .iter()
            .map(|v| parse_scalar(v))
            .collect::<Result<_, _>>()?;
        assert_eq!(values, vec![1.25, -0.5, 0.75, 61.0, 86012.5]);
        Ok(())
    }

    #[test]
    fn test_air_quality_frame_layout() -> Result<(), Box<dyn std::error::Error>> {
        let records: DateMap<AirQualityRecord> = vec![(
            "2020-01-01".to_string(),
            AirQualityRecord::new("101", "Unhealthy for Sensitive Groups", "PM2.5"),
        )]
        .into_iter()
        .collect();

        let df = air_quality_frame(&records)?;

        assert_eq!(df.shape(), (1, 4));
        assert_eq!(
            df.column("Category")?.str()?.get(0),
            Some("Unhealthy for Sensitive Groups")
        );
        Ok(())
    }
}
