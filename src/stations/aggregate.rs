//! Reduction of one station's samples into daily averages.

use crate::config::StationColumns;
use crate::parsing::scalar::ScalarParser;
use crate::sources::error::SourceFileError;
use crate::stations::reader::{read_station_file, RawReading};
use crate::types::daily_record::DailyRecord;
use crate::types::date_map::DateMap;
use log::{debug, warn};
use std::path::Path;

/// Running sums for the day currently being read.
#[derive(Debug)]
struct DayAccumulator {
    date: String,
    sums: DailyRecord,
    count: u32,
}

impl DayAccumulator {
    fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            sums: DailyRecord::default(),
            count: 0,
        }
    }

    fn add(&mut self, reading: &RawReading) {
        let angle = reading.wind_direction.to_radians();
        self.sums += DailyRecord {
            temperature: reading.temperature,
            wind_x: reading.wind_speed * angle.cos(),
            wind_y: reading.wind_speed * angle.sin(),
            humidity: reading.humidity,
            pressure: reading.pressure,
        };
        self.count += 1;
    }

    fn average(&self) -> DailyRecord {
        self.sums / f64::from(self.count)
    }
}

/// Streams time-ordered samples of one station into one [`DailyRecord`] per date.
///
/// Samples are expected grouped by day (station exports are sorted by time); a day is
/// closed as soon as a sample with a different date arrives. No sorting is performed.
///
/// ```
/// use aqforecast::{RawReading, StationAggregator};
///
/// let mut aggregator = StationAggregator::new();
/// for (date, temp) in [("2020-01-01", 10.0), ("2020-01-01", 20.0), ("2020-01-02", 5.0)] {
///     aggregator.push(&RawReading {
///         date: date.to_string(),
///         time: "00:00".to_string(),
///         temperature: temp,
///         humidity: 0.0,
///         wind_speed: 0.0,
///         wind_direction: 0.0,
///         pressure: 0.0,
///     });
/// }
/// let days = aggregator.finish().unwrap();
/// assert_eq!(days.get("2020-01-01").unwrap().temperature, 15.0);
/// assert_eq!(days.get("2020-01-02").unwrap().temperature, 5.0);
/// ```
#[derive(Debug, Default)]
pub struct StationAggregator {
    current: Option<DayAccumulator>,
    days: DateMap<DailyRecord>,
}

impl StationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reading: &RawReading) {
        if let Some(acc) = self.current.as_mut() {
            if acc.date == reading.date {
                acc.add(reading);
                return;
            }
        }
        self.close_day();
        let mut acc = DayAccumulator::new(&reading.date);
        acc.add(reading);
        self.current = Some(acc);
    }

    fn close_day(&mut self) {
        if let Some(acc) = self.current.take() {
            let average = acc.average();
            if self.days.insert(acc.date.as_str(), average).is_some() {
                // Out-of-order input: the later run of samples for this date wins.
                warn!(
                    "Date {} appears in more than one run of samples; keeping the last run",
                    acc.date
                );
            }
        }
    }

    /// Closes the open day and returns all daily averages in first-seen date order.
    pub fn finish(mut self) -> Result<DateMap<DailyRecord>, SourceFileError> {
        self.close_day();
        if self.days.is_empty() {
            return Err(SourceFileError::NoReadings);
        }
        Ok(self.days)
    }
}

/// Aggregates a sequence of samples; fails with [`SourceFileError::NoReadings`] if empty.
pub fn aggregate_readings<'a>(
    readings: impl IntoIterator<Item = &'a RawReading>,
) -> Result<DateMap<DailyRecord>, SourceFileError> {
    let mut aggregator = StationAggregator::new();
    for reading in readings {
        aggregator.push(reading);
    }
    aggregator.finish()
}

/// Reads and aggregates one raw station file.
pub fn aggregate_station_file(
    path: &Path,
    columns: &StationColumns,
    parser: ScalarParser,
) -> Result<DateMap<DailyRecord>, SourceFileError> {
    let readings = read_station_file(path, columns, parser)?;
    let days = aggregate_readings(&readings).map_err(|e| match e {
        SourceFileError::NoReadings => SourceFileError::EmptyInput {
            path: path.to_path_buf(),
        },
        other => other,
    })?;
    debug!(
        "Aggregated {} readings from {} into {} days",
        readings.len(),
        path.display(),
        days.len()
    );
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::reader::tests::station_file;

    fn reading(date: &str, temperature: f64, wind_speed: f64, wind_direction: f64) -> RawReading {
        RawReading {
            date: date.to_string(),
            time: "12:00:00Z".to_string(),
            temperature,
            humidity: 50.0,
            wind_speed,
            wind_direction,
            pressure: 86000.0,
        }
    }

    #[test]
    fn test_opposite_winds_cancel_out() -> Result<(), SourceFileError> {
        let readings = [
            reading("2020-01-01", 0.0, 1.0, 0.0),
            reading("2020-01-01", 0.0, 1.0, 180.0),
        ];
        let days = aggregate_readings(&readings)?;
        let day = days.get("2020-01-01").unwrap();
        assert!(day.wind_x.abs() < 1e-12);
        assert!(day.wind_y.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_wind_is_averaged_as_a_vector() -> Result<(), SourceFileError> {
        // 350° and 10° average to due north (x axis), not to 180°.
        let readings = [
            reading("2020-01-01", 0.0, 2.0, 350.0),
            reading("2020-01-01", 0.0, 2.0, 10.0),
        ];
        let days = aggregate_readings(&readings)?;
        let day = days.get("2020-01-01").unwrap();
        assert!((day.wind_x - 2.0 * 10f64.to_radians().cos()).abs() < 1e-12);
        assert!(day.wind_y.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_days_close_on_date_change() -> Result<(), SourceFileError> {
        let readings = [
            reading("2020-01-01", 10.0, 0.0, 0.0),
            reading("2020-01-01", 20.0, 0.0, 0.0),
            reading("2020-01-01", 30.0, 0.0, 0.0),
            reading("2020-01-02", -4.0, 0.0, 0.0),
        ];
        let days = aggregate_readings(&readings)?;

        let keys: Vec<&str> = days.keys().collect();
        assert_eq!(keys, vec!["2020-01-01", "2020-01-02"]);
        assert_eq!(days.get("2020-01-01").unwrap().temperature, 20.0);
        assert_eq!(days.get("2020-01-02").unwrap().temperature, -4.0);
        assert_eq!(days.get("2020-01-02").unwrap().pressure, 86000.0);
        Ok(())
    }

    #[test]
    fn test_single_date_still_emits_a_record() -> Result<(), SourceFileError> {
        let days = aggregate_readings(&[reading("2020-06-01", 25.0, 3.0, 90.0)])?;
        assert_eq!(days.len(), 1);
        let day = days.get("2020-06-01").unwrap();
        assert!(day.wind_x.abs() < 1e-12);
        assert!((day.wind_y - 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_missing_values_contribute_zero() -> Result<(), SourceFileError> {
        // A zeroed sample still counts towards the mean.
        let readings = [
            reading("2020-01-01", 10.0, 0.0, 0.0),
            reading("2020-01-01", 0.0, 0.0, 0.0),
        ];
        let days = aggregate_readings(&readings)?;
        assert_eq!(days.get("2020-01-01").unwrap().temperature, 5.0);
        Ok(())
    }

    #[test]
    fn test_empty_input_fails() {
        let readings: Vec<RawReading> = Vec::new();
        assert!(matches!(
            aggregate_readings(&readings),
            Err(SourceFileError::NoReadings)
        ));
    }

    #[test]
    fn test_repeated_date_run_replaces_earlier_run() -> Result<(), SourceFileError> {
        let readings = [
            reading("2020-01-01", 10.0, 0.0, 0.0),
            reading("2020-01-02", 20.0, 0.0, 0.0),
            reading("2020-01-01", 30.0, 0.0, 0.0),
        ];
        let days = aggregate_readings(&readings)?;
        let keys: Vec<&str> = days.keys().collect();
        assert_eq!(keys, vec!["2020-01-01", "2020-01-02"]);
        assert_eq!(days.get("2020-01-01").unwrap().temperature, 30.0);
        Ok(())
    }

    #[test]
    fn test_aggregate_station_file() -> Result<(), Box<dyn std::error::Error>> {
        let file = station_file(&[
            "KSLC,2019-01-01T00:00:00Z,2,80,1,0,85000",
            "KSLC,2019-01-01T01:00:00Z,4,70,1,180,85100",
            "KSLC,2019-01-02T00:00:00Z,6,60,,,",
        ]);

        let days = aggregate_station_file(
            file.path(),
            &StationColumns::default(),
            ScalarParser::default(),
        )?;

        assert_eq!(days.len(), 2);
        let first = days.get("2019-01-01").unwrap();
        assert_eq!(first.temperature, 3.0);
        assert_eq!(first.humidity, 75.0);
        assert_eq!(first.pressure, 85050.0);
        assert!(first.wind_x.abs() < 1e-12);
        let second = days.get("2019-01-02").unwrap();
        assert_eq!(second.to_array(), [6.0, 0.0, 0.0, 60.0, 0.0]);
        Ok(())
    }
}
