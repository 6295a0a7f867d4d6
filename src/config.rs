//! Run configuration: file-layout assumptions and the policy knobs of the pipeline.
//!
//! Every field has a default matching the Salt Lake County MesoWest/EPA data set, so an
//! empty JSON object (`{}`) is a valid configuration file.

use crate::error::PipelineError;
use crate::parsing::scalar::NumberPolicy;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Column names of the five raw weather quantities in a MesoWest station file, plus the
/// position of the `date T time` timestamp column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct StationColumns {
    #[builder(into, default = "air_temp_set_1".to_string())]
    pub temperature: String,
    #[builder(into, default = "relative_humidity_set_1".to_string())]
    pub humidity: String,
    #[builder(into, default = "wind_speed_set_1".to_string())]
    pub wind_speed: String,
    #[builder(into, default = "wind_direction_set_1".to_string())]
    pub wind_direction: String,
    #[builder(into, default = "pressure_set_1d".to_string())]
    pub pressure: String,
    #[builder(default = 1)]
    pub timestamp_index: usize,
}

impl Default for StationColumns {
    fn default() -> Self {
        StationColumns::builder().build()
    }
}

impl StationColumns {
    /// The set of column names a station file must contain.
    pub fn required_columns(&self) -> BTreeSet<&str> {
        [
            self.temperature.as_str(),
            self.humidity.as_str(),
            self.wind_speed.as_str(),
            self.wind_direction.as_str(),
            self.pressure.as_str(),
        ]
        .into_iter()
        .collect()
    }
}

/// The State/County pair whose rows are kept from raw EPA files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct RegionFilter {
    #[builder(into, default = "Utah".to_string())]
    pub state: String,
    #[builder(into, default = "Salt Lake".to_string())]
    pub county: String,
}

impl Default for RegionFilter {
    fn default() -> Self {
        RegionFilter::builder().build()
    }
}

impl RegionFilter {
    pub fn matches(&self, state: &str, county: &str) -> bool {
        self.state == state && self.county == county
    }
}

/// The default label-collapsing rule: the two most severe AQI categories become "Unhealthy".
pub fn default_severity_merge_rule() -> HashMap<String, String> {
    [("Hazardous", "Unhealthy"), ("Very Unhealthy", "Unhealthy")]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Configuration for a full pipeline run.
///
/// # Examples
///
/// ```
/// use aqforecast::{NumberPolicy, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .train_size(5000)
///     .number_policy(NumberPolicy::Zero)
///     .build();
/// assert_eq!(config.train_size, 5000);
/// assert_eq!(config.collapse_category("Hazardous"), "Unhealthy");
/// assert_eq!(config.collapse_category("Good"), "Good");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of leading (chronological) rows used for training.
    #[builder(default = 7000)]
    pub train_size: usize,
    #[builder(default)]
    pub station_columns: StationColumns,
    /// Category rewrites applied by the joiner before a label is attached.
    #[builder(default = default_severity_merge_rule())]
    pub severity_merge_rule: HashMap<String, String>,
    #[builder(default)]
    pub region: RegionFilter,
    #[builder(default)]
    pub number_policy: NumberPolicy,
    /// Keep the same-day class code as a trailing feature when shifting labels.
    #[builder(default = false)]
    pub carry_current_label: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig::builder().build()
    }
}

impl PipelineConfig {
    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::ConfigRead(path.to_path_buf(), e))?;
        serde_json::from_str(&text).map_err(|e| PipelineError::ConfigParse(path.to_path_buf(), e))
    }

    /// Applies the severity merge rule to a category.
    pub fn collapse_category<'a>(&'a self, category: &'a str) -> &'a str {
        self.severity_merge_rule
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_salt_lake_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.train_size, 7000);
        assert_eq!(config.station_columns.timestamp_index, 1);
        assert_eq!(config.number_policy, NumberPolicy::Reject);
        assert!(config.region.matches("Utah", "Salt Lake"));
        assert!(!config.region.matches("Utah", "Davis"));

        let required = config.station_columns.required_columns();
        assert_eq!(required.len(), 5);
        assert!(required.contains("pressure_set_1d"));
        assert!(required.contains("wind_direction_set_1"));
    }

    #[test]
    fn test_collapse_category() {
        let config = PipelineConfig::default();
        assert_eq!(config.collapse_category("Very Unhealthy"), "Unhealthy");
        assert_eq!(config.collapse_category("Hazardous"), "Unhealthy");
        assert_eq!(config.collapse_category("Moderate"), "Moderate");
    }

    #[test]
    fn test_partial_json_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{"train_size": 120, "number_policy": "zero", "station_columns": {{"pressure": "sea_level_pressure_set_1d"}}}}"#
        )?;

        let config = PipelineConfig::from_json_file(file.path())?;

        assert_eq!(config.train_size, 120);
        assert_eq!(config.number_policy, NumberPolicy::Zero);
        assert_eq!(config.station_columns.pressure, "sea_level_pressure_set_1d");
        assert_eq!(config.station_columns.temperature, "air_temp_set_1");
        assert_eq!(config.severity_merge_rule, default_severity_merge_rule());
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "{{ not json")?;

        let err = PipelineConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigParse(..)));
        Ok(())
    }
}
