//! The end-to-end steps: raw files to compact per-date datasets, and compact datasets to
//! a split, numeric model input.

use crate::air_quality::epa::{collect_epa_directory, AirQualityDirectoryReport};
use crate::config::PipelineConfig;
use crate::dataset::encode::encode_labels;
use crate::dataset::join::join_datasets;
use crate::dataset::loader::load_dataset;
use crate::dataset::model_input::{FeatureMatrix, FeatureValue};
use crate::dataset::time_series::{shift_labels, shift_labels_carrying_current};
use crate::dataset::writer::{write_air_quality_records, write_daily_records};
use crate::error::PipelineError;
use crate::parsing::scalar::ScalarParser;
use crate::stations::directory::{aggregate_station_directory, StationDirectoryReport};
use crate::types::air_quality_record::AirQualityRecord;
use crate::types::class_map::ClassMap;
use crate::types::date_map::DateMap;
use crate::types::example::{Example, LabeledDataset};
use bon::bon;
use log::info;
use std::path::Path;

/// Name of the extra feature added when the same-day class is carried along.
pub const CURRENT_CLASS_FEATURE: &str = "Current_Class";

/// Encoded, shifted, numeric data ready for a classifier.
#[derive(Debug, Clone)]
pub struct ModelInput {
    /// Class codes of the (collapsed) AQI categories.
    pub classes: ClassMap,
    /// Rows `[0, train_size)`.
    pub train: FeatureMatrix,
    /// The remaining rows.
    pub test: FeatureMatrix,
}

/// Runs the pipeline steps with one configuration.
///
/// # Examples
///
/// ```no_run
/// # use aqforecast::{Pipeline, PipelineConfig, PipelineError};
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), PipelineError> {
/// let pipeline = Pipeline::new(PipelineConfig::default());
///
/// pipeline
///     .build_meso_dataset()
///     .raw_dir(Path::new("raw_meso_data"))
///     .output(Path::new("meso_data.csv"))
///     .call()
///     .await?;
/// pipeline
///     .build_epa_dataset()
///     .raw_dir(Path::new("raw_epa_data"))
///     .output(Path::new("epa_data.csv"))
///     .call()
///     .await?;
///
/// let input = pipeline
///     .model_input()
///     .epa_dataset(Path::new("epa_data.csv"))
///     .meso_dataset(Path::new("meso_data.csv"))
///     .call()?;
/// println!("{} training rows, {} classes", input.train.len(), input.classes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    parser: ScalarParser,
}

#[bon]
impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let parser = ScalarParser::new(config.number_policy);
        Self { config, parser }
    }

    /// Creates a pipeline from a JSON configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self, PipelineError> {
        Ok(Self::new(PipelineConfig::from_json_file(path)?))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Aggregates every raw station file in `raw_dir` and writes the merged daily
    /// averages to `output`.
    #[builder]
    pub async fn build_meso_dataset(
        &self,
        raw_dir: &Path,
        output: &Path,
    ) -> Result<StationDirectoryReport, PipelineError> {
        let report =
            aggregate_station_directory(raw_dir, &self.config.station_columns, self.parser).await?;
        write_daily_records(&report.merged, output)?;
        Ok(report)
    }

    /// Collects the configured region's rows from every raw EPA file in `raw_dir` and
    /// writes them to `output`.
    #[builder]
    pub async fn build_epa_dataset(
        &self,
        raw_dir: &Path,
        output: &Path,
    ) -> Result<AirQualityDirectoryReport, PipelineError> {
        let report = collect_epa_directory(raw_dir, &self.config.region).await?;
        write_air_quality_records(&report.records, output)?;
        Ok(report)
    }

    /// Joins, encodes and shifts the two date-keyed sources.
    ///
    /// Labels are encoded before shifting, so class codes follow the first appearance of
    /// each category in the joined (unshifted) data.
    pub fn labeled_dataset<F: Clone + FeatureValue>(
        &self,
        air_quality: &DateMap<AirQualityRecord>,
        weather: &DateMap<Vec<F>>,
    ) -> (ClassMap, LabeledDataset<F, u32>) {
        let joined = join_datasets(air_quality, weather, &self.config.severity_merge_rule);
        let (classes, encoded) = encode_labels(joined);
        let shifted = if self.config.carry_current_label {
            shift_labels_carrying_current(&encoded, |&code| F::from_class_code(code))
        } else {
            shift_labels(&encoded)
        };
        info!(
            "Built {} next-day examples from {} joined dates",
            shifted.len(),
            encoded.len()
        );
        (classes, shifted)
    }

    /// Converts labelled examples into the split numeric input.
    pub fn split_examples<F: FeatureValue>(
        &self,
        classes: ClassMap,
        examples: &[Example<F, u32>],
        mut feature_names: Vec<String>,
    ) -> Result<ModelInput, PipelineError> {
        if self.config.carry_current_label {
            feature_names.push(CURRENT_CLASS_FEATURE.to_string());
        }
        let matrix = FeatureMatrix::from_examples(examples, feature_names, &self.parser)?;
        let split = matrix.split_at(self.config.train_size);
        info!(
            "Split {} rows into {} training and {} test rows",
            matrix.len(),
            split.train.len(),
            split.test.len()
        );
        Ok(ModelInput {
            classes,
            train: split.train,
            test: split.test,
        })
    }

    /// Loads the compact EPA and MesoWest files and prepares them for a classifier.
    #[builder]
    pub fn model_input(
        &self,
        epa_dataset: &Path,
        meso_dataset: &Path,
    ) -> Result<ModelInput, PipelineError> {
        let air_quality = load_dataset(epa_dataset)?.into_air_quality()?;
        let weather = load_dataset(meso_dataset)?;

        let (classes, examples) = self.labeled_dataset(&air_quality, &weather.rows);
        self.split_examples(classes, &examples, weather.fields)
    }
}
