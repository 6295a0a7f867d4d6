mod air_quality;
mod config;
mod dataset;
mod error;
mod parsing;
mod pipeline;
mod sources;
mod stations;
mod types;
mod utils;

pub use config::*;
pub use error::PipelineError;
pub use pipeline::*;

pub use parsing::scalar::*;
pub use sources::error::SourceFileError;

pub use stations::aggregate::*;
pub use stations::directory::*;
pub use stations::merge::merge_daily_records;
pub use stations::reader::{read_station_file, split_timestamp, RawReading};

pub use air_quality::epa::*;

pub use dataset::encode::encode_labels;
pub use dataset::error::DatasetError;
pub use dataset::join::join_datasets;
pub use dataset::loader::*;
pub use dataset::model_input::*;
pub use dataset::time_series::*;
pub use dataset::writer::*;

pub use types::air_quality_record::AirQualityRecord;
pub use types::class_map::ClassMap;
pub use types::daily_record::DailyRecord;
pub use types::date_map::DateMap;
pub use types::example::{Example, LabeledDataset};

pub use utils::list_input_files;
