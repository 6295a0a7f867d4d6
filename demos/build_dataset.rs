//! Builds both compact datasets from raw directories and prints the standardized
//! training frame.
//!
//! ```text
//! cargo run --example build_dataset -- raw_meso_data raw_epa_data [config.json]
//! ```

use aqforecast::{Pipeline, PipelineConfig, PipelineError};
use std::env;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::init();
    configure_polars_display();

    let args: Vec<String> = env::args().skip(1).collect();
    let raw_meso = PathBuf::from(args.first().map_or("raw_meso_data", String::as_str));
    let raw_epa = PathBuf::from(args.get(1).map_or("raw_epa_data", String::as_str));
    let pipeline = match args.get(2) {
        Some(config) => Pipeline::from_config_file(Path::new(config))?,
        None => Pipeline::new(PipelineConfig::default()),
    };

    let meso_dataset = Path::new("meso_data.csv");
    let epa_dataset = Path::new("epa_data.csv");

    let stations = pipeline
        .build_meso_dataset()
        .raw_dir(&raw_meso)
        .output(meso_dataset)
        .call()
        .await?;
    println!(
        "{} station files merged into {} days ({} skipped)",
        stations.processed.len(),
        stations.merged.len(),
        stations.failures.len()
    );

    let air_quality = pipeline
        .build_epa_dataset()
        .raw_dir(&raw_epa)
        .output(epa_dataset)
        .call()
        .await?;
    println!(
        "{} EPA files gave {} days ({} skipped)",
        air_quality.processed.len(),
        air_quality.records.len(),
        air_quality.failures.len()
    );

    let input = pipeline
        .model_input()
        .epa_dataset(epa_dataset)
        .meso_dataset(meso_dataset)
        .call()?;
    for (label, code) in input.classes.iter() {
        println!("class {code}: {label}");
    }

    let train = input
        .train
        .to_standardized_frame()
        .map_err(aqforecast::DatasetError::from)?;
    println!("{:#?}", train);
    println!("{} test rows", input.test.len());

    Ok(())
}

fn configure_polars_display() {
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
