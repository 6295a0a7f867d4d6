use crate::types::air_quality_record::AirQualityRecord;
use crate::types::date_map::DateMap;
use crate::types::example::{Example, LabeledDataset};
use log::info;
use std::collections::HashMap;

/// Inner-joins air-quality and weather data on date.
///
/// Each example is the weather features of a date labelled with that date's (collapsed)
/// AQI category. Examples follow the air-quality map's order; dates missing from either
/// side are dropped. `merge_rule` rewrites categories before they become labels.
pub fn join_datasets<F: Clone>(
    air_quality: &DateMap<AirQualityRecord>,
    weather: &DateMap<Vec<F>>,
    merge_rule: &HashMap<String, String>,
) -> LabeledDataset<F, String> {
    let dataset: LabeledDataset<F, String> = air_quality
        .iter()
        .filter_map(|(date, record)| {
            let features = weather.get(date)?;
            let category = merge_rule
                .get(&record.category)
                .unwrap_or(&record.category);
            Some(Example::new(date, features.clone(), category.clone()))
        })
        .collect();

    info!(
        "Joined {} dates ({} air-quality dates, {} weather dates)",
        dataset.len(),
        air_quality.len(),
        weather.len()
    );
    dataset
}
