use crate::types::class_map::ClassMap;
use crate::types::example::LabeledDataset;
use log::info;

/// Replaces string labels with dense class codes (1, 2, ...) in first-seen order.
///
/// Features are passed through untouched.
pub fn encode_labels<F>(dataset: LabeledDataset<F, String>) -> (ClassMap, LabeledDataset<F, u32>) {
    let mut classes = ClassMap::new();
    let encoded: LabeledDataset<F, u32> = dataset
        .into_iter()
        .map(|example| {
            let code = classes.code_for(&example.label);
            example.with_label(code)
        })
        .collect();

    info!(
        "Encoded {} classes: {:?}",
        classes.len(),
        classes.iter().collect::<Vec<_>>()
    );
    (classes, encoded)
}
