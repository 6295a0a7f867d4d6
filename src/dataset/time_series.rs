//! One-step-ahead relabelling: turns "classify today" into "predict tomorrow".

use crate::types::example::{Example, LabeledDataset};

/// Gives every example the label of the example after it.
///
/// The last example has no successor and is dropped, so the output has
/// `max(0, len - 1)` examples. Features and dates are unchanged.
pub fn shift_labels<F: Clone, L: Clone>(dataset: &[Example<F, L>]) -> LabeledDataset<F, L> {
    dataset
        .windows(2)
        .map(|pair| pair[0].clone().with_label(pair[1].label.clone()))
        .collect()
}

/// Like [`shift_labels`], but keeps each example's own label as a trailing feature,
/// converted with `to_feature`.
pub fn shift_labels_carrying_current<F: Clone, L: Clone>(
    dataset: &[Example<F, L>],
    to_feature: impl Fn(&L) -> F,
) -> LabeledDataset<F, L> {
    dataset
        .windows(2)
        .map(|pair| {
            let mut example = pair[0].clone();
            example.features.push(to_feature(&example.label));
            example.with_label(pair[1].label.clone())
        })
        .collect()
}
