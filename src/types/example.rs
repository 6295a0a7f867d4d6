/// One supervised example: the features for a date and the label attached to it.
///
/// `F` is the feature type (raw text straight from a compact file, or `f64`), and `L` is the
/// label type (the category string before encoding, its class code afterwards).
#[derive(Debug, Clone, PartialEq)]
pub struct Example<F, L> {
    /// The date the features were observed on.
    pub date: String,
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> Example<F, L> {
    pub fn new(date: impl Into<String>, features: Vec<F>, label: L) -> Self {
        Self {
            date: date.into(),
            features,
            label,
        }
    }

    /// Replaces the label, keeping date and features.
    pub fn with_label<M>(self, label: M) -> Example<F, M> {
        Example {
            date: self.date,
            features: self.features,
            label,
        }
    }
}

/// Examples in chronological order.
pub type LabeledDataset<F, L> = Vec<Example<F, L>>;
