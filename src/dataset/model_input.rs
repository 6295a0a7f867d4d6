//! The numeric hand-off to classifier training: a feature matrix with integer labels,
//! in chronological row order, plus the fixed-index split and per-column standardization
//! that precede fitting.

use crate::dataset::error::DatasetError;
use crate::parsing::scalar::{ParseError, ScalarParser};
use crate::types::example::Example;
use log::warn;
use polars::prelude::*;

/// Name of the label column in frames produced by [`FeatureMatrix::to_frame`].
pub const LABEL_COLUMN: &str = "label";
/// Name of the date column in frames produced by [`FeatureMatrix::to_frame`].
pub const DATE_COLUMN: &str = "Date";

/// A feature value that can be turned into a number.
pub trait FeatureValue: Sized {
    fn to_number(&self, parser: &ScalarParser) -> Result<f64, ParseError>;

    /// Represents a class code as a feature of this type.
    fn from_class_code(code: u32) -> Self;
}

impl FeatureValue for f64 {
    fn to_number(&self, _parser: &ScalarParser) -> Result<f64, ParseError> {
        Ok(*self)
    }

    fn from_class_code(code: u32) -> Self {
        f64::from(code)
    }
}

impl FeatureValue for String {
    fn to_number(&self, parser: &ScalarParser) -> Result<f64, ParseError> {
        parser.parse(self)
    }

    fn from_class_code(code: u32) -> Self {
        code.to_string()
    }
}

/// Numeric features and class codes, one row per example, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    feature_names: Vec<String>,
    dates: Vec<String>,
    rows: Vec<Vec<f64>>,
    labels: Vec<u32>,
}

/// A chronological train/test partition of a [`FeatureMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChronologicalSplit {
    pub train: FeatureMatrix,
    pub test: FeatureMatrix,
}

impl FeatureMatrix {
    /// Converts encoded examples into numbers.
    ///
    /// Every example must have exactly `feature_names.len()` features.
    pub fn from_examples<F: FeatureValue>(
        examples: &[Example<F, u32>],
        feature_names: Vec<String>,
        parser: &ScalarParser,
    ) -> Result<Self, DatasetError> {
        let mut rows = Vec::with_capacity(examples.len());
        for (row, example) in examples.iter().enumerate() {
            if example.features.len() != feature_names.len() {
                return Err(DatasetError::RaggedFeatures {
                    row,
                    expected: feature_names.len(),
                    found: example.features.len(),
                });
            }
            let values = example
                .features
                .iter()
                .enumerate()
                .map(|(column, value)| {
                    value
                        .to_number(parser)
                        .map_err(|source| DatasetError::Parse {
                            row,
                            column,
                            date: example.date.clone(),
                            source,
                        })
                })
                .collect::<Result<Vec<f64>, DatasetError>>()?;
            rows.push(values);
        }

        Ok(Self {
            feature_names,
            dates: examples.iter().map(|e| e.date.clone()).collect(),
            rows,
            labels: examples.iter().map(|e| e.label).collect(),
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Splits at a fixed row index: rows `[0, train_size)` train, the rest test.
    /// `train_size` larger than the matrix puts every row in the training set.
    pub fn split_at(&self, train_size: usize) -> ChronologicalSplit {
        let cut = train_size.min(self.len());
        let part = |range: std::ops::Range<usize>| FeatureMatrix {
            feature_names: self.feature_names.clone(),
            dates: self.dates[range.clone()].to_vec(),
            rows: self.rows[range.clone()].to_vec(),
            labels: self.labels[range].to_vec(),
        };
        if cut < train_size {
            warn!(
                "Requested {} training rows but only {} are available; test set is empty",
                train_size,
                self.len()
            );
        }
        ChronologicalSplit {
            train: part(0..cut),
            test: part(cut..self.len()),
        }
    }

    /// A frame with the date column, one `f64` column per feature and the `u32` label column.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.feature_names.len() + 2);
        columns.push(Column::new(DATE_COLUMN.into(), self.dates.clone()));
        for (idx, name) in self.feature_names.iter().enumerate() {
            let values: Vec<f64> = self.rows.iter().map(|row| row[idx]).collect();
            columns.push(Column::new(name.as_str().into(), values));
        }
        columns.push(Column::new(LABEL_COLUMN.into(), self.labels.clone()));
        DataFrame::new(columns)
    }

    /// [`FeatureMatrix::to_frame`] with every feature column standardized.
    pub fn to_standardized_frame(&self) -> PolarsResult<DataFrame> {
        standardize(self.to_frame()?, &self.feature_names)
    }
}

/// Rescales `columns` of `df` to zero mean and unit population variance.
///
/// Constant columns become all zeros. Other columns are left as they are.
pub fn standardize(df: DataFrame, columns: &[String]) -> PolarsResult<DataFrame> {
    if df.height() == 0 {
        return Ok(df);
    }
    let exprs: Vec<Expr> = columns
        .iter()
        .map(|name| {
            let values = col(name.as_str());
            let std_dev = values.clone().std(0);
            // A constant column's computed std is rounding noise, not necessarily 0.
            let constant = values.clone().max().eq(values.clone().min());
            when(constant)
                .then(lit(0.0f64))
                .otherwise((values.clone() - values.mean()) / std_dev)
                .alias(name.as_str())
        })
        .collect();
    df.lazy().with_columns(exprs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::scalar::NumberPolicy;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    fn examples(rows: &[(&str, [&str; 2], u32)]) -> Vec<Example<String, u32>> {
        rows.iter()
            .map(|(date, features, label)| {
                Example::new(*date, features.iter().map(|f| f.to_string()).collect(), *label)
            })
            .collect()
    }

    #[test]
    fn test_parses_features_and_keeps_order() -> Result<(), DatasetError> {
        let input = examples(&[
            ("2020-01-01", ["10", ""], 1),
            ("2020-01-02", ["-2.5", "1000"], 2),
        ]);

        let matrix = FeatureMatrix::from_examples(&input, names(&["a", "b"]), &ScalarParser::default())?;

        assert_eq!(matrix.rows(), &[vec![10.0, 0.0], vec![-2.5, 1000.0]]);
        assert_eq!(matrix.labels(), &[1, 2]);
        assert_eq!(matrix.dates(), &["2020-01-01".to_string(), "2020-01-02".to_string()]);
        Ok(())
    }

    #[test]
    fn test_malformed_feature_is_reported() {
        let input = examples(&[("2020-01-01", ["10", "x"], 1)]);
        let err = FeatureMatrix::from_examples(&input, names(&["a", "b"]), &ScalarParser::default())
            .unwrap_err();
        match err {
            DatasetError::Parse { row, column, date, .. } => {
                assert_eq!((row, column), (0, 1));
                assert_eq!(date, "2020-01-01");
            }
            other => panic!("unexpected error: {other}"),
        }

        let lenient = FeatureMatrix::from_examples(
            &input,
            names(&["a", "b"]),
            &ScalarParser::new(NumberPolicy::Zero),
        );
        assert!(lenient.is_ok());
    }

    #[test]
    fn test_ragged_features_are_rejected() {
        let input = examples(&[("2020-01-01", ["1", "2"], 1)]);
        let err = FeatureMatrix::from_examples(&input, names(&["a"]), &ScalarParser::default())
            .unwrap_err();
        assert!(matches!(err, DatasetError::RaggedFeatures { expected: 1, found: 2, .. }));
    }

    #[test]
    fn test_split_at_fixed_index() -> Result<(), DatasetError> {
        let input: Vec<Example<f64, u32>> = (0..10)
            .map(|i| Example::new(format!("d{i}"), vec![i as f64], i as u32 % 3 + 1))
            .collect();
        let matrix = FeatureMatrix::from_examples(&input, names(&["x"]), &ScalarParser::default())?;

        let split = matrix.split_at(7);
        assert_eq!(split.train.len(), 7);
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.rows()[6], vec![6.0]);
        assert_eq!(split.test.rows()[0], vec![7.0]);
        assert_eq!(split.test.labels(), &[2, 3, 1]);

        let all_train = matrix.split_at(7000);
        assert_eq!(all_train.train.len(), 10);
        assert!(all_train.test.is_empty());
        Ok(())
    }

    #[test]
    fn test_frame_layout() -> Result<(), Box<dyn std::error::Error>> {
        let input = examples(&[("2020-01-01", ["10", "20"], 1)]);
        let matrix = FeatureMatrix::from_examples(&input, names(&["a", "b"]), &ScalarParser::default())?;

        let df = matrix.to_frame()?;

        assert_eq!(df.shape(), (1, 4));
        assert_eq!(df.column("b")?.f64()?.get(0), Some(20.0));
        assert_eq!(df.column(LABEL_COLUMN)?.u32()?.get(0), Some(1));
        assert_eq!(df.column(DATE_COLUMN)?.str()?.get(0), Some("2020-01-01"));
        Ok(())
    }

    #[test]
    fn test_standardization_uses_population_variance() -> Result<(), Box<dyn std::error::Error>> {
        let input: Vec<Example<f64, u32>> = [1.0, 2.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| Example::new(format!("d{i}"), vec![v, 5.0], 1))
            .collect();
        let matrix = FeatureMatrix::from_examples(&input, names(&["x", "constant"]), &ScalarParser::default())?;

        let df = matrix.to_standardized_frame()?;

        let x: Vec<f64> = df.column("x")?.f64()?.into_no_null_iter().collect();
        let expected = 1.0 / (2.0f64 / 3.0).sqrt();
        assert!((x[0] + expected).abs() < 1e-9);
        assert!(x[1].abs() < 1e-9);
        assert!((x[2] - expected).abs() < 1e-9);

        let constant: Vec<f64> = df.column("constant")?.f64()?.into_no_null_iter().collect();
        assert_eq!(constant, vec![0.0, 0.0, 0.0]);

        let labels: Vec<u32> = df.column(LABEL_COLUMN)?.u32()?.into_no_null_iter().collect();
        assert_eq!(labels, vec![1, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_inexact_constant_columns_become_zero() -> Result<(), Box<dyn std::error::Error>> {
        for (value, rows) in [(0.1, 7), (0.7, 7), (1.1, 5), (3.3, 3), (86012.3, 10)] {
            let input: Vec<Example<f64, u32>> = (0..rows)
                .map(|i| Example::new(format!("d{i}"), vec![value, i as f64], 1))
                .collect();
            let matrix = FeatureMatrix::from_examples(
                &input,
                names(&["constant", "x"]),
                &ScalarParser::default(),
            )?;

            let df = matrix.to_standardized_frame()?;

            let constant: Vec<f64> = df.column("constant")?.f64()?.into_no_null_iter().collect();
            assert_eq!(constant, vec![0.0; rows], "constant {value} over {rows} rows");
            let x: Vec<f64> = df.column("x")?.f64()?.into_no_null_iter().collect();
            assert!(x[0] < 0.0 && x[rows - 1] > 0.0);
        }
        Ok(())
    }
}
