//! Conversion of raw text fields into numbers.
//!
//! Missing instrument values show up as empty fields and count as `0.0`. A field that
//! has content but is not a number is a [`ParseError`], unless the parser was configured
//! with [`NumberPolicy::Zero`].

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-empty field that could not be read as a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid number")]
pub struct ParseError {
    pub value: String,
}

/// What to do with non-empty fields that are not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberPolicy {
    /// Fail with a [`ParseError`].
    #[default]
    Reject,
    /// Substitute `0.0` and log a warning.
    Zero,
}

/// Parses raw scalar fields according to a [`NumberPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarParser {
    policy: NumberPolicy,
}

impl ScalarParser {
    pub fn new(policy: NumberPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NumberPolicy {
        self.policy
    }

    pub fn parse(&self, field: &str) -> Result<f64, ParseError> {
        match (parse_scalar(field), self.policy) {
            (Ok(value), _) => Ok(value),
            (Err(e), NumberPolicy::Zero) => {
                warn!("Substituting 0.0 for malformed numeric field '{}'", e.value);
                Ok(0.0)
            }
            (Err(e), NumberPolicy::Reject) => Err(e),
        }
    }

    /// Like [`ScalarParser::parse`], treating an absent field the same as an empty one.
    pub fn parse_opt(&self, field: Option<&str>) -> Result<f64, ParseError> {
        field.map_or(Ok(0.0), |f| self.parse(f))
    }
}

/// Parses `field` as a decimal number; blank input yields `0.0`.
pub fn parse_scalar(field: &str) -> Result<f64, ParseError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(|_| ParseError {
        value: field.to_string(),
    })
}
