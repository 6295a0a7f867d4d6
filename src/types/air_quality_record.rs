use serde::{Deserialize, Serialize};

/// The EPA daily air-quality summary for one date.
///
/// Values are kept as the text found in the source file; only the category is used as a
/// label, and the AQI itself is never converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualityRecord {
    pub aqi: String,
    pub category: String,
    pub defining_parameter: String,
}

impl AirQualityRecord {
    /// Column names used when the records are written to or read from a compact file.
    pub const FIELD_NAMES: [&'static str; 3] = ["AQI", "Category", "Parameter"];

    pub fn new(
        aqi: impl Into<String>,
        category: impl Into<String>,
        defining_parameter: impl Into<String>,
    ) -> Self {
        Self {
            aqi: aqi.into(),
            category: category.into(),
            defining_parameter: defining_parameter.into(),
        }
    }

    /// Builds a record from `[AQI, Category, Parameter, ...]`; `None` if fewer than three fields.
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        match fields {
            [aqi, category, parameter, ..] => Some(Self::new(
                aqi.as_str(),
                category.as_str(),
                parameter.as_str(),
            )),
            _ => None,
        }
    }

    pub fn to_fields(&self) -> [&str; 3] {
        [&self.aqi, &self.category, &self.defining_parameter]
    }
}
