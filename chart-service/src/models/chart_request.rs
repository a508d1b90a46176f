use crate::error::ChartError;
use serde_json::Value;

/// Key the series is read from.
pub const VALUES_KEY: &str = "valores";
/// English spelling, accepted when `valores` is absent.
pub const VALUES_ALIAS: &str = "values";

/// A validated series of numbers to plot against their index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub values: Vec<f64>,
}

impl ChartRequest {
    /// Parses a raw request body.
    pub fn from_slice(body: &[u8], max_values: usize) -> Result<Self, ChartError> {
        let payload: Value = serde_json::from_slice(body).map_err(ChartError::MalformedJson)?;
        Self::from_value(payload, max_values)
    }

    pub fn from_value(payload: Value, max_values: usize) -> Result<Self, ChartError> {
        let Value::Object(mut object) = payload else {
            return Err(ChartError::NotAnObject);
        };

        let raw = object
            .remove(VALUES_KEY)
            .or_else(|| object.remove(VALUES_ALIAS))
            .ok_or(ChartError::MissingValues)?;

        let Value::Array(items) = raw else {
            return Err(ChartError::ValuesNotArray);
        };

        if items.len() > max_values {
            return Err(ChartError::TooManyValues { max: max_values });
        }

        let values = items
            .iter()
            .enumerate()
            .map(|(index, item)| item.as_f64().ok_or(ChartError::NonNumericValue { index }))
            .collect::<Result<Vec<f64>, ChartError>>()?;

        if !span(&values).is_finite() {
            return Err(ChartError::RangeTooWide);
        }

        Ok(Self { values })
    }
}

/// Distance between the smallest and largest value; 0 for an empty series.
fn span(values: &[f64]) -> f64 {
    let Some(first) = values.first().copied() else {
        return 0.0;
    };
    let (min, max) = values
        .iter()
        .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)));
    max - min
}
