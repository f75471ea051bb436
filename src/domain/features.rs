use crate::domain::errors::PredictionError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

pub const FEATURE_COUNT: usize = 6;

/// Ordered list of feature names.
/// This order MUST match the column order used when the model was trained.
/// Inference is positional, so any change here is a breaking change for saved models.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Number_of_Customers_Per_Day",
    "Average_Order_Value",
    "Operating_Hours_Per_Day",
    "Number_of_Employees",
    "Marketing_Spend_Per_Day",
    "Location_Foot_Traffic",
];

/// A single row of model inputs, always complete and in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Value for a named feature, if the name is one of `FEATURE_NAMES`.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }

    /// Pairs of (feature name, value) in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    /// Row for smartcore models (f64 precision).
    pub fn to_f64_row(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// Row for ONNX inference, which expects f32 tensors.
    pub fn to_f32_row(&self) -> Vec<f32> {
        self.0.iter().map(|v| *v as f32).collect()
    }

    /// Builds a vector from submitted form fields.
    ///
    /// Fields are checked in column order and the first problem is reported.
    /// Keys that are not feature names are ignored.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, PredictionError> {
        Self::from_fields(|name| form.get(name).map(String::as_str))
    }

    pub fn from_fields<'a, F>(lookup: F) -> Result<Self, PredictionError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            *slot = parse_field(name, lookup(name))?;
        }
        Ok(Self(values))
    }
}

/// Parses one submitted value. Blank counts as missing.
fn parse_field(name: &str, raw: Option<&str>) -> Result<f64, PredictionError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(PredictionError::MissingField {
            field: name.to_string(),
        });
    }

    match raw.parse::<f64>() {
        // NaN and infinities parse, but cannot be echoed back as JSON numbers
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PredictionError::InvalidType {
            field: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
