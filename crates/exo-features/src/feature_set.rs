// ─────────────────────────────────────────────────────────────────────
// SCPN Exo Triage — Feature Set
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Typed view over a flat `name -> value` candidate mapping.

use exo_types::error::{ExoError, ExoResult};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Null,
    /// Present but not a number; carries the JSON type name for reporting.
    Other(&'static str),
}

impl FeatureValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(FeatureValue::Number)
                .unwrap_or(FeatureValue::Other("number out of range")),
            Value::Null => FeatureValue::Null,
            Value::Bool(_) => FeatureValue::Other("boolean"),
            Value::String(_) => FeatureValue::Other("string"),
            Value::Array(_) => FeatureValue::Other("array"),
            Value::Object(_) => FeatureValue::Other("object"),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// Candidate features keyed by column name. Unknown keys are carried along
/// untouched and ignored by every later stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    values: BTreeMap<String, FeatureValue>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON object. Anything other than an object is a structural error.
    pub fn from_json(value: &Value) -> ExoResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            ExoError::Structural(format!(
                "candidate must be a JSON object, got {}",
                json_type(value)
            ))
        })?;
        let values = map
            .iter()
            .map(|(k, v)| (k.clone(), FeatureValue::from_json(v)))
            .collect();
        Ok(Self { values })
    }

    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), FeatureValue::Number(v)))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    /// Numeric value of `name`, or `None` when absent, null or non-numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(FeatureValue::as_f64)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), FeatureValue::Number(value));
    }

    pub fn insert_value(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<FeatureValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
