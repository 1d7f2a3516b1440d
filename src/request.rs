//! Validation of raw `/predict` bodies.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::modes::{Feature, ModeConfig};

/// A request that passed validation, with features in the mode's order.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub mode: &'static ModeConfig,
    pub features: Vec<f64>,
    pub warning: Option<String>,
}

impl PredictionRequest {
    /// Validates a raw request body.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::MissingInput);
        }
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            // A present but unrepresentable number is a bad field, not a missing body.
            if e.to_string().starts_with("number out of range") {
                Error::InvalidNumber { field: "number" }
            } else {
                Error::MissingInput
            }
        })?;
        Self::from_value(&value)
    }

    /// Validates an already parsed JSON document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = match value {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(Error::MissingInput),
        };

        let mode_name = object
            .get("mode")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim();
        let mode = ModeConfig::lookup(mode_name)
            .ok_or_else(|| Error::UnsupportedMode(mode_name.to_string()))?;

        let features = mode
            .features
            .iter()
            .map(|&feature| read_number(object, feature))
            .collect::<Result<Vec<_>>>()?;

        let warning = match mode.aoa_envelope {
            Some(envelope) => {
                let aoa = mode
                    .features
                    .iter()
                    .position(|&f| f == Feature::Aoa)
                    .map(|i| features[i])
                    .ok_or(Error::InvalidNumber { field: "aoa" })?;
                envelope.check(aoa)?
            }
            None => None,
        };

        Ok(Self {
            mode,
            features,
            warning,
        })
    }
}

/// Reads a finite number from a JSON number or a numeric string.
fn read_number(object: &Map<String, Value>, feature: Feature) -> Result<f64> {
    let invalid = || Error::InvalidNumber {
        field: feature.key(),
    };

    let number = match object.get(feature.key()) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|n| n.is_finite()).ok_or_else(invalid)
}
