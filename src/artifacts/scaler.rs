//! Min-max feature scaling with parameters fitted offline.

use ndarray::{Array1, ArrayView1};
use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScalerFile {
    min: Vec<f64>,
    scale: Vec<f64>,
}

/// Applies `x * scale + min` per feature, matching a fitted `MinMaxScaler`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Array1<f64>,
    scale: Array1<f64>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if min.len() != scale.len() {
            return Err(Error::ShapeMismatch {
                expected: min.len(),
                actual: scale.len(),
            });
        }
        Ok(Self {
            min: Array1::from(min),
            scale: Array1::from(scale),
        })
    }

    /// Parses a scaler document; `path` is only used for error messages.
    pub fn from_json(path: &Path, contents: &str) -> Result<Self> {
        let file: ScalerFile = serde_json::from_str(contents)
            .map_err(|e| Error::artifact(path, e.to_string()))?;
        if file.min.is_empty() {
            return Err(Error::artifact(path, "scaler has no features"));
        }
        Self::new(file.min, file.scale).map_err(|e| Error::artifact(path, e.to_string()))
    }

    pub fn n_features(&self) -> usize {
        self.min.len()
    }

    pub fn transform(&self, features: ArrayView1<f64>) -> Result<Array1<f64>> {
        if features.len() != self.n_features() {
            return Err(Error::ShapeMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        Ok(&features * &self.scale + &self.min)
    }
}
