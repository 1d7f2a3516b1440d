//! Feed-forward dense regression networks.
//!
//! Models are stored as a list of fully connected layers, each with a weight
//! matrix of shape `(inputs, units)`, a bias vector and an activation. This is
//! the layout Keras uses for `Dense` kernels, so a trained sequential model
//! can be exported by dumping `layer.get_weights()` per layer.

use ndarray::{Array1, Array2, ArrayView1};
use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::predictor::Regressor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Elu,
    Softplus,
    LeakyRelu,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
            Activation::Elu => {
                if x > 0.0 {
                    x
                } else {
                    x.exp_m1()
                }
            }
            Activation::Softplus => x.max(0.0) + (-x.abs()).exp().ln_1p(),
            // Keras default negative slope
            Activation::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    0.3 * x
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerFile {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    #[serde(default = "default_activation")]
    activation: Activation,
}

fn default_activation() -> Activation {
    Activation::Linear
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkFile {
    layers: Vec<LayerFile>,
}

#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

impl DenseLayer {
    pub fn new(weights: Array2<f64>, bias: Array1<f64>, activation: Activation) -> Result<Self> {
        if weights.ncols() != bias.len() {
            return Err(Error::ShapeMismatch {
                expected: weights.ncols(),
                actual: bias.len(),
            });
        }
        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    pub fn inputs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn units(&self) -> usize {
        self.weights.ncols()
    }

    fn forward(&self, input: ArrayView1<f64>) -> Array1<f64> {
        let activation = self.activation;
        (input.dot(&self.weights) + &self.bias).mapv_into(|x| activation.apply(x))
    }
}

/// A stack of dense layers ending in a single output unit.
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        let output_units = layers.last().map_or(0, DenseLayer::units);
        if output_units != 1 {
            return Err(Error::ShapeMismatch {
                expected: 1,
                actual: output_units,
            });
        }
        for pair in layers.windows(2) {
            if pair[0].units() != pair[1].inputs() {
                return Err(Error::ShapeMismatch {
                    expected: pair[0].units(),
                    actual: pair[1].inputs(),
                });
            }
        }
        Ok(Self { layers })
    }

    /// Parses a network document; `path` is only used for error messages.
    pub fn from_json(path: &Path, contents: &str) -> Result<Self> {
        let file: NetworkFile = serde_json::from_str(contents)
            .map_err(|e| Error::artifact(path, e.to_string()))?;

        let layers = file
            .layers
            .into_iter()
            .enumerate()
            .map(|(index, layer)| {
                let weights = matrix_from_rows(layer.weights).ok_or_else(|| {
                    Error::artifact(path, format!("layer {index} has ragged or empty weights"))
                })?;
                DenseLayer::new(weights, Array1::from(layer.bias), layer.activation)
                    .map_err(|e| Error::artifact(path, format!("layer {index}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(layers).map_err(|e| Error::artifact(path, e.to_string()))
    }
}

impl Regressor for DenseNetwork {
    fn n_inputs(&self) -> usize {
        self.layers[0].inputs()
    }

    fn predict(&self, features: ArrayView1<f64>) -> Result<f64> {
        if features.len() != self.n_inputs() {
            return Err(Error::ShapeMismatch {
                expected: self.n_inputs(),
                actual: features.len(),
            });
        }

        let mut activations = features.to_owned();
        for layer in &self.layers {
            activations = layer.forward(activations.view());
        }
        Ok(activations[0])
    }
}

fn matrix_from_rows(rows: Vec<Vec<f64>>) -> Option<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first()?.len();
    if n_cols == 0 || rows.iter().any(|row| row.len() != n_cols) {
        return None;
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat).ok()
}
