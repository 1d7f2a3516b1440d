//! Scaling and model evaluation for a validated request.

use ndarray::{Array1, ArrayView1};
use tracing::info;

use crate::artifacts::{ArtifactStore, MinMaxScaler, ModeArtifacts};
use crate::error::{Error, Result};
use crate::request::PredictionRequest;
use crate::response::PredictionResponse;

/// A single-output regression model over a fixed-width feature vector.
pub trait Regressor {
    fn n_inputs(&self) -> usize;

    fn predict(&self, features: ArrayView1<f64>) -> Result<f64>;
}

/// Scales `features` and evaluates both coefficient models.
pub fn predict_coefficients<R: Regressor>(
    scaler: &MinMaxScaler,
    cl_model: &R,
    cd_model: &R,
    features: &[f64],
) -> Result<(f64, f64)> {
    let features = Array1::from(features.to_vec());
    let scaled = scaler.transform(features.view())?;

    for model in [cl_model, cd_model] {
        if model.n_inputs() != scaled.len() {
            return Err(Error::ShapeMismatch {
                expected: model.n_inputs(),
                actual: scaled.len(),
            });
        }
    }

    let cl = cl_model.predict(scaled.view())?;
    let cd = cd_model.predict(scaled.view())?;
    for (output, value) in [("cl", cl), ("cd", cd)] {
        if !value.is_finite() {
            return Err(Error::NonFiniteOutput { output, value });
        }
    }
    Ok((cl, cd))
}

/// Runs the full pipeline for a validated request: load, scale, predict, round.
pub fn run_prediction(store: &ArtifactStore, request: &PredictionRequest) -> Result<PredictionResponse> {
    let ModeArtifacts {
        cl_model,
        cd_model,
        scaler,
    } = store.load(request.mode.artifact_prefix)?;

    let (cl, cd) = predict_coefficients(&scaler, &cl_model, &cd_model, &request.features)?;
    info!("Predicted {}: cl={:.5} cd={:.5}", request.mode.name, cl, cd);

    Ok(PredictionResponse::new(cl, cd, request.warning.clone()))
}
