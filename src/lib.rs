//! # aerocoeff
//!
//! Serves lift (CL) and drag (CD) coefficient predictions from pre-trained
//! regression models over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! aerocoeff serve --model-dir ./models --port 5000
//! aerocoeff predict --mode "Missile Shape 1" --mach 1.2 --aoa 4
//! ```
//!
//! ## Modules
//!
//! - `artifacts` - Per-mode model and scaler loading
//! - `config` - Layered server configuration
//! - `error` - Error type and its HTTP mapping
//! - `modes` - Static table of supported shapes
//! - `predictor` - Scaling and model evaluation
//! - `request` - Validation of raw prediction requests
//! - `response` - Prediction response formatting
//! - `server` - axum router and handlers
pub mod artifacts;
pub mod config;
pub mod error;
pub mod modes;
pub mod predictor;
pub mod request;
pub mod response;
pub mod server;

pub use error::{Error, Result};
