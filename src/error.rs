use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No input data provided")]
    MissingInput,

    #[error("Unsupported mode: {0}")]
    UnsupportedMode(String),

    #[error("Please provide valid numbers for all parameters")]
    InvalidNumber { field: &'static str },

    #[error("Angle of attack must be between {min} and {max} degrees")]
    AoaOutOfRange { aoa: f64, min: f64, max: f64 },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid artifact {}: {message}", path.display())]
    Artifact { path: PathBuf, message: String },

    #[error("Shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Model produced a non-finite {output} value ({value})")]
    NonFiniteOutput { output: &'static str, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn artifact(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Artifact {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Body returned for every rejected request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::InvalidNumber { field } => {
                warn!("Rejecting request: '{}' is missing or not a number", field)
            }
            Error::AoaOutOfRange { aoa, .. } => {
                warn!("Rejecting request: angle of attack {} out of range", aoa)
            }
            other => warn!("Rejecting request: {}", other),
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_number_message_is_fixed() {
        let mach = Error::InvalidNumber { field: "mach" };
        let aoa = Error::InvalidNumber { field: "aoa" };
        assert_eq!(mach.to_string(), aoa.to_string());
    }

    #[test]
    fn test_unsupported_mode_names_mode() {
        let err = Error::UnsupportedMode("Glider".to_string());
        assert_eq!(err.to_string(), "Unsupported mode: Glider");
    }

    #[test]
    fn test_every_error_is_bad_request() {
        let errors = vec![
            Error::MissingInput,
            Error::UnsupportedMode("x".into()),
            Error::AoaOutOfRange {
                aoa: 30.0,
                min: -4.0,
                max: 25.0,
            },
            Error::artifact("models/NASA_cl.json", "no layers"),
            Error::ShapeMismatch {
                expected: 5,
                actual: 2,
            },
        ];

        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
