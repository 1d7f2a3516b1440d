//! Loading of per-mode model and scaler artifacts.
//!
//! A mode's artifacts share a file-name prefix inside the model directory:
//!
//! - `<prefix>_cl.json` - lift coefficient network
//! - `<prefix>_cd.json` - drag coefficient network
//! - `<prefix>_scaler.json` - fitted min-max scaler
//!
//! Artifacts are read from disk on every call. Nothing is cached, so models
//! can be replaced while the server runs.

pub mod network;
pub mod scaler;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

pub use network::{Activation, DenseLayer, DenseNetwork};
pub use scaler::MinMaxScaler;

/// Everything needed to answer a prediction for one mode.
#[derive(Debug, Clone)]
pub struct ModeArtifacts {
    pub cl_model: DenseNetwork,
    pub cd_model: DenseNetwork,
    pub scaler: MinMaxScaler,
}

/// Reads artifacts from a fixed base directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    model_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn cl_model_path(&self, prefix: &str) -> PathBuf {
        self.model_dir.join(format!("{prefix}_cl.json"))
    }

    pub fn cd_model_path(&self, prefix: &str) -> PathBuf {
        self.model_dir.join(format!("{prefix}_cd.json"))
    }

    pub fn scaler_path(&self, prefix: &str) -> PathBuf {
        self.model_dir.join(format!("{prefix}_scaler.json"))
    }

    pub fn load(&self, prefix: &str) -> Result<ModeArtifacts> {
        let cl_path = self.cl_model_path(prefix);
        let cd_path = self.cd_model_path(prefix);
        let scaler_path = self.scaler_path(prefix);

        debug!(
            "Loading artifacts for '{}': {}, {}, {}",
            prefix,
            cl_path.display(),
            cd_path.display(),
            scaler_path.display()
        );

        let cl_model = DenseNetwork::from_json(&cl_path, &read(&cl_path)?)?;
        let cd_model = DenseNetwork::from_json(&cd_path, &read(&cd_path)?)?;
        let scaler = MinMaxScaler::from_json(&scaler_path, &read(&scaler_path)?)?;

        Ok(ModeArtifacts {
            cl_model,
            cd_model,
            scaler,
        })
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
