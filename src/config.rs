//! Server configuration.
//!
//! Values are layered with the following precedence (highest wins):
//!
//! 1. Command line flags
//! 2. Environment variables (`AEROCOEFF_*`, plus `PORT`)
//! 3. TOML config file (`--config`, or `aerocoeff.toml` in the working directory)
//! 4. Built-in defaults
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! model_dir = "/srv/aerocoeff/models"
//! log_level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "aerocoeff.toml";

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `<prefix>_cl.json`, `<prefix>_cd.json` and `<prefix>_scaler.json`.
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model_dir: default_model_dir(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Loads file and environment layers.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.merge_env_vars(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Applies environment overrides read through `lookup`.
    pub fn merge_env_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("AEROCOEFF_HOST") {
            self.host = host;
        }

        if let Some(port) = lookup("AEROCOEFF_PORT").or_else(|| lookup("PORT")) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid port: {port}")))?;
        }

        if let Some(model_dir) = lookup("AEROCOEFF_MODEL_DIR") {
            self.model_dir = PathBuf::from(model_dir);
        }

        if let Some(log_level) = lookup("AEROCOEFF_LOG_LEVEL") {
            self.log_level = log_level.to_lowercase();
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "invalid log level '{}', expected one of {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        if self.host.trim().is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
