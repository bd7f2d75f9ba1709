//! Server configuration

use config::{Config, ConfigError, Environment, File};
use inference_engine::{MODEL_FILE, SCALER_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "car-price";

/// Prefix of environment overrides, e.g. `CAR_PRICE_PORT`
pub const ENV_PREFIX: &str = "CAR_PRICE";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port
    pub port: u16,

    /// Directory holding the model and scaler artifacts
    pub artifact_dir: PathBuf,

    /// Model artifact file name
    pub model_file: String,

    /// Scaler artifact file name
    pub scaler_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            artifact_dir: PathBuf::from("."),
            model_file: MODEL_FILE.to_string(),
            scaler_file: SCALER_FILE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then `car-price.toml` if present, then `CAR_PRICE_*` variables
    pub fn load() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Defaults overridden by a single configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full path of the model artifact
    pub fn model_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.model_file)
    }

    /// Full path of the scaler artifact
    pub fn scaler_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.scaler_file)
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let fallback = ServerConfig::default();

    Config::builder()
        .set_default("host", fallback.host)?
        .set_default("port", i64::from(fallback.port))?
        .set_default("artifact_dir", fallback.artifact_dir.to_string_lossy().into_owned())?
        .set_default("model_file", fallback.model_file)?
        .set_default("scaler_file", fallback.scaler_file)
}
