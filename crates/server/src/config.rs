//! Server configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use data_facade::DEFAULT_DATA_DIR;
use var_facade::{InformationCriterion, VarConfig};

use crate::error::ServerError;

/// Upload and request body limit when `CCI_MAX_UPLOAD_BYTES` is unset.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime settings for the web server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `tar1.csv` .. `tar8.csv`
    pub data_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Defaults applied to every forecast request
    pub forecast: VarConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            forecast: VarConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `CCI_DATA_DIR`, `CCI_MAX_UPLOAD_BYTES`,
    /// `CCI_STEPS`, `CCI_MAX_LAGS` and `CCI_CRITERION`.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_var("PORT", &port)?;
        }
        if let Some(dir) = lookup("CCI_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(limit) = lookup("CCI_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = parse_var("CCI_MAX_UPLOAD_BYTES", &limit)?;
        }
        if let Some(steps) = lookup("CCI_STEPS") {
            config.forecast.steps = parse_var("CCI_STEPS", &steps)?;
        }
        if let Some(max_lags) = lookup("CCI_MAX_LAGS") {
            config.forecast.max_lags = parse_var("CCI_MAX_LAGS", &max_lags)?;
        }
        if let Some(criterion) = lookup("CCI_CRITERION") {
            config.forecast.criterion = criterion
                .parse::<InformationCriterion>()
                .map_err(|e| ServerError::Config(e.to_string()))?;
        }

        config
            .forecast
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Socket address from `host` and `port`.
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::Config(format!("invalid HOST:PORT '{}:{}'", self.host, self.port)))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ServerError> {
    value.trim().parse().map_err(|_| ServerError::InvalidVar {
        name: name.to_string(),
        value: value.to_string(),
    })
}
