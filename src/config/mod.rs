//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `TEXTSCORE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_IGNORE_LENGTH, DEFAULT_MAX_BLOCKS, DEFAULT_PORT,
};
use crate::embedding::DetectorConfig;
use crate::scoring::SchedulerConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TEXTSCORE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `0.0.0.0`.
    pub bind_addr: IpAddr,

    /// Classifier directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// When unset the detector runs in stub mode.
    pub model_path: Option<PathBuf>,

    /// Maximum texts per model invocation. Default: `4`.
    pub batch_size: usize,

    /// Trimmed-length threshold below which (inclusive) texts are skipped. Default: `5`.
    pub ignore_length: usize,

    /// Tokenizer truncation length. When unset the encoder's default applies
    /// (`512` for BERT-family, `768` for DeBERTa).
    pub max_seq_len: Option<usize>,

    /// Maximum blocks accepted per `/score` request. Default: `1000`.
    pub max_blocks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            model_path: None,
            batch_size: DEFAULT_BATCH_SIZE,
            ignore_length: DEFAULT_IGNORE_LENGTH,
            max_seq_len: None,
            max_blocks: DEFAULT_MAX_BLOCKS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "TEXTSCORE_PORT";
    const ENV_BIND_ADDR: &'static str = "TEXTSCORE_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "TEXTSCORE_MODEL_PATH";
    const ENV_BATCH_SIZE: &'static str = "TEXTSCORE_BATCH_SIZE";
    const ENV_IGNORE_LENGTH: &'static str = "TEXTSCORE_IGNORE_LENGTH";
    const ENV_MAX_SEQ_LEN: &'static str = "TEXTSCORE_MAX_SEQ_LEN";
    const ENV_MAX_BLOCKS: &'static str = "TEXTSCORE_MAX_BLOCKS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let batch_size = Self::parse_usize_from_env(Self::ENV_BATCH_SIZE, defaults.batch_size)?;
        let ignore_length =
            Self::parse_usize_from_env(Self::ENV_IGNORE_LENGTH, defaults.ignore_length)?;
        let max_seq_len = Self::parse_optional_usize_from_env(Self::ENV_MAX_SEQ_LEN)?
            .or(defaults.max_seq_len);
        let max_blocks = Self::parse_usize_from_env(Self::ENV_MAX_BLOCKS, defaults.max_blocks)?;

        Ok(Self {
            port,
            bind_addr,
            model_path,
            batch_size,
            ignore_length,
            max_seq_len,
            max_blocks,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_BATCH_SIZE,
                reason: "batch size must be at least 1".to_string(),
            });
        }

        if self.max_seq_len == Some(0) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_SEQ_LEN,
                reason: "max sequence length must be at least 1".to_string(),
            });
        }

        if self.max_blocks == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_BLOCKS,
                reason: "max blocks must be at least 1".to_string(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Address the server binds to. IPv6 addresses display bracketed.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Scheduler settings derived from this configuration.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            ignore_length: self.ignore_length,
            batch_size: self.batch_size,
        }
    }

    /// Detector settings derived from this configuration.
    pub fn detector_config(&self) -> DetectorConfig {
        let config = match &self.model_path {
            Some(path) => DetectorConfig::new(path.clone()),
            None => DetectorConfig::stub(),
        };
        match self.max_seq_len {
            Some(max_seq_len) => config.with_max_seq_len(max_seq_len),
            None => config,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::IntParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_usize_from_env(
        var_name: &'static str,
    ) -> Result<Option<usize>, ConfigError> {
        match env::var(var_name) {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::IntParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            _ => Ok(None),
        }
    }
}
