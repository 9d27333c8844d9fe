//! # Configuration
//!
//! Runtime settings read from the environment. Call `dotenvy::dotenv()` first
//! to pick up a local `.env` file.
//!
//! ## Environment Variables
//!
//! - `APP_ADDR` - listen address, defaults to `0.0.0.0:8090`
//! - `LOG_FORMAT` - `json`, `text` or `pretty`, defaults to `text`
//! - `LOG_LEVEL` - an `EnvFilter` directive, defaults to `info`
//! - `LOG_NAME` - service name stamped on JSON records, defaults to `faultline`
//! - `LOG_FIELDS` - static fields for JSON records as `key=value,key=value`

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::utils::constant::{DEFAULT_ADDR, DEFAULT_LOG_LEVEL, DEFAULT_LOG_NAME};

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported log format '{0}'")]
    UnsupportedFormat(String),

    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("invalid log field '{0}', expected key=value")]
    InvalidField(String),

    #[error("invalid listen address '{0}'")]
    InvalidAddr(String),

    #[error("logger already initialized")]
    AlreadyInitialized,
}

/// Output format of log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Bunyan-style JSON lines
    Json,
    #[default]
    Text,
    /// Multi-line human readable output for local development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            "pretty" | "cli" => Ok(LogFormat::Pretty),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Logger settings: format, level and static fields of the root logger.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: String,
    pub name: String,
    pub fields: HashMap<String, Value>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: DEFAULT_LOG_LEVEL.to_string(),
            name: DEFAULT_LOG_NAME.to_string(),
            fields: HashMap::new(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = LogConfig::default();

        let format = match env::var("LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.format,
        };

        let fields = match env::var("LOG_FIELDS") {
            Ok(value) => parse_fields(&value)?,
            Err(_) => defaults.fields,
        };

        Ok(Self {
            format,
            level: env::var("LOG_LEVEL").unwrap_or(defaults.level),
            name: env::var("LOG_NAME").unwrap_or(defaults.name),
            fields,
        })
    }
}

/// Parses `key=value,key=value` into string fields. Blank entries are skipped.
pub fn parse_fields(raw: &str) -> Result<HashMap<String, Value>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), Value::from(value.trim())))
            }
            _ => Err(ConfigError::InvalidField(entry.to_string())),
        })
        .collect()
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("APP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = raw.parse().map_err(|_| ConfigError::InvalidAddr(raw))?;
        Ok(Self { addr })
    }
}
