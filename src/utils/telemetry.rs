//! # Logger Setup
//!
//! Installs the global `tracing` subscriber described by a [`LogConfig`].

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::utils::config::{ConfigError, LogConfig, LogFormat};

/// Installs the global subscriber.
///
/// # Errors
///
/// - [`ConfigError::InvalidLevel`] if `level` is not a valid filter directive
/// - [`ConfigError::AlreadyInitialized`] if a global subscriber is already set
pub fn init(config: &LogConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|_| ConfigError::InvalidLevel(config.level.clone()))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::with_default_fields(
                config.name.clone(),
                std::io::stdout,
                config.fields.clone(),
            ))
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    result.map_err(|_| ConfigError::AlreadyInitialized)
}
