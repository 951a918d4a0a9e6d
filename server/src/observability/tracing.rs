use std::io::stdout;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use color_namer_application::{
    error::{AppError, AppResult},
    infrastructure_config::{LogFormat, LoggingConfig},
};

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn setup_logging(service_name: &str, logging: &LoggingConfig) -> AppResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| AppError::ConfigError {
            message: format!("Invalid log level '{}': {e}", logging.level),
        })?,
    };

    let installed = match logging.format {
        LogFormat::Json => {
            let formatting_layer = BunyanFormattingLayer::new(service_name.to_string(), stdout);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(formatting_layer)
                .try_init()
                .map_err(|e| e.to_string())
        }
        LogFormat::Pretty => {
            let format = fmt::format()
                .with_target(true)
                .with_thread_ids(true)
                .compact();

            tracing_subscriber::fmt()
                .event_format(format)
                .with_env_filter(env_filter)
                .with_file(logging.include_location)
                .with_line_number(logging.include_location)
                .try_init()
                .map_err(|e| e.to_string())
        }
    };

    installed.map_err(|e| AppError::ConfigError {
        message: format!("Failed to install tracing subscriber: {e}"),
    })
}
