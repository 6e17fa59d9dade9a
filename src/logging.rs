//! Tracing setup for the command-line entry point.
//!
//! The library only emits events; installing a subscriber is left to the binary.

use crate::error::ClientError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `log_level` applies to this crate.
/// JSON lines when `json` is true, pretty output otherwise.
pub fn init_tracing(log_level: &str, json: bool) -> Result<(), ClientError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flight_picker={}", log_level)));

    let result = if json {
        let formatting_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_current_span(true);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
    } else {
        let formatting_layer = fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_file(false)
            .with_target(true);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
    };

    result.map_err(|e| ClientError::InitError(format!("Failed to initialize tracing: {}", e)))?;

    tracing::debug!(log_level, json, "Logging initialized");
    Ok(())
}
