//! Tracing subscriber initialization.
//!
//! `RUST_LOG` wins when set; otherwise `server.log_level` seeds the filter.
//! Development gets human-readable output, production gets one JSON object
//! per line.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global
/// subscriber has already been set.
pub fn init_tracing(server: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = build_filter(&server.log_level)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if server.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()?;
    }

    Ok(())
}

fn build_filter(default_directive: &str) -> Result<EnvFilter, ParseError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive),
    }
}
