//! Tracing subscriber setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::ConfigurationError;

/// Install the global subscriber. `RUST_LOG` overrides `config.filter`.
/// Output goes to stderr.
///
/// # Errors
///
/// [`ConfigurationError::Telemetry`] if the filter is invalid or a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigurationError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|err| ConfigurationError::Telemetry(err.to_string()))?,
    };

    let json = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let plain = (!config.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .try_init()
        .map_err(|err| ConfigurationError::Telemetry(err.to_string()))
}
