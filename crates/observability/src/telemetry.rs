//! Subscriber initialization: env filter plus a stderr fmt layer.

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::error::ObservabilityError;

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// An explicit `log_level` must parse as an `EnvFilter` directive. Without one,
/// `RUST_LOG` is honoured and the fallback is `warn`.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = build_filter(config.log_level.as_deref())?;

    // Build layers separately, then compose once
    let compact_layer = (config.enable_console && config.format == LogFormat::Compact).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
    });
    let full_layer = (config.enable_console && config.format == LogFormat::Full)
        .then(|| fmt::layer().with_writer(std::io::stderr));

    Registry::default()
        .with(env_filter)
        .with(compact_layer)
        .with(full_layer)
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    tracing::debug!(
        service.name = %config.service_name,
        format = ?config.format,
        "Tracing initialized"
    );
    Ok(())
}

/// Initialize with configuration from environment variables
pub fn init_from_env(service_name: &str) -> Result<(), ObservabilityError> {
    init(ObservabilityConfig::from_env(service_name)?)
}

fn build_filter(level: Option<&str>) -> Result<EnvFilter, ObservabilityError> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| ObservabilityError::Config(format!("invalid log filter '{level}': {e}"))),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}
