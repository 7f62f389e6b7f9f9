//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence; otherwise the configured `log_level` is used.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use sarfix_core::config::GeneralConfig;

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Filter for `general`, honouring `RUST_LOG` when set.
///
/// # Errors
/// Returns an error if the configured level is not a valid filter directive.
pub fn env_filter(general: &GeneralConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&general.log_level)
            .with_context(|| format!("Invalid log level '{}'", general.log_level)),
    }
}

/// Install the global subscriber.
///
/// # Errors
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init(general: &GeneralConfig, format: LogFormat) -> anyhow::Result<()> {
    let filter = env_filter(general)?;
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(level = %general.log_level, ?format, "Logging initialized");
    Ok(())
}
