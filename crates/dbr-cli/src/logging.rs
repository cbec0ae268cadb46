//! Logging setup for the `dbr` binary.

use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive, e.g. `warn` or `dbr_broker=debug`.
    pub log_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        // Quiet by default so demo output stays readable.
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl LogConfig {
    /// Read `DBR_LOG_LEVEL`, then `RUST_LOG`.
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("DBR_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| Self::default().log_level),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries
/// command output only.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(&config.log_level)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
