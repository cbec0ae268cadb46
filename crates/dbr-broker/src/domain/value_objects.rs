//! # Value Objects
//!
//! Configuration for the broker engine.

use super::validation::limits;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the broker engine.
///
/// All values have defaults suitable for an embedded broker; `from_env`
/// overrides them from `DBR_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    /// How long a blocking `get`/`read` (and a pending async fetch) waits for
    /// a tuple to appear (default: 5s).
    pub timeout: Duration,

    /// Maximum key length in bytes (default: 1023).
    pub max_key_len: usize,

    /// Maximum size of a single tuple value in bytes (default: 16 MiB).
    pub max_value_size: usize,

    /// Maximum number of outstanding async request tags (default: 1024).
    pub max_pending_requests: usize,

    /// Maximum number of open iterator cursors per namespace (default: 1024).
    pub max_active_iterators: usize,

    /// Directory for persistent namespace snapshots, if any.
    pub data_dir: Option<PathBuf>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_key_len: limits::MAX_KEY_LEN,
            max_value_size: limits::MAX_VALUE_SIZE,
            max_pending_requests: 1024,
            max_active_iterators: 1024,
            data_dir: None,
        }
    }
}

impl BrokerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DBR_TIMEOUT_MS`: blocking fetch timeout in milliseconds (default: 5000)
    /// - `DBR_MAX_KEY_LEN`: maximum key length (default: 1023)
    /// - `DBR_MAX_VALUE_SIZE`: maximum value size in bytes (default: 16 MiB)
    /// - `DBR_MAX_PENDING`: maximum outstanding async tags (default: 1024)
    /// - `DBR_DATA_DIR`: snapshot directory (default: none)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            timeout: env::var("DBR_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),

            max_key_len: env::var("DBR_MAX_KEY_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_key_len),

            max_value_size: env::var("DBR_MAX_VALUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_value_size),

            max_pending_requests: env::var("DBR_MAX_PENDING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_pending_requests),

            max_active_iterators: defaults.max_active_iterators,

            data_dir: env::var_os("DBR_DATA_DIR").map(PathBuf::from),
        }
    }

    /// Set the blocking fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum key length.
    pub fn with_max_key_len(mut self, len: usize) -> Self {
        self.max_key_len = len;
        self
    }

    /// Set the maximum value size.
    pub fn with_max_value_size(mut self, size: usize) -> Self {
        self.max_value_size = size;
        self
    }

    /// Set the maximum number of outstanding async tags.
    pub fn with_max_pending_requests(mut self, max: usize) -> Self {
        self.max_pending_requests = max;
        self
    }

    /// Set the maximum number of open cursors per namespace.
    pub fn with_max_active_iterators(mut self, max: usize) -> Self {
        self.max_active_iterators = max;
        self
    }

    /// Set the snapshot directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}
