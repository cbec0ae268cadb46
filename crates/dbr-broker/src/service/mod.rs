//! # Data Broker Service
//!
//! The application service implementing `DataBrokerApi`.
//!
//! ## Architecture
//!
//! This service:
//! 1. Keeps live namespaces, open cursors and async tags in one `Registry`
//!    behind a `parking_lot::Mutex`
//! 2. Parks blocking `get`/`read` callers on a `Condvar` that `put` notifies
//! 3. Writes persistent namespaces through to the injected `NamespaceStore`
//!
//! ## Submodules
//!
//! - `registry` - live namespace table and handle resolution
//! - `lifecycle` - create/attach/detach/delete/query
//! - `tuples` - put/get/read/remove/move and the blocking fetch loop
//! - `iteration` - directory and iterator
//! - `requests` - async tags
//! - `api` - the `DataBrokerApi` impl wiring the above together

mod api;
mod iteration;
mod lifecycle;
mod registry;
mod requests;
mod tuples;

use crate::adapters::InMemoryNamespaceStore;
use crate::domain::value_objects::BrokerConfig;
use crate::ports::outbound::NamespaceStore;
use parking_lot::{Condvar, Mutex};
use registry::Registry;

#[cfg(feature = "file-store")]
use crate::adapters::FileNamespaceStore;
#[cfg(feature = "file-store")]
use crate::domain::errors::StoreError;

/// The Data Broker Service.
///
/// Thread-safe: share it with `Arc` and call from any thread.
pub struct DataBroker<S: NamespaceStore = InMemoryNamespaceStore> {
    /// Snapshot store for persistent namespaces.
    pub(crate) store: S,
    /// Service configuration.
    pub(crate) config: BrokerConfig,
    /// Live namespaces, cursors and async tags.
    pub(crate) registry: Mutex<Registry>,
    /// Signalled whenever a tuple is added or a namespace goes away.
    pub(crate) tuple_ready: Condvar,
}

impl<S: NamespaceStore> DataBroker<S> {
    /// Create a broker on top of `store`.
    pub fn new(store: S, config: BrokerConfig) -> Self {
        let registry = Registry::new(config.max_pending_requests);
        Self {
            store,
            config,
            registry: Mutex::new(registry),
            tuple_ready: Condvar::new(),
        }
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl DataBroker<InMemoryNamespaceStore> {
    /// Create a broker whose "persistent" namespaces only outlive detach,
    /// not the process.
    pub fn new_in_memory(config: BrokerConfig) -> Self {
        Self::new(InMemoryNamespaceStore::new(), config)
    }
}

#[cfg(feature = "file-store")]
impl DataBroker<FileNamespaceStore> {
    /// Create a broker persisting to a file store in `config.data_dir`.
    ///
    /// Fails with `StoreError::NotFound` when no data directory is set.
    pub fn open(config: BrokerConfig) -> Result<Self, StoreError> {
        let dir = config.data_dir.clone().ok_or_else(|| StoreError::NotFound {
            path: std::path::PathBuf::from("<data_dir unset>"),
        })?;
        let store = FileNamespaceStore::open(dir)?;
        Ok(Self::new(store, config))
    }
}

impl<S: NamespaceStore> std::fmt::Debug for DataBroker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("DataBroker")
            .field("config", &self.config)
            .field("live_namespaces", &registry.live_count())
            .field("pending_requests", &registry.requests.len())
            .finish()
    }
}
