//! # Registry
//!
//! Everything the broker keeps in memory, guarded by a single mutex.

use crate::domain::errors::BrokerError;
use crate::domain::iterator::IteratorTable;
use crate::domain::namespace::{Namespace, NamespaceHandle};
use crate::domain::requests::RequestTable;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A namespace that is loaded in memory.
#[derive(Debug)]
pub(crate) struct LiveNamespace {
    /// Generation id; a deleted and re-created namespace gets a new one.
    pub id: u64,
    pub name: Arc<str>,
    pub namespace: Namespace,
    pub iterators: IteratorTable,
    /// Handle ids currently attached.
    pub attached: HashSet<u64>,
}

impl LiveNamespace {
    pub fn refcount(&self) -> usize {
        self.attached.len()
    }
}

#[derive(Debug)]
pub(crate) struct Registry {
    namespaces: HashMap<String, LiveNamespace>,
    next_namespace_id: u64,
    next_handle_id: u64,
    pub requests: RequestTable,
}

impl Registry {
    pub fn new(max_pending_requests: usize) -> Self {
        Self {
            namespaces: HashMap::new(),
            next_namespace_id: 0,
            next_handle_id: 0,
            requests: RequestTable::new(max_pending_requests),
        }
    }

    pub fn live_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn get(&self, name: &str) -> Option<&LiveNamespace> {
        self.namespaces.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    /// Make `namespace` live under a fresh generation id.
    pub fn insert(&mut self, namespace: Namespace) {
        self.next_namespace_id += 1;
        let name: Arc<str> = Arc::from(namespace.name());
        let live = LiveNamespace {
            id: self.next_namespace_id,
            name,
            namespace,
            iterators: IteratorTable::new(),
            attached: HashSet::new(),
        };
        self.namespaces.insert(live.namespace.name().to_string(), live);
    }

    pub fn remove(&mut self, name: &str) -> Option<LiveNamespace> {
        self.namespaces.remove(name)
    }

    /// Issue a new handle on a live namespace.
    pub fn attach(&mut self, name: &str) -> Option<NamespaceHandle> {
        let live = self.namespaces.get_mut(name)?;
        self.next_handle_id += 1;
        let handle_id = self.next_handle_id;
        live.attached.insert(handle_id);
        Some(NamespaceHandle::new(live.name.clone(), live.id, handle_id))
    }

    pub fn resolve(&self, handle: &NamespaceHandle) -> Result<&LiveNamespace, BrokerError> {
        self.namespaces
            .get(handle.name())
            .filter(|live| Self::issued_by(live, handle))
            .ok_or_else(|| stale(handle))
    }

    pub fn resolve_mut(
        &mut self,
        handle: &NamespaceHandle,
    ) -> Result<&mut LiveNamespace, BrokerError> {
        self.namespaces
            .get_mut(handle.name())
            .filter(|live| Self::issued_by(live, handle))
            .ok_or_else(|| stale(handle))
    }

    fn issued_by(live: &LiveNamespace, handle: &NamespaceHandle) -> bool {
        live.id == handle.namespace_id() && live.attached.contains(&handle.handle_id())
    }
}

fn stale(handle: &NamespaceHandle) -> BrokerError {
    BrokerError::Handle {
        name: handle.name().to_string(),
    }
}
