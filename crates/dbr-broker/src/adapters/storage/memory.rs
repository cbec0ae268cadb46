//! # In-Memory Namespace Store
//!
//! Snapshots kept in a map; nothing outlives the process.

use crate::domain::errors::StoreError;
use crate::domain::namespace::Namespace;
use crate::ports::outbound::NamespaceStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-memory namespace store.
///
/// Keeps snapshots for the lifetime of the store value. Used by
/// `DataBroker::new_in_memory` and in tests.
#[derive(Debug, Default)]
pub struct InMemoryNamespaceStore {
    snapshots: RwLock<BTreeMap<String, Namespace>>,
}

impl InMemoryNamespaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NamespaceStore for InMemoryNamespaceStore {
    fn load(&self, name: &str) -> Result<Option<Namespace>, StoreError> {
        Ok(self.snapshots.read().get(name).cloned())
    }

    fn save(&self, namespace: &Namespace) -> Result<(), StoreError> {
        self.snapshots
            .write()
            .insert(namespace.name().to_string(), namespace.clone());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StoreError> {
        self.snapshots.write().remove(name);
        Ok(())
    }

    fn contains(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.snapshots.read().contains_key(name))
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.snapshots.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbr_types::{Group, GroupList, PersistLevel};

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryNamespaceStore::new();
        let mut ns = Namespace::new("b", PersistLevel::PermanentFs, GroupList::new());
        ns.push(Group::EMPTY, "k", b"v".to_vec());

        store.save(&ns).unwrap();
        store
            .save(&Namespace::new("a", PersistLevel::TemporaryFs, GroupList::new()))
            .unwrap();

        assert_eq!(store.load("b").unwrap(), Some(ns));
        assert_eq!(store.load("missing").unwrap(), None);
        assert!(store.contains("a").unwrap());
        assert_eq!(store.list().unwrap(), vec!["a", "b"]);

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(!store.contains("a").unwrap());
    }
}
