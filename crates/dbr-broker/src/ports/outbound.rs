//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the broker service.

use crate::domain::errors::{SerializationError, StoreError};
use crate::domain::namespace::Namespace;

/// Persistence for whole namespaces.
///
/// The broker calls `save` after every mutation of a persistent namespace
/// and `remove` when it is deleted. Volatile namespaces never reach the
/// store.
///
/// Production: `FileNamespaceStore` (adapters/storage/file.rs)
/// Testing: `InMemoryNamespaceStore` (adapters/storage/memory.rs)
pub trait NamespaceStore: Send + Sync {
    /// Load a namespace by name.
    fn load(&self, name: &str) -> Result<Option<Namespace>, StoreError>;

    /// Write a namespace, replacing any previous snapshot.
    fn save(&self, namespace: &Namespace) -> Result<(), StoreError>;

    /// Remove a namespace. Removing an absent name is not an error.
    fn remove(&self, name: &str) -> Result<(), StoreError>;

    /// Check if a namespace is stored.
    fn contains(&self, name: &str) -> Result<bool, StoreError>;

    /// Names of all stored namespaces, sorted.
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Snapshot integrity checks.
///
/// The checksum covers the namespace name as well as the payload, so a
/// snapshot copied under another name fails verification.
pub trait ChecksumProvider: Send + Sync {
    /// Checksum of the encoded namespace `payload` stored as `name`.
    fn snapshot_checksum(&self, name: &str, payload: &[u8]) -> u32;

    fn verify_snapshot(&self, name: &str, payload: &[u8], expected: u32) -> bool {
        self.snapshot_checksum(name, payload) == expected
    }
}

/// Namespace encoding for snapshots.
pub trait SnapshotSerializer: Send + Sync {
    fn serialize(&self, namespace: &Namespace) -> Result<Vec<u8>, SerializationError>;

    fn deserialize(&self, data: &[u8]) -> Result<Namespace, SerializationError>;
}
