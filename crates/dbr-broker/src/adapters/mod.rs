//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: in-memory and file-backed `NamespaceStore`s
//! - `infra`: CRC32 checksums
//! - `serializer`: bincode snapshot encoding
//! - `lock`: data directory process lock

pub mod infra;
#[cfg(feature = "file-store")]
pub mod lock;
pub mod serializer;
pub mod storage;

pub use infra::Crc32SnapshotChecksum;
#[cfg(feature = "file-store")]
pub use lock::{DirectoryLock, LockError};
pub use serializer::BincodeSnapshotSerializer;
#[cfg(feature = "file-store")]
pub use storage::FileNamespaceStore;
pub use storage::InMemoryNamespaceStore;
