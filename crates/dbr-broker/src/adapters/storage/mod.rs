//! Storage Adapters
//!
//! Implementations of the `NamespaceStore` trait.

#[cfg(feature = "file-store")]
mod file;
mod memory;

#[cfg(feature = "file-store")]
pub use file::FileNamespaceStore;
pub use memory::InMemoryNamespaceStore;
