//! # Domain Errors
//!
//! Error types for the data broker.
//!
//! ## Design Principles
//!
//! - Each variant maps to exactly one `ErrorCode` via `BrokerError::code`
//! - Variants carry the context needed to act on them (key, name, sizes)
//! - Adapter errors convert into `BrokerError` at the port boundary

use dbr_types::{ErrorCode, Tag};
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by broker operations.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// A caller-supplied argument was rejected.
    #[error("Invalid argument: {reason}")]
    Invalid { reason: String },

    /// The handle was detached, or its namespace was deleted.
    #[error("Invalid or stale handle for namespace '{name}'")]
    Handle { name: String },

    /// A blocking `get`/`read` found no tuple before the deadline.
    #[error("Timed out after {waited_ms}ms waiting for key '{key}'")]
    Timeout { key: String, waited_ms: u64 },

    /// The caller's buffer cannot hold the value.
    #[error("User buffer too small: value is {required} bytes, buffer holds {available}")]
    UserBuffer { required: usize, available: usize },

    /// No tuple under this key.
    #[error("Key not available: '{key}'")]
    Unavailable { key: String },

    /// The target name or key is already taken.
    #[error("Already exists: {what}")]
    Exists { what: String },

    /// Other handles are still attached to the namespace.
    #[error("Namespace '{name}' still referenced by {refcount} handles")]
    NamespaceBusy { name: String, refcount: usize },

    /// No namespace with this name, live or persisted.
    #[error("Namespace does not exist: '{name}'")]
    NamespaceInvalid { name: String },

    /// A bounded table is full.
    #[error("Resource limit reached: {resource} (max {limit})")]
    NoMemory { resource: &'static str, limit: usize },

    /// Unknown tag, or no tag could be allocated.
    #[error("Tag error: {reason}")]
    TagError { reason: String },

    /// A snapshot file is missing.
    #[error("File not found: {}", .path.display())]
    NoFile { path: PathBuf },

    /// The storage backend could not be reached or locked.
    #[error("Storage backend unavailable: {message}")]
    NoConnect { message: String },

    /// The request was cancelled before it completed.
    #[error("Request {tag} was cancelled")]
    Cancelled { tag: Tag },

    /// The broker does not support this feature.
    #[error("Not implemented: {operation}")]
    NotImplemented { operation: &'static str },

    /// The arguments are individually valid but the combination is not.
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },

    /// The storage backend failed.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl BrokerError {
    /// The status code this error reports.
    pub fn code(&self) -> ErrorCode {
        match self {
            BrokerError::Invalid { .. } => ErrorCode::Invalid,
            BrokerError::Handle { .. } => ErrorCode::Handle,
            BrokerError::Timeout { .. } => ErrorCode::Timeout,
            BrokerError::UserBuffer { .. } => ErrorCode::UserBuffer,
            BrokerError::Unavailable { .. } => ErrorCode::Unavailable,
            BrokerError::Exists { .. } => ErrorCode::Exists,
            BrokerError::NamespaceBusy { .. } => ErrorCode::NamespaceBusy,
            BrokerError::NamespaceInvalid { .. } => ErrorCode::NamespaceInvalid,
            BrokerError::NoMemory { .. } => ErrorCode::NoMemory,
            BrokerError::TagError { .. } => ErrorCode::TagError,
            BrokerError::NoFile { .. } => ErrorCode::NoFile,
            BrokerError::NoConnect { .. } => ErrorCode::NoConnect,
            BrokerError::Cancelled { .. } => ErrorCode::Cancelled,
            BrokerError::NotImplemented { .. } => ErrorCode::NotImplemented,
            BrokerError::InvalidOperation { .. } => ErrorCode::InvalidOperation,
            BrokerError::Backend { .. } => ErrorCode::BackendGeneral,
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BrokerError::Invalid {
            reason: reason.into(),
        }
    }
}

/// Namespace store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// I/O error during read/write.
    #[error("Store I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Snapshot file does not exist.
    #[error("Snapshot not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Snapshot checksum did not match its payload.
    #[error("Snapshot for '{name}' is corrupt: expected checksum {expected}, got {actual}")]
    Corruption {
        name: String,
        expected: u32,
        actual: u32,
    },

    /// Another process holds the data directory.
    #[error("Store locked: {message}")]
    Locked { message: String },

    /// Snapshot encoding failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound { path }
        } else {
            StoreError::Io {
                path,
                message: err.to_string(),
            }
        }
    }
}

impl From<StoreError> for BrokerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { path } => BrokerError::NoFile { path },
            StoreError::Locked { message } => BrokerError::NoConnect { message },
            other => BrokerError::Backend {
                message: other.to_string(),
            },
        }
    }
}

/// Serialization errors.
#[derive(Debug, Clone, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}
