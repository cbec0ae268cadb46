//! # Status Codes
//!
//! The broker's status taxonomy. Every failure the engine reports maps onto
//! exactly one `ErrorCode`, and every code has a fixed human-readable message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of a broker operation.
///
/// Numeric values are stable and may be exchanged with other processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    Generic = 1,
    Invalid = 2,
    Handle = 3,
    InProgress = 4,
    Timeout = 5,
    UserBuffer = 6,
    Unavailable = 7,
    Exists = 8,
    NamespaceBusy = 9,
    NamespaceInvalid = 10,
    NoMemory = 11,
    TagError = 12,
    NoFile = 13,
    NoAuth = 14,
    NoConnect = 15,
    Cancelled = 16,
    NotImplemented = 17,
    InvalidOperation = 18,
    BackendPost = 19,
    BackendGeneral = 20,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: [ErrorCode; 21] = [
        ErrorCode::Success,
        ErrorCode::Generic,
        ErrorCode::Invalid,
        ErrorCode::Handle,
        ErrorCode::InProgress,
        ErrorCode::Timeout,
        ErrorCode::UserBuffer,
        ErrorCode::Unavailable,
        ErrorCode::Exists,
        ErrorCode::NamespaceBusy,
        ErrorCode::NamespaceInvalid,
        ErrorCode::NoMemory,
        ErrorCode::TagError,
        ErrorCode::NoFile,
        ErrorCode::NoAuth,
        ErrorCode::NoConnect,
        ErrorCode::Cancelled,
        ErrorCode::NotImplemented,
        ErrorCode::InvalidOperation,
        ErrorCode::BackendPost,
        ErrorCode::BackendGeneral,
    ];

    /// Human-readable description of this status.
    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation successful",
            ErrorCode::Generic => "A general or unknown error has occurred",
            ErrorCode::Invalid => "Invalid argument",
            ErrorCode::Handle => "An invalid handle was encountered",
            ErrorCode::InProgress => "Operation in progress",
            ErrorCode::Timeout => "Operation timed out",
            ErrorCode::UserBuffer => "Provided user buffer problem (too small, not available)",
            ErrorCode::Unavailable => "Entry not available",
            ErrorCode::Exists => "Entry already exists",
            ErrorCode::NamespaceBusy => "Namespace still referenced by a client",
            ErrorCode::NamespaceInvalid => "Namespace does not exist",
            ErrorCode::NoMemory => "Insufficient memory or storage",
            ErrorCode::TagError => "Invalid tag",
            ErrorCode::NoFile => "A file was not found",
            ErrorCode::NoAuth => "Access authorization required or failed",
            ErrorCode::NoConnect => "A connection to a storage backend failed",
            ErrorCode::Cancelled => "Operation was cancelled",
            ErrorCode::NotImplemented => "Operation not implemented",
            ErrorCode::InvalidOperation => "Invalid operation",
            ErrorCode::BackendPost => "Failed to post request to back-end",
            ErrorCode::BackendGeneral => "Unspecified back-end error",
        }
    }

    /// Whether this code signals success.
    pub const fn is_success(self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Numeric value of this code.
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// A numeric status that does not name any `ErrorCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown status code: {0}")]
pub struct UnknownErrorCode(pub i32);

impl TryFrom<i32> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| ErrorCode::ALL.get(index).copied())
            .ok_or(UnknownErrorCode(value))
    }
}

/// Look up the message for a numeric status.
///
/// Unknown values yield the generic-error message rather than failing, so the
/// lookup is always safe to print.
pub fn error_message(code: i32) -> &'static str {
    ErrorCode::try_from(code)
        .unwrap_or(ErrorCode::Generic)
        .message()
}
