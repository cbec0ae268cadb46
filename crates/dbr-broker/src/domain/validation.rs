//! # Argument Validation
//!
//! Checks applied at the API boundary before any state is touched.

use super::errors::BrokerError;

/// Hard limits, independent of configuration.
pub mod limits {
    /// Maximum namespace name length in bytes.
    pub const MAX_NAMESPACE_NAME_LEN: usize = 255;

    /// Default maximum key length in bytes.
    pub const MAX_KEY_LEN: usize = 1023;

    /// Default maximum tuple value size in bytes.
    pub const MAX_VALUE_SIZE: usize = 16 * 1024 * 1024; // 16 MiB
}

/// Namespace names double as snapshot file stems, so path syntax is rejected.
pub fn validate_namespace_name(name: &str) -> Result<(), BrokerError> {
    if name.is_empty() {
        return Err(BrokerError::invalid("namespace name is empty"));
    }
    if name.len() > limits::MAX_NAMESPACE_NAME_LEN {
        return Err(BrokerError::invalid(format!(
            "namespace name is {} bytes, max {}",
            name.len(),
            limits::MAX_NAMESPACE_NAME_LEN
        )));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(BrokerError::invalid(format!(
            "namespace name '{}' contains path syntax",
            name.escape_default()
        )));
    }
    Ok(())
}

pub fn validate_key(key: &str, max_len: usize) -> Result<(), BrokerError> {
    if key.is_empty() {
        return Err(BrokerError::invalid("key is empty"));
    }
    if key.len() > max_len {
        return Err(BrokerError::invalid(format!(
            "key is {} bytes, max {}",
            key.len(),
            max_len
        )));
    }
    Ok(())
}

pub fn validate_value_size(size: usize, max_size: usize) -> Result<(), BrokerError> {
    if size > max_size {
        return Err(BrokerError::invalid(format!(
            "value is {} bytes, max {}",
            size, max_size
        )));
    }
    Ok(())
}

/// Tuple matching on `get`/`read` is not supported; only the empty template
/// is accepted.
pub fn validate_match_template(template: &str) -> Result<(), BrokerError> {
    if template.is_empty() {
        Ok(())
    } else {
        Err(BrokerError::NotImplemented {
            operation: "match templates on get/read",
        })
    }
}
