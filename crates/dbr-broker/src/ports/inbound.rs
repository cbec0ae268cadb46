//! # Inbound Ports (Driving Ports)
//!
//! The public API of the data broker.

use crate::domain::errors::BrokerError;
use crate::domain::namespace::NamespaceHandle;
use crate::domain::requests::Completion;
use crate::domain::state::NamespaceState;
use dbr_types::{Cursor, Flags, Group, GroupList, PersistLevel, StateMask, Tag};

/// Primary API of the data broker.
///
/// All methods take `&self`; implementations are shared across threads.
/// Every failure is reported as a `BrokerError`, whose `code()` gives the
/// numeric status.
pub trait DataBrokerApi {
    // -------------------------------------------------------------------------
    // Namespace lifecycle
    // -------------------------------------------------------------------------

    /// Create a namespace and attach to it.
    ///
    /// ## Errors
    ///
    /// - `Invalid`: name is empty, too long or contains path syntax
    /// - `Exists`: a live or persisted namespace already has this name
    fn create(
        &self,
        name: &str,
        level: PersistLevel,
        groups: GroupList,
    ) -> Result<NamespaceHandle, BrokerError>;

    /// Attach to an existing namespace, loading it from the store if needed.
    ///
    /// ## Errors
    ///
    /// - `NamespaceInvalid`: no such namespace
    fn attach(&self, name: &str) -> Result<NamespaceHandle, BrokerError>;

    /// Release a handle. The namespace and its data stay.
    fn detach(&self, handle: &NamespaceHandle) -> Result<(), BrokerError>;

    /// Delete a namespace and all its tuples.
    ///
    /// ## Errors
    ///
    /// - `NamespaceInvalid`: no such namespace
    /// - `NamespaceBusy`: more than one handle is attached
    fn delete(&self, name: &str) -> Result<(), BrokerError>;

    /// Report namespace state; `mask` selects the fields.
    fn query(
        &self,
        handle: &NamespaceHandle,
        mask: StateMask,
    ) -> Result<NamespaceState, BrokerError>;

    // -------------------------------------------------------------------------
    // Tuples
    // -------------------------------------------------------------------------

    /// Append `value` to the queue under `key`.
    fn put(
        &self,
        handle: &NamespaceHandle,
        value: &[u8],
        key: &str,
        group: Group,
    ) -> Result<(), BrokerError>;

    /// Append the concatenation of `values` as a single tuple.
    fn put_gather(
        &self,
        handle: &NamespaceHandle,
        values: &[&[u8]],
        key: &str,
        group: Group,
    ) -> Result<(), BrokerError>;

    /// Pop the oldest value under `key`.
    ///
    /// Waits up to the configured timeout for a tuple unless `flags`
    /// contains `Flags::NOWAIT`.
    ///
    /// ## Errors
    ///
    /// - `Unavailable`: no tuple and `NOWAIT` was given
    /// - `Timeout`: no tuple appeared in time
    /// - `NotImplemented`: `template` is not empty
    fn get(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Vec<u8>, BrokerError>;

    /// Copy the oldest value under `key`, leaving it queued.
    fn read(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Vec<u8>, BrokerError>;

    /// `get` into a caller buffer; returns the value length.
    ///
    /// ## Errors
    ///
    /// - `UserBuffer`: the value is larger than `buf`; nothing is consumed
    /// - `NotImplemented`: `template` is not empty
    fn get_into(
        &self,
        handle: &NamespaceHandle,
        buf: &mut [u8],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<usize, BrokerError>;

    /// `read` into a caller buffer; returns the value length.
    fn read_into(
        &self,
        handle: &NamespaceHandle,
        buf: &mut [u8],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<usize, BrokerError>;

    /// `read` spread across `bufs` in order; returns the value length.
    fn read_scatter(
        &self,
        handle: &NamespaceHandle,
        bufs: &mut [&mut [u8]],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<usize, BrokerError>;

    /// Drop every value under `key`.
    fn remove(
        &self,
        handle: &NamespaceHandle,
        group: Group,
        key: &str,
        template: &str,
    ) -> Result<(), BrokerError>;

    /// Move the whole queue under `key` to another namespace or group.
    ///
    /// ## Errors
    ///
    /// - `Unavailable`: nothing under `key` at the source
    /// - `Exists`: the destination already holds `key`
    /// - `InvalidOperation`: source and destination are the same
    fn move_tuple(
        &self,
        src: &NamespaceHandle,
        src_group: Group,
        key: &str,
        template: &str,
        dst: &NamespaceHandle,
        dst_group: Group,
    ) -> Result<(), BrokerError>;

    /// Up to `count` keys of `group` starting with `prefix`, sorted.
    fn directory(
        &self,
        handle: &NamespaceHandle,
        prefix: &str,
        group: Group,
        count: usize,
    ) -> Result<Vec<String>, BrokerError>;

    /// Advance a key iteration.
    ///
    /// Pass `Cursor::NEW` to start. Returns the next key and the cursor to
    /// pass next time; the final call returns `(None, Cursor::DONE)`.
    fn iterator(
        &self,
        handle: &NamespaceHandle,
        cursor: Cursor,
        group: Group,
        prefix: &str,
    ) -> Result<(Option<String>, Cursor), BrokerError>;

    // -------------------------------------------------------------------------
    // Async requests
    // -------------------------------------------------------------------------

    /// Asynchronous `put`.
    fn put_a(
        &self,
        handle: &NamespaceHandle,
        value: &[u8],
        key: &str,
        group: Group,
    ) -> Result<Tag, BrokerError>;

    /// Asynchronous `get`.
    fn get_a(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Tag, BrokerError>;

    /// Asynchronous `read`.
    fn read_a(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Tag, BrokerError>;

    /// Poll an async request.
    ///
    /// A finished request is released by the call that reports it; failed
    /// requests report their error once.
    fn test(&self, tag: Tag) -> Result<Completion, BrokerError>;

    /// Cancel an async request; the next `test` reports `Cancelled`.
    fn cancel(&self, tag: Tag) -> Result<(), BrokerError>;
}
