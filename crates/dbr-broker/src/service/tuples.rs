//! # Tuple Operations
//!
//! put / get / read / remove / move, plus the shared helpers:
//!
//! - `commit` applies a mutation and writes persistent namespaces through to
//!   the store, rolling back if the write fails
//! - `try_fetch` takes or peeks the head tuple without waiting
//! - `fetch` wraps `try_fetch` in the condvar wait loop

use super::registry::Registry;
use super::DataBroker;
use crate::domain::errors::BrokerError;
use crate::domain::namespace::{Namespace, NamespaceHandle};
use crate::domain::requests::{FetchMode, FetchRequest};
use crate::domain::validation::{validate_key, validate_match_template, validate_value_size};
use crate::ports::outbound::NamespaceStore;
use dbr_types::{Flags, Group};
use std::time::Instant;
use tracing::{debug, warn};

pub(crate) fn unavailable(key: &str) -> BrokerError {
    BrokerError::Unavailable {
        key: key.to_string(),
    }
}

impl<S: NamespaceStore> DataBroker<S> {
    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Apply `op` to the handle's namespace.
    ///
    /// For persistent namespaces the result is saved before returning; if the
    /// save fails the namespace is restored to its previous contents.
    pub(crate) fn commit<T>(
        &self,
        registry: &mut Registry,
        handle: &NamespaceHandle,
        op: impl FnOnce(&mut Namespace) -> Result<T, BrokerError>,
    ) -> Result<T, BrokerError> {
        let live = registry.resolve_mut(handle)?;
        if !live.namespace.level().is_persistent() {
            return op(&mut live.namespace);
        }

        let before = live.namespace.clone();
        let output = op(&mut live.namespace)?;
        if let Err(e) = self.store.save(&live.namespace) {
            warn!(
                "[dbr] Failed to persist '{}', rolling back: {}",
                handle.name(),
                e
            );
            live.namespace = before;
            return Err(e.into());
        }
        Ok(output)
    }

    /// `Invalid` unless `group` is admitted by the handle's namespace.
    pub(crate) fn check_group(
        &self,
        registry: &Registry,
        handle: &NamespaceHandle,
        group: Group,
    ) -> Result<(), BrokerError> {
        let live = registry.resolve(handle)?;
        if live.namespace.groups().admits(group) {
            Ok(())
        } else {
            Err(BrokerError::invalid(format!(
                "group {} is not part of namespace '{}'",
                group.0,
                handle.name()
            )))
        }
    }

    /// One non-blocking attempt. `Ok(None)` means no tuple under the key.
    pub(crate) fn try_fetch(
        &self,
        registry: &mut Registry,
        handle: &NamespaceHandle,
        request: &FetchRequest,
    ) -> Result<Option<Vec<u8>>, BrokerError> {
        self.check_group(registry, handle, request.group)?;

        let peeked = {
            let live = registry.resolve(handle)?;
            let Some(head) = live.namespace.peek(request.group, &request.key) else {
                return Ok(None);
            };
            if let Some(capacity) = request.capacity {
                if head.len() > capacity {
                    return Err(BrokerError::UserBuffer {
                        required: head.len(),
                        available: capacity,
                    });
                }
            }
            match request.mode {
                FetchMode::Peek => Some(head.to_vec()),
                FetchMode::Take => None,
            }
        };
        if peeked.is_some() {
            return Ok(peeked);
        }

        self.commit(registry, handle, |namespace| {
            namespace
                .pop(request.group, &request.key)
                .ok_or_else(|| unavailable(&request.key))
        })
        .map(Some)
    }

    /// Fetch, waiting up to the configured timeout unless `NOWAIT` is set.
    pub(crate) fn fetch(
        &self,
        handle: &NamespaceHandle,
        request: &FetchRequest,
    ) -> Result<Vec<u8>, BrokerError> {
        validate_key(&request.key, self.config.max_key_len)?;

        let started = Instant::now();
        let deadline = started + self.config.timeout;
        let mut registry = self.registry.lock();

        loop {
            if let Some(value) = self.try_fetch(&mut registry, handle, request)? {
                debug!(
                    "[dbr] {:?} '{}' from '{}' ({} bytes)",
                    request.mode,
                    request.key,
                    handle.name(),
                    value.len()
                );
                return Ok(value);
            }

            if request.flags.contains(Flags::NOWAIT) {
                return Err(unavailable(&request.key));
            }
            if Instant::now() >= deadline {
                return Err(BrokerError::Timeout {
                    key: request.key.clone(),
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }

            self.tuple_ready.wait_until(&mut registry, deadline);
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    pub(crate) fn put_tuple(
        &self,
        handle: &NamespaceHandle,
        value: Vec<u8>,
        key: &str,
        group: Group,
    ) -> Result<(), BrokerError> {
        validate_key(key, self.config.max_key_len)?;
        validate_value_size(value.len(), self.config.max_value_size)?;

        let mut registry = self.registry.lock();
        self.check_group(&registry, handle, group)?;

        let size = value.len();
        self.commit(&mut registry, handle, |namespace| {
            namespace.push(group, key, value);
            Ok(())
        })?;
        drop(registry);

        self.tuple_ready.notify_all();
        debug!("[dbr] Put '{}' into '{}' ({} bytes)", key, handle.name(), size);
        Ok(())
    }

    pub(crate) fn gather(values: &[&[u8]]) -> Result<Vec<u8>, BrokerError> {
        if values.is_empty() {
            return Err(BrokerError::invalid("gather list is empty"));
        }
        Ok(values.concat())
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn fetch_into(
        &self,
        handle: &NamespaceHandle,
        buf: &mut [u8],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
        mode: FetchMode,
    ) -> Result<usize, BrokerError> {
        validate_match_template(template)?;
        let request = FetchRequest::new(key, group, flags, mode).with_capacity(buf.len());
        let value = self.fetch(handle, &request)?;
        buf[..value.len()].copy_from_slice(&value);
        Ok(value.len())
    }

    pub(crate) fn fetch_scatter(
        &self,
        handle: &NamespaceHandle,
        bufs: &mut [&mut [u8]],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<usize, BrokerError> {
        validate_match_template(template)?;
        if bufs.is_empty() {
            return Err(BrokerError::invalid("scatter list is empty"));
        }

        let capacity = bufs.iter().map(|buf| buf.len()).sum();
        let request =
            FetchRequest::new(key, group, flags, FetchMode::Peek).with_capacity(capacity);
        let value = self.fetch(handle, &request)?;

        let mut rest = value.as_slice();
        for buf in bufs.iter_mut() {
            if rest.is_empty() {
                break;
            }
            let n = rest.len().min(buf.len());
            buf[..n].copy_from_slice(&rest[..n]);
            rest = &rest[n..];
        }
        Ok(value.len())
    }

    pub(crate) fn remove_key(
        &self,
        handle: &NamespaceHandle,
        group: Group,
        key: &str,
        template: &str,
    ) -> Result<(), BrokerError> {
        validate_key(key, self.config.max_key_len)?;
        validate_match_template(template)?;

        let mut registry = self.registry.lock();
        self.check_group(&registry, handle, group)?;
        let queue = self.commit(&mut registry, handle, |namespace| {
            namespace
                .take_queue(group, key)
                .ok_or_else(|| unavailable(key))
        })?;

        debug!(
            "[dbr] Removed '{}' from '{}' ({} tuples)",
            key,
            handle.name(),
            queue.len()
        );
        Ok(())
    }

    pub(crate) fn move_key(
        &self,
        src: &NamespaceHandle,
        src_group: Group,
        key: &str,
        template: &str,
        dst: &NamespaceHandle,
        dst_group: Group,
    ) -> Result<(), BrokerError> {
        validate_key(key, self.config.max_key_len)?;
        validate_match_template(template)?;

        let mut registry = self.registry.lock();
        self.check_group(&registry, src, src_group)?;
        self.check_group(&registry, dst, dst_group)?;

        if src.namespace_id() == dst.namespace_id() && src_group == dst_group {
            return Err(BrokerError::InvalidOperation {
                reason: format!("source and destination of '{}' are the same", key),
            });
        }
        if !registry.resolve(src)?.namespace.contains(src_group, key) {
            return Err(unavailable(key));
        }
        if registry.resolve(dst)?.namespace.contains(dst_group, key) {
            return Err(BrokerError::Exists {
                what: format!("key '{}' in '{}'", key, dst.name()),
            });
        }

        let queue = self.commit(&mut registry, src, |namespace| {
            namespace
                .take_queue(src_group, key)
                .ok_or_else(|| unavailable(key))
        })?;

        let inserted = self.commit(&mut registry, dst, |namespace| {
            namespace
                .insert_queue(dst_group, key, queue.clone())
                .map_err(|_| BrokerError::Exists {
                    what: format!("key '{}' in '{}'", key, dst.name()),
                })
        });
        if let Err(e) = inserted {
            // Put the tuples back where they came from.
            self.commit(&mut registry, src, |namespace| {
                namespace
                    .insert_queue(src_group, key, queue)
                    .map_err(|_| BrokerError::Backend {
                        message: format!("could not restore '{}' after failed move", key),
                    })
            })?;
            return Err(e);
        }
        drop(registry);

        self.tuple_ready.notify_all();
        debug!(
            "[dbr] Moved '{}' from '{}' to '{}'",
            key,
            src.name(),
            dst.name()
        );
        Ok(())
    }
}
