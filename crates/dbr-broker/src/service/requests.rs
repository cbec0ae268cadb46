//! # Async Requests
//!
//! `put_a` completes on the spot. `get_a`/`read_a` complete on the spot when
//! a tuple is there (or `NOWAIT` rules out waiting); otherwise they are
//! parked as `Pending` and retried by every `test` until the deadline.

use super::tuples::unavailable;
use super::DataBroker;
use crate::domain::errors::BrokerError;
use crate::domain::namespace::NamespaceHandle;
use crate::domain::requests::{
    unknown_tag, Completion, FetchRequest, PendingFetch, RequestState,
};
use crate::domain::validation::{validate_key, validate_match_template};
use crate::ports::outbound::NamespaceStore;
use dbr_types::{Flags, Group, Tag};
use std::time::Instant;
use tracing::debug;

impl<S: NamespaceStore> DataBroker<S> {
    pub(crate) fn submit_put(
        &self,
        handle: &NamespaceHandle,
        value: &[u8],
        key: &str,
        group: Group,
    ) -> Result<Tag, BrokerError> {
        // Reserve the tag before touching the namespace.
        let tag = self
            .registry
            .lock()
            .requests
            .insert(RequestState::Finished(Ok(None)))?;

        if let Err(e) = self.put_tuple(handle, value.to_vec(), key, group) {
            self.registry.lock().requests.remove(tag);
            return Err(e);
        }
        debug!("[dbr] {} put '{}' (complete)", tag, key);
        Ok(tag)
    }

    pub(crate) fn submit_fetch(
        &self,
        handle: &NamespaceHandle,
        template: &str,
        request: FetchRequest,
    ) -> Result<Tag, BrokerError> {
        validate_match_template(template)?;
        validate_key(&request.key, self.config.max_key_len)?;

        let mut registry = self.registry.lock();
        // A tuple taken by `try_fetch` must always land under a tag.
        let tag = registry
            .requests
            .insert(RequestState::Finished(Ok(None)))?;

        let state = match self.try_fetch(&mut registry, handle, &request) {
            Ok(Some(value)) => RequestState::Finished(Ok(Some(value))),
            Ok(None) if request.flags.contains(Flags::NOWAIT) => {
                RequestState::Finished(Err(unavailable(&request.key)))
            }
            Ok(None) => RequestState::Pending(PendingFetch {
                handle: handle.clone(),
                request,
                deadline: Instant::now() + self.config.timeout,
            }),
            Err(e) => {
                registry.requests.remove(tag);
                return Err(e);
            }
        };

        let pending = matches!(state, RequestState::Pending(_));
        registry.requests.restore(tag, state);
        debug!("[dbr] {} submitted (pending: {})", tag, pending);
        Ok(tag)
    }

    pub(crate) fn test_request(&self, tag: Tag) -> Result<Completion, BrokerError> {
        let mut registry = self.registry.lock();
        let state = registry
            .requests
            .remove(tag)
            .ok_or_else(|| unknown_tag(tag))?;

        let pending = match state {
            RequestState::Finished(result) => return result.map(Completion::Done),
            RequestState::Pending(pending) => pending,
        };

        match self.try_fetch(&mut registry, &pending.handle, &pending.request)? {
            Some(value) => Ok(Completion::Done(Some(value))),
            None if Instant::now() >= pending.deadline => Err(BrokerError::Timeout {
                key: pending.request.key.clone(),
                waited_ms: self.config.timeout.as_millis() as u64,
            }),
            None => {
                registry
                    .requests
                    .restore(tag, RequestState::Pending(pending));
                Ok(Completion::InProgress)
            }
        }
    }

    pub(crate) fn cancel_request(&self, tag: Tag) -> Result<(), BrokerError> {
        let mut registry = self.registry.lock();
        if !registry
            .requests
            .finish(tag, Err(BrokerError::Cancelled { tag }))
        {
            return Err(unknown_tag(tag));
        }
        debug!("[dbr] {} cancelled", tag);
        Ok(())
    }
}
