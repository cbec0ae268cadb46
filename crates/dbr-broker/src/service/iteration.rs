//! # Key Enumeration
//!
//! `directory` lists keys in one shot; `iterator` hands them out one per call.

use super::DataBroker;
use crate::domain::errors::BrokerError;
use crate::domain::namespace::NamespaceHandle;
use crate::ports::outbound::NamespaceStore;
use dbr_types::{Cursor, Group};

impl<S: NamespaceStore> DataBroker<S> {
    pub(crate) fn list_keys(
        &self,
        handle: &NamespaceHandle,
        prefix: &str,
        group: Group,
        count: usize,
    ) -> Result<Vec<String>, BrokerError> {
        if count == 0 {
            return Err(BrokerError::invalid("directory count must be positive"));
        }

        let registry = self.registry.lock();
        self.check_group(&registry, handle, group)?;
        let live = registry.resolve(handle)?;
        Ok(live
            .namespace
            .keys(group, prefix)
            .take(count)
            .map(str::to_owned)
            .collect())
    }

    pub(crate) fn advance_cursor(
        &self,
        handle: &NamespaceHandle,
        cursor: Cursor,
        group: Group,
        prefix: &str,
    ) -> Result<(Option<String>, Cursor), BrokerError> {
        let mut registry = self.registry.lock();
        self.check_group(&registry, handle, group)?;
        let live = registry.resolve_mut(handle)?;
        live.iterators.advance(
            &live.namespace,
            cursor,
            group,
            prefix,
            self.config.max_active_iterators,
        )
    }
}
