//! # Namespace Lifecycle
//!
//! create / attach / detach / delete / query.

use super::DataBroker;
use crate::domain::errors::BrokerError;
use crate::domain::namespace::{Namespace, NamespaceHandle};
use crate::domain::state::NamespaceState;
use crate::domain::validation::validate_namespace_name;
use crate::ports::outbound::NamespaceStore;
use dbr_types::{GroupList, PersistLevel, StateMask};
use tracing::{debug, info};

impl<S: NamespaceStore> DataBroker<S> {
    pub(crate) fn create_namespace(
        &self,
        name: &str,
        level: PersistLevel,
        groups: GroupList,
    ) -> Result<NamespaceHandle, BrokerError> {
        validate_namespace_name(name)?;

        let mut registry = self.registry.lock();
        if registry.contains(name) || self.store.contains(name)? {
            return Err(BrokerError::Exists {
                what: format!("namespace '{}'", name),
            });
        }

        let namespace = Namespace::new(name, level, groups);
        if level.is_persistent() {
            self.store.save(&namespace)?;
        }
        registry.insert(namespace);

        let handle = registry
            .attach(name)
            .ok_or_else(|| BrokerError::NamespaceInvalid {
                name: name.to_string(),
            })?;

        info!("[dbr] Created namespace '{}' ({})", name, level);
        Ok(handle)
    }

    pub(crate) fn attach_namespace(&self, name: &str) -> Result<NamespaceHandle, BrokerError> {
        validate_namespace_name(name)?;

        let mut registry = self.registry.lock();
        if !registry.contains(name) {
            let namespace = self
                .store
                .load(name)?
                .ok_or_else(|| BrokerError::NamespaceInvalid {
                    name: name.to_string(),
                })?;
            info!(
                "[dbr] Loaded namespace '{}' from store ({} keys)",
                name,
                namespace.key_count()
            );
            registry.insert(namespace);
        }

        let handle = registry
            .attach(name)
            .ok_or_else(|| BrokerError::NamespaceInvalid {
                name: name.to_string(),
            })?;

        debug!("[dbr] Attached to '{}'", name);
        Ok(handle)
    }

    /// Persistent namespaces leave memory with their last handle; their
    /// snapshot already holds every tuple. Volatile ones stay until deleted.
    pub(crate) fn detach_namespace(&self, handle: &NamespaceHandle) -> Result<(), BrokerError> {
        let mut registry = self.registry.lock();
        let live = registry.resolve_mut(handle)?;
        live.attached.remove(&handle.handle_id());

        let evict = live.attached.is_empty() && live.namespace.level().is_persistent();
        if evict {
            registry.remove(handle.name());
            debug!("[dbr] Evicted '{}' after last detach", handle.name());
        }
        drop(registry);

        self.tuple_ready.notify_all();
        debug!("[dbr] Detached from '{}'", handle.name());
        Ok(())
    }

    pub(crate) fn delete_namespace(&self, name: &str) -> Result<(), BrokerError> {
        validate_namespace_name(name)?;

        let mut registry = self.registry.lock();
        match registry.get(name) {
            Some(live) => {
                let refcount = live.refcount();
                if refcount > 1 {
                    return Err(BrokerError::NamespaceBusy {
                        name: name.to_string(),
                        refcount,
                    });
                }
                if live.namespace.level().is_persistent() {
                    self.store.remove(name)?;
                }
                registry.remove(name);
            }
            None if self.store.contains(name)? => self.store.remove(name)?,
            None => {
                return Err(BrokerError::NamespaceInvalid {
                    name: name.to_string(),
                })
            }
        }
        drop(registry);

        self.tuple_ready.notify_all();
        info!("[dbr] Deleted namespace '{}'", name);
        Ok(())
    }

    pub(crate) fn query_namespace(
        &self,
        handle: &NamespaceHandle,
        mask: StateMask,
    ) -> Result<NamespaceState, BrokerError> {
        if mask.is_empty() {
            return Err(BrokerError::invalid("query mask selects nothing"));
        }

        let registry = self.registry.lock();
        let live = registry.resolve(handle)?;
        Ok(NamespaceState::capture(
            &live.namespace,
            live.refcount(),
            mask,
        ))
    }
}
