//! # DataBrokerApi Implementation

use super::DataBroker;
use crate::domain::errors::BrokerError;
use crate::domain::namespace::NamespaceHandle;
use crate::domain::requests::{Completion, FetchMode, FetchRequest};
use crate::domain::state::NamespaceState;
use crate::domain::validation::validate_match_template;
use crate::ports::inbound::DataBrokerApi;
use crate::ports::outbound::NamespaceStore;
use dbr_types::{Cursor, Flags, Group, GroupList, PersistLevel, StateMask, Tag};

impl<S: NamespaceStore> DataBrokerApi for DataBroker<S> {
    fn create(
        &self,
        name: &str,
        level: PersistLevel,
        groups: GroupList,
    ) -> Result<NamespaceHandle, BrokerError> {
        self.create_namespace(name, level, groups)
    }

    fn attach(&self, name: &str) -> Result<NamespaceHandle, BrokerError> {
        self.attach_namespace(name)
    }

    fn detach(&self, handle: &NamespaceHandle) -> Result<(), BrokerError> {
        self.detach_namespace(handle)
    }

    fn delete(&self, name: &str) -> Result<(), BrokerError> {
        self.delete_namespace(name)
    }

    fn query(
        &self,
        handle: &NamespaceHandle,
        mask: StateMask,
    ) -> Result<NamespaceState, BrokerError> {
        self.query_namespace(handle, mask)
    }

    fn put(
        &self,
        handle: &NamespaceHandle,
        value: &[u8],
        key: &str,
        group: Group,
    ) -> Result<(), BrokerError> {
        self.put_tuple(handle, value.to_vec(), key, group)
    }

    fn put_gather(
        &self,
        handle: &NamespaceHandle,
        values: &[&[u8]],
        key: &str,
        group: Group,
    ) -> Result<(), BrokerError> {
        let value = Self::gather(values)?;
        self.put_tuple(handle, value, key, group)
    }

    fn get(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Vec<u8>, BrokerError> {
        validate_match_template(template)?;
        self.fetch(handle, &FetchRequest::new(key, group, flags, FetchMode::Take))
    }

    fn read(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Vec<u8>, BrokerError> {
        validate_match_template(template)?;
        self.fetch(handle, &FetchRequest::new(key, group, flags, FetchMode::Peek))
    }

    fn get_into(
        &self,
        handle: &NamespaceHandle,
        buf: &mut [u8],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<usize, BrokerError> {
        self.fetch_into(handle, buf, key, template, group, flags, FetchMode::Take)
    }

    fn read_into(
        &self,
        handle: &NamespaceHandle,
        buf: &mut [u8],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<usize, BrokerError> {
        self.fetch_into(handle, buf, key, template, group, flags, FetchMode::Peek)
    }

    fn read_scatter(
        &self,
        handle: &NamespaceHandle,
        bufs: &mut [&mut [u8]],
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<usize, BrokerError> {
        self.fetch_scatter(handle, bufs, key, template, group, flags)
    }

    fn remove(
        &self,
        handle: &NamespaceHandle,
        group: Group,
        key: &str,
        template: &str,
    ) -> Result<(), BrokerError> {
        self.remove_key(handle, group, key, template)
    }

    fn move_tuple(
        &self,
        src: &NamespaceHandle,
        src_group: Group,
        key: &str,
        template: &str,
        dst: &NamespaceHandle,
        dst_group: Group,
    ) -> Result<(), BrokerError> {
        self.move_key(src, src_group, key, template, dst, dst_group)
    }

    fn directory(
        &self,
        handle: &NamespaceHandle,
        prefix: &str,
        group: Group,
        count: usize,
    ) -> Result<Vec<String>, BrokerError> {
        self.list_keys(handle, prefix, group, count)
    }

    fn iterator(
        &self,
        handle: &NamespaceHandle,
        cursor: Cursor,
        group: Group,
        prefix: &str,
    ) -> Result<(Option<String>, Cursor), BrokerError> {
        self.advance_cursor(handle, cursor, group, prefix)
    }

    fn put_a(
        &self,
        handle: &NamespaceHandle,
        value: &[u8],
        key: &str,
        group: Group,
    ) -> Result<Tag, BrokerError> {
        self.submit_put(handle, value, key, group)
    }

    fn get_a(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Tag, BrokerError> {
        let request = FetchRequest::new(key, group, flags, FetchMode::Take);
        self.submit_fetch(handle, template, request)
    }

    fn read_a(
        &self,
        handle: &NamespaceHandle,
        key: &str,
        template: &str,
        group: Group,
        flags: Flags,
    ) -> Result<Tag, BrokerError> {
        let request = FetchRequest::new(key, group, flags, FetchMode::Peek);
        self.submit_fetch(handle, template, request)
    }

    fn test(&self, tag: Tag) -> Result<Completion, BrokerError> {
        self.test_request(tag)
    }

    fn cancel(&self, tag: Tag) -> Result<(), BrokerError> {
        self.cancel_request(tag)
    }
}
