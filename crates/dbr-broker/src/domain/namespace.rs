//! # Namespace Entity
//!
//! A namespace is a named map from `(group, key)` to a FIFO queue of values.
//! `put` appends to the back of a queue, `get` pops the front, `read` peeks
//! at it. A key whose queue drains disappears.

use dbr_types::{Group, GroupList, PersistLevel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

/// Address of a tuple queue inside a namespace.
///
/// Ordered by group first so one group's keys form a contiguous range.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TupleKey {
    pub group: Group,
    pub key: String,
}

impl TupleKey {
    pub fn new(group: Group, key: impl Into<String>) -> Self {
        Self {
            group,
            key: key.into(),
        }
    }
}

/// The values stored under one key, oldest first.
pub type TupleQueue = VecDeque<Vec<u8>>;

/// A namespace and all of its tuples.
///
/// This is also the unit of persistence: persistent namespaces are written
/// to the store as a whole after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    name: String,
    level: PersistLevel,
    groups: GroupList,
    tuples: BTreeMap<TupleKey, TupleQueue>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, level: PersistLevel, groups: GroupList) -> Self {
        Self {
            name: name.into(),
            level,
            groups,
            tuples: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> PersistLevel {
        self.level
    }

    pub fn groups(&self) -> &GroupList {
        &self.groups
    }

    /// Append a value to the back of the key's queue.
    pub fn push(&mut self, group: Group, key: &str, value: Vec<u8>) {
        self.tuples
            .entry(TupleKey::new(group, key))
            .or_default()
            .push_back(value);
    }

    /// Remove and return the oldest value under the key.
    pub fn pop(&mut self, group: Group, key: &str) -> Option<Vec<u8>> {
        let tuple_key = TupleKey::new(group, key);
        let queue = self.tuples.get_mut(&tuple_key)?;
        let value = queue.pop_front();
        if queue.is_empty() {
            self.tuples.remove(&tuple_key);
        }
        value
    }

    /// The oldest value under the key, left in place.
    pub fn peek(&self, group: Group, key: &str) -> Option<&[u8]> {
        self.tuples
            .get(&TupleKey::new(group, key))
            .and_then(|queue| queue.front())
            .map(Vec::as_slice)
    }

    pub fn contains(&self, group: Group, key: &str) -> bool {
        self.tuples.contains_key(&TupleKey::new(group, key))
    }

    /// Detach the whole queue under the key.
    pub fn take_queue(&mut self, group: Group, key: &str) -> Option<TupleQueue> {
        self.tuples.remove(&TupleKey::new(group, key))
    }

    /// Install a queue under the key, replacing nothing.
    ///
    /// Hands the queue back if the key is taken or the queue is empty.
    pub fn insert_queue(
        &mut self,
        group: Group,
        key: &str,
        queue: TupleQueue,
    ) -> Result<(), TupleQueue> {
        let tuple_key = TupleKey::new(group, key);
        if queue.is_empty() || self.tuples.contains_key(&tuple_key) {
            return Err(queue);
        }
        self.tuples.insert(tuple_key, queue);
        Ok(())
    }

    /// Keys of `group` starting with `prefix`, in ascending order.
    pub fn keys<'a>(&'a self, group: Group, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tuples
            .range(TupleKey::new(group, prefix)..)
            .map(|(tuple_key, _)| tuple_key)
            .take_while(move |tuple_key| {
                tuple_key.group == group && tuple_key.key.starts_with(prefix)
            })
            .map(|tuple_key| tuple_key.key.as_str())
    }

    /// Number of distinct keys across all groups.
    pub fn key_count(&self) -> usize {
        self.tuples.len()
    }

    /// Number of stored values across all keys.
    pub fn tuple_count(&self) -> usize {
        self.tuples.values().map(VecDeque::len).sum()
    }
}

/// Caller-side reference to an attached namespace.
///
/// Each `create`/`attach` yields a distinct handle. A handle goes stale when
/// it is detached or its namespace is deleted; stale handles fail with
/// `BrokerError::Handle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceHandle {
    name: Arc<str>,
    namespace_id: u64,
    handle_id: u64,
}

impl NamespaceHandle {
    pub(crate) fn new(name: Arc<str>, namespace_id: u64, handle_id: u64) -> Self {
        Self {
            name,
            namespace_id,
            handle_id,
        }
    }

    /// Name of the namespace this handle was issued for.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn namespace_id(&self) -> u64 {
        self.namespace_id
    }

    pub(crate) fn handle_id(&self) -> u64 {
        self.handle_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_namespace() -> Namespace {
        Namespace::new("test", PersistLevel::VolatileSimple, GroupList::new())
    }

    #[test]
    fn test_fifo_order() {
        let mut ns = make_namespace();
        ns.push(Group::EMPTY, "k", b"first".to_vec());
        ns.push(Group::EMPTY, "k", b"second".to_vec());

        assert_eq!(ns.peek(Group::EMPTY, "k"), Some(&b"first"[..]));
        assert_eq!(ns.pop(Group::EMPTY, "k"), Some(b"first".to_vec()));
        assert_eq!(ns.pop(Group::EMPTY, "k"), Some(b"second".to_vec()));
        assert_eq!(ns.pop(Group::EMPTY, "k"), None);
    }

    #[test]
    fn test_drained_key_disappears() {
        let mut ns = make_namespace();
        ns.push(Group::EMPTY, "k", b"v".to_vec());
        ns.pop(Group::EMPTY, "k");

        assert!(!ns.contains(Group::EMPTY, "k"));
        assert_eq!(ns.key_count(), 0);
    }

    #[test]
    fn test_keys_are_scoped_by_group_and_prefix() {
        let mut ns = make_namespace();
        ns.push(Group::EMPTY, "job:1", b"a".to_vec());
        ns.push(Group::EMPTY, "job:2", b"b".to_vec());
        ns.push(Group::EMPTY, "log:1", b"c".to_vec());
        ns.push(Group(5), "job:3", b"d".to_vec());

        let jobs: Vec<_> = ns.keys(Group::EMPTY, "job:").collect();
        assert_eq!(jobs, vec!["job:1", "job:2"]);

        let all: Vec<_> = ns.keys(Group::EMPTY, "").collect();
        assert_eq!(all.len(), 3);

        let other: Vec<_> = ns.keys(Group(5), "").collect();
        assert_eq!(other, vec!["job:3"]);
    }

    #[test]
    fn test_counts() {
        let mut ns = make_namespace();
        ns.push(Group::EMPTY, "a", b"1".to_vec());
        ns.push(Group::EMPTY, "a", b"2".to_vec());
        ns.push(Group::EMPTY, "b", b"3".to_vec());

        assert_eq!(ns.key_count(), 2);
        assert_eq!(ns.tuple_count(), 3);
    }

    #[test]
    fn test_insert_queue_refuses_existing_key() {
        let mut ns = make_namespace();
        ns.push(Group::EMPTY, "a", b"1".to_vec());

        let queue: TupleQueue = [b"x".to_vec()].into_iter().collect();
        assert!(ns.insert_queue(Group::EMPTY, "a", queue.clone()).is_err());
        assert!(ns.insert_queue(Group::EMPTY, "b", queue).is_ok());
        assert!(ns.insert_queue(Group::EMPTY, "c", TupleQueue::new()).is_err());
    }
}
