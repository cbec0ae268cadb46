//! # Async Request Table
//!
//! Bookkeeping for `put_a`/`get_a`/`read_a`. A tag is either still waiting
//! for a tuple (`RequestState::Pending`) or holds its final result
//! (`RequestState::Finished`) until `test` collects it.

use super::errors::BrokerError;
use super::namespace::NamespaceHandle;
use dbr_types::{Flags, Group, Tag};
use std::collections::BTreeMap;
use std::time::Instant;

/// Whether a fetch consumes the tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// `get`: pop the oldest value.
    Take,
    /// `read`: copy the oldest value, leave it queued.
    Peek,
}

/// Everything needed to retry a fetch later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: String,
    pub group: Group,
    pub flags: Flags,
    pub mode: FetchMode,
    /// Largest value the caller can accept, if bounded.
    pub capacity: Option<usize>,
}

impl FetchRequest {
    pub fn new(key: impl Into<String>, group: Group, flags: Flags, mode: FetchMode) -> Self {
        Self {
            key: key.into(),
            group,
            flags,
            mode,
            capacity: None,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// A fetch that found no tuple yet.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub handle: NamespaceHandle,
    pub request: FetchRequest,
    pub deadline: Instant,
}

/// Lifecycle of a tag.
#[derive(Debug)]
pub enum RequestState {
    Pending(PendingFetch),
    Finished(Result<Option<Vec<u8>>, BrokerError>),
}

/// What `test` reports for a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Still waiting for a tuple; test again later.
    InProgress,
    /// Done. Carries the value for `get_a`/`read_a`, `None` for `put_a`.
    Done(Option<Vec<u8>>),
}

/// Outstanding tags, bounded by `capacity`.
#[derive(Debug)]
pub struct RequestTable {
    next_tag: u64,
    capacity: usize,
    entries: BTreeMap<Tag, RequestState>,
}

impl RequestTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            next_tag: 0,
            capacity,
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a request and hand out its tag.
    pub fn insert(&mut self, state: RequestState) -> Result<Tag, BrokerError> {
        if self.entries.len() >= self.capacity {
            return Err(BrokerError::TagError {
                reason: format!("{} requests already outstanding", self.capacity),
            });
        }
        let tag = loop {
            self.next_tag = self.next_tag.wrapping_add(1);
            let tag = Tag(self.next_tag);
            if !self.entries.contains_key(&tag) {
                break tag;
            }
        };
        self.entries.insert(tag, state);
        Ok(tag)
    }

    pub fn get(&self, tag: Tag) -> Option<&RequestState> {
        self.entries.get(&tag)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<RequestState> {
        self.entries.remove(&tag)
    }

    /// Put back a state taken out with `remove`, keeping its tag.
    pub fn restore(&mut self, tag: Tag, state: RequestState) {
        self.entries.insert(tag, state);
    }

    /// Replace the state of an existing tag. Returns false for unknown tags.
    pub fn finish(&mut self, tag: Tag, result: Result<Option<Vec<u8>>, BrokerError>) -> bool {
        match self.entries.get_mut(&tag) {
            Some(state) => {
                *state = RequestState::Finished(result);
                true
            }
            None => false,
        }
    }
}

pub(crate) fn unknown_tag(tag: Tag) -> BrokerError {
    BrokerError::TagError {
        reason: format!("unknown {}", tag),
    }
}
