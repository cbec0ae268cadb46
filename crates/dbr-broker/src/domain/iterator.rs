//! # Key Iteration
//!
//! Cursor bookkeeping for `iterator`. Starting from `Cursor::NEW` snapshots
//! the matching keys; each later call hands out the next snapshot key that
//! still exists. Once the snapshot is exhausted the cursor is released and
//! `Cursor::DONE` is returned.

use super::errors::BrokerError;
use super::namespace::Namespace;
use dbr_types::{Cursor, Group};
use std::collections::{HashMap, VecDeque};

#[derive(Debug)]
struct KeySnapshot {
    group: Group,
    remaining: VecDeque<String>,
}

/// Open cursors of one namespace.
#[derive(Debug, Default)]
pub struct IteratorTable {
    next_id: u64,
    open: HashMap<u64, KeySnapshot>,
}

impl IteratorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cursors currently open.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Advance `cursor` over `namespace`.
    ///
    /// `group` and `prefix` are only consulted when `cursor` is `Cursor::NEW`.
    pub fn advance(
        &mut self,
        namespace: &Namespace,
        cursor: Cursor,
        group: Group,
        prefix: &str,
        max_open: usize,
    ) -> Result<(Option<String>, Cursor), BrokerError> {
        let id = if cursor == Cursor::NEW {
            if self.open.len() >= max_open {
                return Err(BrokerError::NoMemory {
                    resource: "iterator cursors",
                    limit: max_open,
                });
            }
            let remaining: VecDeque<String> =
                namespace.keys(group, prefix).map(str::to_owned).collect();
            let id = self.allocate_id();
            self.open.insert(id, KeySnapshot { group, remaining });
            id
        } else if cursor.is_done() {
            return Err(BrokerError::invalid("iteration already finished"));
        } else {
            cursor.0
        };

        let snapshot = self
            .open
            .get_mut(&id)
            .ok_or_else(|| BrokerError::invalid(format!("unknown cursor {}", cursor.0)))?;

        while let Some(key) = snapshot.remaining.pop_front() {
            if namespace.contains(snapshot.group, &key) {
                return Ok((Some(key), Cursor(id)));
            }
        }

        self.open.remove(&id);
        Ok((None, Cursor::DONE))
    }

    /// Ids skip both sentinels.
    fn allocate_id(&mut self) -> u64 {
        loop {
            self.next_id = self.next_id.wrapping_add(1);
            let id = self.next_id;
            if id != Cursor::NEW.0 && id != Cursor::DONE.0 && !self.open.contains_key(&id) {
                return id;
            }
        }
    }
}
