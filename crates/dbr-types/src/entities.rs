//! # Broker Value Types
//!
//! Small copyable types that appear in the broker's call signatures.
//!
//! - **Namespaces**: `PersistLevel`, `GroupList`
//! - **Tuples**: `Group`, `Flags`
//! - **Progress**: `Cursor`, `Tag`
//! - **Introspection**: `StateMask`

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

// =============================================================================
// NAMESPACES
// =============================================================================

/// How long a namespace's data is expected to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PersistLevel {
    /// In memory only, gone when the broker is dropped.
    #[default]
    VolatileSimple,
    /// In memory, expected to survive a single backend failure.
    VolatileFaultTolerant,
    /// Written to the data directory; may be cleaned up by the operator.
    TemporaryFs,
    /// Written to the data directory and kept until deleted.
    PermanentFs,
}

impl PersistLevel {
    /// Whether namespaces at this level are written through to the store.
    pub const fn is_persistent(self) -> bool {
        matches!(self, PersistLevel::TemporaryFs | PersistLevel::PermanentFs)
    }
}

impl std::fmt::Display for PersistLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PersistLevel::VolatileSimple => "volatile-simple",
            PersistLevel::VolatileFaultTolerant => "volatile-ft",
            PersistLevel::TemporaryFs => "temporary-fs",
            PersistLevel::PermanentFs => "permanent-fs",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for PersistLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volatile-simple" | "volatile" => Ok(PersistLevel::VolatileSimple),
            "volatile-ft" => Ok(PersistLevel::VolatileFaultTolerant),
            "temporary-fs" | "temporary" => Ok(PersistLevel::TemporaryFs),
            "permanent-fs" | "permanent" | "persistent" => Ok(PersistLevel::PermanentFs),
            other => Err(format!("unknown persistence level: {}", other)),
        }
    }
}

/// Opaque partition of a namespace's key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Group(pub u32);

impl Group {
    /// The sentinel group every namespace accepts.
    pub const EMPTY: Group = Group(0);

    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Groups a namespace accepts in addition to `Group::EMPTY`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupList(Vec<Group>);

impl GroupList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, ignoring duplicates and the empty sentinel.
    pub fn with(mut self, group: Group) -> Self {
        if !group.is_empty() && !self.0.contains(&group) {
            self.0.push(group);
        }
        self
    }

    /// Whether `group` may be used against a namespace created with this list.
    pub fn admits(&self, group: Group) -> bool {
        group.is_empty() || self.0.contains(&group)
    }

    pub fn groups(&self) -> &[Group] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Group> for GroupList {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        iter.into_iter().fold(GroupList::new(), GroupList::with)
    }
}

// =============================================================================
// TUPLE ACCESS
// =============================================================================

/// Modifiers for `get`/`read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// Fail with `Unavailable` instead of waiting for a tuple to appear.
    pub const NOWAIT: Flags = Flags(1);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

// =============================================================================
// PROGRESS TOKENS
// =============================================================================

/// Iteration progress token.
///
/// Start with `Cursor::NEW`; the broker hands back `Cursor::DONE` once the
/// key set is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(pub u64);

impl Cursor {
    pub const NEW: Cursor = Cursor(0);
    pub const DONE: Cursor = Cursor(u64::MAX);

    pub const fn is_done(self) -> bool {
        self.0 == Self::DONE.0
    }
}

/// Handle of an asynchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag(pub u64);

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tag#{}", self.0)
    }
}

// =============================================================================
// INTROSPECTION
// =============================================================================

/// Selects which fields `query` fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateMask(u32);

impl StateMask {
    pub const EMPTY: StateMask = StateMask(0);
    pub const LEVEL: StateMask = StateMask(1 << 0);
    pub const GROUPS: StateMask = StateMask(1 << 1);
    pub const REFCOUNT: StateMask = StateMask(1 << 2);
    pub const KEYS: StateMask = StateMask(1 << 3);
    pub const TUPLES: StateMask = StateMask(1 << 4);
    pub const ALL: StateMask = StateMask(0x1f);

    pub const fn contains(self, other: StateMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 & Self::ALL.0 == 0
    }
}

impl BitOr for StateMask {
    type Output = StateMask;

    fn bitor(self, rhs: StateMask) -> StateMask {
        StateMask(self.0 | rhs.0)
    }
}
