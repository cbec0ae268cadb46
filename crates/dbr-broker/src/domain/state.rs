//! # Namespace State
//!
//! Snapshot returned by `query`.

use super::namespace::Namespace;
use dbr_types::{GroupList, PersistLevel, StateMask};
use serde::Serialize;

/// Introspection result for one namespace.
///
/// `name` is always present; the other fields are filled only when the
/// query mask selects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceState {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<PersistLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<GroupList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refcount: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuple_count: Option<usize>,
}

impl NamespaceState {
    pub fn capture(namespace: &Namespace, refcount: usize, mask: StateMask) -> Self {
        Self {
            name: namespace.name().to_string(),
            level: mask
                .contains(StateMask::LEVEL)
                .then_some(namespace.level()),
            groups: mask
                .contains(StateMask::GROUPS)
                .then(|| namespace.groups().clone()),
            refcount: mask.contains(StateMask::REFCOUNT).then_some(refcount),
            key_count: mask
                .contains(StateMask::KEYS)
                .then_some(namespace.key_count()),
            tuple_count: mask
                .contains(StateMask::TUPLES)
                .then(|| namespace.tuple_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbr_types::Group;

    #[test]
    fn test_mask_selects_fields() {
        let mut ns = Namespace::new("q", PersistLevel::PermanentFs, GroupList::new());
        ns.push(Group::EMPTY, "k", b"v".to_vec());

        let state = NamespaceState::capture(&ns, 2, StateMask::REFCOUNT | StateMask::TUPLES);
        assert_eq!(state.name, "q");
        assert_eq!(state.refcount, Some(2));
        assert_eq!(state.tuple_count, Some(1));
        assert_eq!(state.level, None);
        assert_eq!(state.key_count, None);

        let full = NamespaceState::capture(&ns, 1, StateMask::ALL);
        assert_eq!(full.level, Some(PersistLevel::PermanentFs));
        assert_eq!(full.key_count, Some(1));
    }
}
