use crate::domain::errors::SerializationError;
use crate::domain::namespace::Namespace;
use crate::ports::outbound::SnapshotSerializer;

/// Default snapshot serializer using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeSnapshotSerializer;

impl SnapshotSerializer for BincodeSnapshotSerializer {
    fn serialize(&self, namespace: &Namespace) -> Result<Vec<u8>, SerializationError> {
        ::bincode::serialize(namespace).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn deserialize(&self, data: &[u8]) -> Result<Namespace, SerializationError> {
        ::bincode::deserialize(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbr_types::{Group, GroupList, PersistLevel};

    #[test]
    fn test_snapshot_preserves_queues_and_groups() {
        let groups = GroupList::new().with(Group(9));
        let mut ns = Namespace::new("snap", PersistLevel::PermanentFs, groups);
        ns.push(Group::EMPTY, "k", b"one".to_vec());
        ns.push(Group::EMPTY, "k", b"two".to_vec());
        ns.push(Group(9), "k", b"other".to_vec());

        let serializer = BincodeSnapshotSerializer;
        let bytes = serializer.serialize(&ns).unwrap();
        let restored = serializer.deserialize(&bytes).unwrap();

        assert_eq!(restored, ns);
        assert_eq!(restored.tuple_count(), 3);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = BincodeSnapshotSerializer.deserialize(&[0xFF; 3]);
        assert!(result.is_err());
    }
}
