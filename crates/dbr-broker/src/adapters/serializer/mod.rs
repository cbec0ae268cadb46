//! Snapshot serializers.

mod bincode;

pub use self::bincode::BincodeSnapshotSerializer;
