//! Infrastructure adapters.

mod checksum;

pub use checksum::Crc32SnapshotChecksum;
