use crate::ports::outbound::ChecksumProvider;
use crc32fast::Hasher;

/// CRC32 over `name`, a zero separator, then the snapshot payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32SnapshotChecksum;

impl ChecksumProvider for Crc32SnapshotChecksum {
    fn snapshot_checksum(&self, name: &str, payload: &[u8]) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(name.as_bytes());
        // Names never contain NUL, so ("ab", "c..") and ("a", "bc..") differ.
        hasher.update(&[0]);
        hasher.update(payload);
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_binds_name_and_payload() {
        let checksum = Crc32SnapshotChecksum;
        let sum = checksum.snapshot_checksum("jobs", b"payload");

        assert!(checksum.verify_snapshot("jobs", b"payload", sum));
        assert!(!checksum.verify_snapshot("jobs", b"payloaD", sum));
        assert!(!checksum.verify_snapshot("logs", b"payload", sum));
    }

    #[test]
    fn test_name_boundary_matters() {
        let checksum = Crc32SnapshotChecksum;
        assert_ne!(
            checksum.snapshot_checksum("ab", b"c"),
            checksum.snapshot_checksum("a", b"bc")
        );
    }
}
