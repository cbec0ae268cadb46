//! # File Namespace Store
//!
//! Persistent namespaces as one snapshot file each under the data directory.
//!
//! ## Snapshot layout
//!
//! `<name>.dbr` holds a bincode `SnapshotEnvelope`: the format version, a
//! CRC32 over the namespace name and payload, and the bincode-encoded
//! `Namespace`. Saves go to `<name>.tmp` first and are renamed into
//! place, so a crash leaves either the old or the new snapshot.

use crate::adapters::infra::Crc32SnapshotChecksum;
use crate::adapters::lock::DirectoryLock;
use crate::adapters::serializer::BincodeSnapshotSerializer;
use crate::domain::errors::{SerializationError, StoreError};
use crate::domain::namespace::Namespace;
use crate::ports::outbound::{ChecksumProvider, NamespaceStore, SnapshotSerializer};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Current on-disk envelope version.
const SNAPSHOT_FORMAT: u16 = 1;
const SNAPSHOT_EXTENSION: &str = "dbr";

/// On-disk wrapper: the encoded namespace plus its checksum.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    format: u16,
    checksum: u32,
    payload: Vec<u8>,
}

/// File-backed namespace store.
///
/// Each namespace lives in `<dir>/<name>.dbr`, rewritten atomically (temp
/// file + rename) on every save. The directory is locked for the lifetime of
/// the store so two processes never write the same snapshots.
#[derive(Debug)]
pub struct FileNamespaceStore<CS = Crc32SnapshotChecksum, SZ = BincodeSnapshotSerializer> {
    dir: PathBuf,
    checksum: CS,
    serializer: SZ,
    _lock: DirectoryLock,
}

impl FileNamespaceStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_providers(dir, Crc32SnapshotChecksum, BincodeSnapshotSerializer)
    }
}

impl<CS, SZ> FileNamespaceStore<CS, SZ>
where
    CS: ChecksumProvider,
    SZ: SnapshotSerializer,
{
    /// Open a store with explicit checksum and serializer implementations.
    pub fn with_providers(
        dir: impl AsRef<Path>,
        checksum: CS,
        serializer: SZ,
    ) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        let lock = DirectoryLock::acquire(&dir)?;

        info!("[dbr] Opened snapshot store at {}", dir.display());

        Ok(Self {
            dir,
            checksum,
            serializer,
            _lock: lock,
        })
    }

    /// Root directory of this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, SNAPSHOT_EXTENSION))
    }

    fn encode(&self, namespace: &Namespace) -> Result<Vec<u8>, StoreError> {
        let payload = self.serializer.serialize(namespace)?;
        let envelope = SnapshotEnvelope {
            format: SNAPSHOT_FORMAT,
            checksum: self.checksum.snapshot_checksum(namespace.name(), &payload),
            payload,
        };
        bincode::serialize(&envelope).map_err(|e| {
            SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn decode(&self, name: &str, bytes: &[u8]) -> Result<Namespace, StoreError> {
        let envelope: SnapshotEnvelope =
            bincode::deserialize(bytes).map_err(|e| SerializationError {
                message: e.to_string(),
            })?;

        if envelope.format != SNAPSHOT_FORMAT {
            return Err(SerializationError {
                message: format!(
                    "unsupported snapshot format {} for '{}'",
                    envelope.format, name
                ),
            }
            .into());
        }

        if !self
            .checksum
            .verify_snapshot(name, &envelope.payload, envelope.checksum)
        {
            return Err(StoreError::Corruption {
                name: name.to_string(),
                expected: envelope.checksum,
                actual: self.checksum.snapshot_checksum(name, &envelope.payload),
            });
        }

        Ok(self.serializer.deserialize(&envelope.payload)?)
    }
}

impl<CS, SZ> NamespaceStore for FileNamespaceStore<CS, SZ>
where
    CS: ChecksumProvider,
    SZ: SnapshotSerializer,
{
    fn load(&self, name: &str) -> Result<Option<Namespace>, StoreError> {
        let path = self.path_for(name);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let namespace = self.decode(name, &bytes)?;
        debug!(
            "[dbr] Loaded '{}' ({} keys, {} bytes)",
            name,
            namespace.key_count(),
            bytes.len()
        );
        Ok(Some(namespace))
    }

    fn save(&self, namespace: &Namespace) -> Result<(), StoreError> {
        let bytes = self.encode(namespace)?;
        let path = self.path_for(namespace.name());
        let temp_path = path.with_extension("tmp");

        let mut file =
            std::fs::File::create(&temp_path).map_err(|e| StoreError::io(&temp_path, e))?;
        file.write_all(&bytes)
            .map_err(|e| StoreError::io(&temp_path, e))?;
        file.sync_all().map_err(|e| StoreError::io(&temp_path, e))?;
        std::fs::rename(&temp_path, &path).map_err(|e| StoreError::io(&path, e))?;

        debug!(
            "[dbr] Saved '{}' ({} bytes)",
            namespace.name(),
            bytes.len()
        );
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn contains(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(name).is_file())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == SNAPSHOT_EXTENSION)
            })
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_owned)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}
