//! # Directory Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). One process at a time owns a snapshot directory.

use crate::domain::errors::StoreError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from directory locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created.
    #[error("Failed to create lock file {}: {source}", .path.display())]
    CreateFailed { path: PathBuf, source: io::Error },

    /// Another process holds the lock.
    #[error("Data directory already in use{} ({})", .pid.map(|p| format!(" by process {}", p)).unwrap_or_default(), .path.display())]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    /// Failed to record our PID in the lock file.
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(io::Error),
}

impl From<LockError> for StoreError {
    fn from(err: LockError) -> Self {
        StoreError::Locked {
            message: err.to_string(),
        }
    }
}

/// Exclusive lock on a snapshot directory.
///
/// Acquired when a file store opens, released on drop.
#[derive(Debug)]
pub struct DirectoryLock {
    /// Kept open to hold the flock.
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DirectoryLock {
    const LOCK_FILE: &'static str = "LOCK";

    /// Acquire the lock without waiting.
    ///
    /// A crashed holder releases its flock with the process, so a leftover
    /// lock file alone never blocks acquisition.
    pub fn acquire(dir: &Path) -> Result<Self, LockError> {
        let path = dir.join(Self::LOCK_FILE);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::CreateFailed {
                path: path.clone(),
                source,
            })?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&path),
                path,
            });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(LockError::WriteFailed)?;
        let mut locked = file;
        writeln!(locked, "{}", pid).map_err(LockError::WriteFailed)?;
        locked.sync_all().map_err(LockError::WriteFailed)?;

        Ok(Self {
            file: locked,
            path,
            pid,
        })
    }

    /// PID of the process holding the lock.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for DirectoryLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();

        let lock = DirectoryLock::acquire(dir.path()).unwrap();
        assert_eq!(lock.pid(), std::process::id());
        assert!(lock.path().exists());

        let second = DirectoryLock::acquire(dir.path());
        assert!(matches!(second, Err(LockError::AlreadyLocked { .. })));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();

        drop(DirectoryLock::acquire(dir.path()).unwrap());
        assert!(DirectoryLock::acquire(dir.path()).is_ok());
    }
}
