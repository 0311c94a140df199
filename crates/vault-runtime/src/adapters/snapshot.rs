//! # Snapshot Store
//!
//! Persists the whole `VaultState` as one JSON document so that separate CLI
//! invocations see one continuous vault.
//!
//! ## Implementation
//!
//! - An exclusive `fs2` lock on `<state>.lock` is held for the lifetime of
//!   the store. A second process pointing at the same state file is refused.
//! - Saves write `<state>.tmp`, sync it, then rename over the state file, so
//!   a crash leaves either the old or the new snapshot, never a torn one.

use crate::container::VaultState;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Current on-disk layout.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("state {} is in use by another process", path.display())]
    Locked { path: PathBuf },

    #[error("snapshot I/O on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt snapshot {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("snapshot {} has format version {found}, expected {SNAPSHOT_FORMAT_VERSION}", path.display())]
    UnsupportedFormat { path: PathBuf, found: u32 },
}

#[derive(Serialize, Deserialize)]
struct Envelope<S> {
    format_version: u32,
    state: S,
}

/// Lock-holding handle on a state file.
pub struct SnapshotStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock_file: File,
}

impl SnapshotStore {
    /// Take the exclusive lock for `path`. The state file need not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| SnapshotError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let lock_path = sibling(&path, "lock");
        let mut lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| SnapshotError::Io {
                path: lock_path.clone(),
                source,
            })?;
        if lock.try_lock_exclusive().is_err() {
            return Err(SnapshotError::Locked { path });
        }
        // PID is informational only.
        let _ = lock.set_len(0).and_then(|()| writeln!(lock, "{}", std::process::id()));

        debug!(path = %path.display(), "Snapshot lock acquired");
        Ok(Self {
            path,
            lock_path,
            lock_file: lock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored state, or `None` if nothing was saved yet.
    pub fn load(&self) -> Result<Option<VaultState>, SnapshotError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let header: Envelope<serde_json::Value> =
            serde_json::from_slice(&bytes).map_err(|e| self.corrupt(e))?;
        if header.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedFormat {
                path: self.path.clone(),
                found: header.format_version,
            });
        }
        let state = serde_json::from_value(header.state).map_err(|e| self.corrupt(e))?;
        Ok(Some(state))
    }

    /// Atomically replace the stored state.
    pub fn save(&self, state: &VaultState) -> Result<(), SnapshotError> {
        let envelope = Envelope {
            format_version: SNAPSHOT_FORMAT_VERSION,
            state,
        };
        let bytes = serde_json::to_vec_pretty(&envelope).map_err(|e| self.corrupt(e))?;

        let tmp = sibling(&self.path, "tmp");
        let io_err = |source| SnapshotError::Io {
            path: tmp.clone(),
            source,
        };
        let mut file = File::create(&tmp).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), bytes = bytes.len(), "Snapshot saved");
        Ok(())
    }

    fn corrupt(&self, e: serde_json::Error) -> SnapshotError {
        SnapshotError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

impl Drop for SnapshotStore {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock_file);
        debug!(path = %self.lock_path.display(), "Snapshot lock released");
    }
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::VaultConfig;
    use crate::genesis::GenesisBuilder;
    use shared_types::Address;

    fn genesis() -> VaultState {
        let mut config = VaultConfig::default();
        config.governance.signers = vec![Address::new([1; 20])];
        GenesisBuilder::new(config).build().unwrap()
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("vault.json")).unwrap();
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vault.json");
        let mut state = genesis();
        state.vault.deposit(Address::new([9; 20]), 77).unwrap();

        {
            let store = SnapshotStore::open(&path).unwrap();
            store.save(&state).unwrap();
        }
        let store = SnapshotStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        assert!(!sibling(&path, "tmp").exists());
    }

    #[test]
    fn test_second_open_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.json");
        let _held = SnapshotStore::open(&path).unwrap();
        assert!(matches!(
            SnapshotStore::open(&path),
            Err(SnapshotError::Locked { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_format_and_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.json");
        let store = SnapshotStore::open(&path).unwrap();

        fs::write(&path, br#"{"format_version": 9, "state": {}}"#).unwrap();
        assert!(matches!(
            store.load(),
            Err(SnapshotError::UnsupportedFormat { found: 9, .. })
        ));

        fs::write(&path, b"not json").unwrap();
        assert!(matches!(store.load(), Err(SnapshotError::Corrupt { .. })));
    }
}
