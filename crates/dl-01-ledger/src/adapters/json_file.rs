//! # JSON File Chain Store
//!
//! Persists the whole chain as a pretty-printed JSON array of blocks.
//! Writes go to a temp file that is synced and renamed over the target, so a
//! crash mid-save leaves the previous chain intact.
//!
//! `open_exclusive` additionally holds an `fs2` lock on `<path>.lock` for the
//! lifetime of the store so two runtimes never write the same chain.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use shared_types::Block;
use tracing::{debug, info};

use crate::ports::outbound::{ChainStore, StoreError};

pub struct JsonFileStore {
    path: PathBuf,
    // Held open to keep the lock; released on drop.
    _lock: Option<File>,
}

impl JsonFileStore {
    /// Store without a process lock. Suitable for read-only tooling.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _lock: None,
        }
    }

    /// Store holding an exclusive lock next to the chain file.
    pub fn open_exclusive<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        ensure_parent(&path)?;

        let lock_path = lock_path_for(&path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| io_error(&lock_path, e))?;

        file.try_lock_exclusive().map_err(|_| StoreError::Locked {
            path: path.display().to_string(),
        })?;
        debug!("[dl-01] Acquired chain lock {}", lock_path.display());

        Ok(Self {
            path,
            _lock: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChainStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Block>>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("[dl-01] No chain file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(io_error(&self.path, e)),
        };

        let blocks: Vec<Block> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        info!(
            "[dl-01] Loaded {} blocks from {} ({} bytes)",
            blocks.len(),
            self.path.display(),
            bytes.len()
        );
        Ok(Some(blocks))
    }

    fn save(&self, blocks: &[Block]) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;

        let json = serde_json::to_vec_pretty(blocks)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;
        file.write_all(&json).map_err(|e| io_error(&temp_path, e))?;
        file.sync_all().map_err(|e| io_error(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| io_error(&self.path, e))?;

        debug!(
            "[dl-01] Saved {} blocks to {}",
            blocks.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))
        }
        _ => Ok(()),
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
