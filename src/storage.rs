//! Stored files
//!
//! Flat directory of byte blobs addressed by file name. Reads and writes of
//! the same name are serialized through a per-name lock so a reader never
//! observes a partially written file.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid file name {0:?}")]
    InvalidName(String),
    #[error("file {0:?} not found")]
    NotFound(String),
    #[error("I/O error on {name:?}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Rejects names that could escape the storage root.
pub fn validate_name(name: &str) -> Result<(), StorageError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
        || Path::new(name).is_absolute();

    if invalid {
        Err(StorageError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Handle to the storage directory. Cheap to clone; clones share locks.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: Arc<PathBuf>,
    locks: Arc<Mutex<HashMap<String, Arc<RwLock<()>>>>>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Reads the whole file into memory.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        validate_name(name)?;
        let path = self.root.join(name);

        let lock = self.lock_for(name).await;
        let result = {
            let _guard = lock.read().await;
            tokio::fs::read(&path).await
        };
        self.release(name, lock).await;

        result.map_err(|source| match source.kind() {
            ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::Io {
                name: name.to_string(),
                source,
            },
        })
    }

    /// Creates or truncates the file and writes `contents` to it.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), StorageError> {
        validate_name(name)?;
        let path = self.root.join(name);

        let lock = self.lock_for(name).await;
        let result = {
            let _guard = lock.write().await;
            self.write_file(&path, contents).await
        };
        self.release(name, lock).await;

        result.map_err(|source| StorageError::Io {
            name: name.to_string(),
            source,
        })
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        tokio::fs::create_dir_all(self.root.as_path()).await?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o644);

        let mut file = options.open(path).await?;
        file.write_all(contents).await?;
        file.flush().await?;
        Ok(())
    }

    async fn lock_for(&self, name: &str) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(name.to_string()).or_default())
    }

    /// Drops the table entry once no other task holds or waits on it.
    async fn release(&self, name: &str, lock: Arc<RwLock<()>>) {
        let mut locks = self.locks.lock().await;
        // One reference in the table, one held here.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(name);
        }
    }

    #[cfg(test)]
    async fn tracked_locks(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lock_table_is_pruned_after_use() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("a", b"1").await.unwrap();
        store.read("a").await.unwrap();

        assert_eq!(store.tracked_locks().await, 0);
    }

    #[test]
    fn rejects_traversal_names() {
        for name in ["", ".", "..", "../etc", "a/b", "a\\b", "/abs", "nul\0"] {
            assert!(
                matches!(validate_name(name), Err(StorageError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(validate_name("..hidden").is_ok());
    }
}
