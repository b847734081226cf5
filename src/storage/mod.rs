//! Snapshot persistence.
//!
//! The engine never touches the filesystem directly. It reads and writes a
//! serialized snapshot through a [`StoragePort`], which is a file on disk in
//! the binary and an in-memory cell in tests.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Store name for quiz sessions, participants and custom questions.
pub const QUIZ_STORE_NAME: &str = "quiz-store";
/// Store name for saved question papers.
pub const PAPER_STORE_NAME: &str = "question-papers";

/// Error raised by a storage port.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    /// Stored snapshot could not be encoded or decoded.
    Serde(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage IO error: {}", e),
            StorageError::Serde(e) => write!(f, "corrupt snapshot: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serde(e) => Some(e),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err)
    }
}

/// Reads and writes one serialized snapshot.
pub trait StoragePort {
    /// Returns the last written snapshot, or `None` if nothing was stored yet.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replaces the stored snapshot.
    fn write(&mut self, snapshot: &str) -> Result<(), StorageError>;
}

/// Keeps each store as `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", name)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoragePort for JsonFileStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, snapshot: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write then rename so a reader polling the file never sees half a snapshot.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, snapshot)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cell: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<String>>, StorageError> {
        self.cell
            .lock()
            .map_err(|_| io::Error::other("memory store lock poisoned").into())
    }
}

impl StoragePort for MemoryStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.clone())
    }

    fn write(&mut self, snapshot: &str) -> Result<(), StorageError> {
        *self.lock()? = Some(snapshot.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_contents() {
        let mut store = MemoryStore::new();
        let reader = store.clone();
        assert_eq!(reader.read().unwrap(), None);
        store.write("{}").unwrap();
        assert_eq!(reader.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_poisoned_memory_store_fails_reads_and_writes() {
        let mut store = MemoryStore::new();
        store.write("{}").unwrap();

        let cell = Arc::clone(&store.cell);
        let _ = std::thread::spawn(move || {
            let _guard = cell.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.read(), Err(StorageError::Io(_))));
        assert!(matches!(store.write("{}"), Err(StorageError::Io(_))));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("quiz-store-test-{}", uuid::Uuid::new_v4()));
        let mut store = JsonFileStore::new(&dir, QUIZ_STORE_NAME);
        assert_eq!(store.read().unwrap(), None);

        store.write("{\"sessions\":[]}").unwrap();
        assert!(store.path().ends_with("quiz-store.json"));
        assert_eq!(store.read().unwrap().as_deref(), Some("{\"sessions\":[]}"));

        fs::remove_dir_all(dir).ok();
    }
}
