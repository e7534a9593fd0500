//! Persistence slot used to hand a finalized quiz from the builder to the
//! player.
//!
//! The store is a flat string-to-string map behind the [`KeyValueStore`]
//! trait so tests can substitute [`MemoryStore`]. The real [`FileStore`]
//! keeps the map as one JSON file under the user data directory and reads it
//! back on every access, so malformed content surfaces at the moment of the
//! read, not at startup.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Quiz;

/// Key under which the finalized quiz document is handed off.
pub const QUIZ_SLOT_KEY: &str = "current_quiz";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access the quiz store: {0}")]
    Io(#[from] io::Error),
    #[error("the quiz store holds malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no usable data directory on this platform")]
    NoDataDir,
}

/// Minimal key-value store, mirroring the slot's get/set/clear lifecycle.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    /// Removes every key. The hand-off deliberately wipes the whole store
    /// before writing, so callers must treat it as exclusively owned.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-memory store for tests and environments without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }
}

/// File-backed store: a single pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the platform data directory, e.g.
    /// `~/.local/share/quizforge/storage.json` on Linux.
    pub fn open_default() -> Result<Self, StorageError> {
        let dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::open(dir.join("quizforge").join("storage.json")))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        log::debug!("quiz store at {}", path.display());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), value);
        self.write_entries(&entries)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.write_entries(&HashMap::new())
    }
}

/// Writes the id-stripped quiz document to the slot, leaving any other
/// entries alone.
pub fn save_to_slot(store: &mut dyn KeyValueStore, quiz: &Quiz) -> Result<(), StorageError> {
    let json = serde_json::to_string(quiz)?;
    store.set(QUIZ_SLOT_KEY, json)
}

/// Clears the store, then writes the id-stripped quiz document to the slot.
/// Serialization happens first so a failure cannot leave the store wiped.
pub fn store_quiz(store: &mut dyn KeyValueStore, quiz: &Quiz) -> Result<(), StorageError> {
    let json = serde_json::to_string(quiz)?;
    store.clear()?;
    store.set(QUIZ_SLOT_KEY, json)?;
    log::debug!("stored quiz '{}' to the hand-off slot", quiz.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerKey, Question};

    fn sample_quiz() -> Quiz {
        Quiz {
            title: "Capitals".to_string(),
            description: "Europe".to_string(),
            questions: vec![Question {
                id: 7,
                title: "Capital of France?".to_string(),
                answers: vec!["Paris".to_string(), "Lyon".to_string()],
                correct: AnswerKey::Unique {
                    correct_answers: "Paris".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.set("a", "1".to_string()).unwrap();
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(store.get("b").unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_store_quiz_wipes_unrelated_keys() {
        let mut store = MemoryStore::new();
        store.set("unrelated", "data".to_string()).unwrap();

        store_quiz(&mut store, &sample_quiz()).unwrap();

        assert_eq!(store.get("unrelated").unwrap(), None);
        let stored = store.get(QUIZ_SLOT_KEY).unwrap().unwrap();
        assert!(stored.contains("\"Capitals\""));
        assert!(!stored.contains("\"id\""));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("storage.json"));

        assert_eq!(store.get(QUIZ_SLOT_KEY).unwrap(), None);

        store.set(QUIZ_SLOT_KEY, "{}".to_string()).unwrap();
        assert_eq!(store.get(QUIZ_SLOT_KEY).unwrap(), Some("{}".to_string()));

        store.clear().unwrap();
        assert_eq!(store.get(QUIZ_SLOT_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested").join("storage.json"));
        store.set("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_corrupt_file_store_surfaces_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::open(&path);
        assert!(matches!(
            store.get(QUIZ_SLOT_KEY),
            Err(StorageError::Malformed(_))
        ));
    }

    #[test]
    fn test_store_quiz_recovers_a_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "}{").unwrap();

        let mut store = FileStore::open(&path);
        store_quiz(&mut store, &sample_quiz()).unwrap();
        assert!(store.get(QUIZ_SLOT_KEY).unwrap().is_some());
    }
}
