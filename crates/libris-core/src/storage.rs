//! Slot persistence
//!
//! Each record kind has one named slot: a JSON file in the data directory
//! (`books.json`, `readers.json`) holding the serialized collection.
//!
//! The backend is probed once at store construction. When the data
//! directory cannot be created the probe fails and the store runs without
//! persistence; reads and writes on an open backend are best-effort and
//! never surface errors to the mutation path. Writes go through a temp
//! file plus rename so a slot is never left half-written.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Best-effort file-per-slot storage backend
pub struct SlotStorage {
    dir: PathBuf,
}

impl SlotStorage {
    /// Probe the storage medium, returning `None` when it is unavailable
    ///
    /// This is the one-time capability check: if the data directory cannot
    /// be created, persistence is silently disabled for the lifetime of
    /// the store.
    pub fn open(dir: &Path) -> Option<Self> {
        match fs::create_dir_all(dir) {
            Ok(()) => Some(Self {
                dir: dir.to_path_buf(),
            }),
            Err(e) => {
                warn!("storage unavailable at {:?}: {}", dir, e);
                None
            }
        }
    }

    /// Path of a slot file within the data directory
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }

    /// Read a slot's contents, `None` when missing or unreadable
    pub fn read(&self, slot: &str) -> Option<String> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("failed to read slot {:?}: {}", path, e);
                None
            }
        }
    }

    /// Write a slot's contents, swallowing failures with a warning
    pub fn write(&self, slot: &str, content: &str) {
        let path = self.slot_path(slot);
        if let Err(e) = atomic_write(&path, content.as_bytes()) {
            warn!("failed to persist slot {:?}: {}", path, e);
        }
    }
}

/// Write data to a file atomically
///
/// Writes to a temporary file in the same directory, syncs it, then
/// renames it over the target path.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("libris").join("data");

        let storage = SlotStorage::open(&nested);
        assert!(storage.is_some());
        assert!(nested.exists());
    }

    #[test]
    fn test_read_missing_slot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp_dir.path()).unwrap();

        assert!(storage.read("books").is_none());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp_dir.path()).unwrap();

        storage.write("books", r#"[{"title":"Dune"}]"#);
        assert_eq!(
            storage.read("books").as_deref(),
            Some(r#"[{"title":"Dune"}]"#)
        );
    }

    #[test]
    fn test_write_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp_dir.path()).unwrap();

        storage.write("readers", "[]");
        storage.write("readers", r#"[{"firstName":"Ada"}]"#);
        assert_eq!(
            storage.read("readers").as_deref(),
            Some(r#"[{"firstName":"Ada"}]"#)
        );
    }

    #[test]
    fn test_slots_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp_dir.path()).unwrap();

        storage.write("books", "[1]");
        storage.write("readers", "[2]");
        assert_eq!(storage.read("books").as_deref(), Some("[1]"));
        assert_eq!(storage.read("readers").as_deref(), Some("[2]"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp_dir.path()).unwrap();

        storage.write("books", "[]");
        assert!(storage.slot_path("books").exists());
        assert!(!temp_dir.path().join("books.tmp").exists());
    }
}
