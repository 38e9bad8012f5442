//! Key-value state stores.

use crate::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use warden_common_log::spans::store_span;

/// String values by key.
pub trait StateStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-process store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON object file.
///
/// A missing file reads as empty. Writes go to a sibling temp file that is
/// then renamed over the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `data_dir/state_file`.
    pub fn in_dir(data_dir: impl AsRef<Path>, state_file: &str) -> Self {
        Self::new(data_dir.as_ref().join(state_file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StoreResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::serialization(format!(
                "state file {} is not a JSON object of strings: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> StoreResult<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_path = self.path.clone();
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state".to_string());
        temp_path.set_file_name(format!(".{name}.tmp"));

        let contents = serde_json::to_vec_pretty(values)?;
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&contents)?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::from(e)
        })?;
        debug!(path = %self.path.display(), keys = values.len(), "state file written");
        Ok(())
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _span = store_span("get", key).entered();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let _span = store_span("set", key).entered();
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let _span = store_span("remove", key).entered();
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::{temp_dir, temp_file};

    #[test]
    fn memory_store_basics() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = temp_dir();
        let store = FileStore::in_dir(dir.path().join("nested"), "state.json");
        assert!(store.get("activeRole").unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = temp_dir();
        let mut store = FileStore::in_dir(dir.path().join(".warden"), "state.json");
        store.set("authToken", "mock-jwt-token").unwrap();
        store.set("activeRole", "{}").unwrap();

        let reopened = FileStore::new(store.path());
        assert_eq!(
            reopened.get("authToken").unwrap().as_deref(),
            Some("mock-jwt-token")
        );

        store.remove("activeRole").unwrap();
        assert!(reopened.get("activeRole").unwrap().is_none());
        assert!(reopened.get("authToken").unwrap().is_some());
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let (_dir, path) = temp_file("[1, 2, 3]");
        let store = FileStore::new(&path);
        let err = store.get("activeRole").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn file_store_empty_file_reads_as_empty() {
        let (_dir, path) = temp_file("  \n");
        assert!(FileStore::new(&path).get("activeRole").unwrap().is_none());
    }

    #[test]
    fn file_store_reports_io_errors() {
        let dir = temp_dir();
        // A directory where the state file should be.
        let store = FileStore::new(dir.path());
        assert!(matches!(store.get("k").unwrap_err(), StoreError::Io(_)));
    }
}
