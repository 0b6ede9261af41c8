//! JSON-file implementation of [`PreferenceStore`].
//!
//! All preferences live in one flat JSON object, e.g.
//! `{"app-theme": "dark"}`. Every `set` writes a sibling temp file and
//! renames it over the target, so a crash never leaves a half-written file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use tracing::{debug, warn};

use milan_core::storage::preference::PreferenceStore;
use milan_types::error::StorageError;

use crate::filesystem::preferences_path;

/// File-backed preference store.
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `{data_dir}/preferences.json`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(preferences_path(data_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "preferences.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StorageError::Serialization(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::Io(format!("{}: {e}", self.path.display()))),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        // A corrupt file is replaced rather than blocking every later write
        let mut values = match self.read_all().await {
            Ok(values) => values,
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, "Discarding unreadable preferences file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(format!("{}: {e}", parent.display())))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {e}", self.path.display())))?;

        debug!(key, path = %self.path.display(), "Preference saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FilePreferenceStore::in_data_dir(dir.path());
        assert_eq!(store.get("app-theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_across_instances() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("nested");

        FilePreferenceStore::in_data_dir(&data_dir)
            .set("app-theme", "dark")
            .await
            .unwrap();

        let reopened = FilePreferenceStore::in_data_dir(&data_dir);
        assert_eq!(reopened.get("app-theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_set_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let store = FilePreferenceStore::in_data_dir(dir.path());
        store.set("a", "1").await.unwrap();
        store.set("app-theme", "light").await.unwrap();
        store.set("app-theme", "dark").await.unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("app-theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let store = FilePreferenceStore::in_data_dir(dir.path());
        tokio::fs::write(store.path(), "not json").await.unwrap();

        let err = store.get("app-theme").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_set_replaces_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = FilePreferenceStore::in_data_dir(dir.path());
        tokio::fs::write(store.path(), r#"{"app-theme": "da"#).await.unwrap();

        store.set("app-theme", "dark").await.unwrap();
        store.set("app-theme", "light").await.unwrap();

        assert_eq!(store.get("app-theme").await.unwrap().as_deref(), Some("light"));
        assert!(!store.temp_path().exists());
    }
}
