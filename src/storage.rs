//! Persistence of the active locale.
//!
//! The store only ever writes one pair, [`LANG_KEY`] -> locale code, but the
//! backends behave like a small string key-value store so they can be shared
//! with other settings.

use std::collections::HashMap;
use std::fs;
use std::path::{ Path, PathBuf };

use bevy::log::{ debug, warn };
use serde_json::{ Map, Value };

use crate::error::I18nError;

/// Storage key under which the active locale code is persisted.
pub const LANG_KEY: &str = "lang";

/// String key-value storage surviving restarts.
pub trait LocaleStorage: Send + Sync + 'static {
    /// Returns the stored value, or `None` when absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    fn store(&mut self, key: &str, value: &str) -> Result<(), I18nError>;
}

/// In-process storage, lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a persisted locale.
    pub fn with_locale(code: &str) -> Self {
        let mut storage = Self::new();
        storage.values.insert(LANG_KEY.to_string(), code.to_string());
        storage
    }
}

impl LocaleStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), I18nError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object file on disk, e.g. `{ "lang": "de" }`.
///
/// A missing, unreadable or corrupt file reads as empty; the next write
/// replaces it.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No readable settings at '{}': {}", self.path.display(), e);
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("Settings file '{}' is not a JSON object, ignoring it", self.path.display());
                Map::new()
            }
            Err(e) => {
                warn!("Failed to parse settings file '{}': {}", self.path.display(), e);
                Map::new()
            }
        }
    }
}

impl LocaleStorage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.read_all()
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), I18nError> {
        let mut values = self.read_all();
        values.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(values))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_storage_round_trips_values() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load(LANG_KEY), None);
        storage.store(LANG_KEY, "de").unwrap();
        assert_eq!(storage.load(LANG_KEY).as_deref(), Some("de"));
        assert_eq!(MemoryStorage::with_locale("en").load(LANG_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.path(), path.as_path());
        assert_eq!(storage.load(LANG_KEY), None);
        storage.store(LANG_KEY, "de").unwrap();
        assert!(path.is_file());

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.load(LANG_KEY).as_deref(), Some("de"));
    }

    #[test]
    fn file_storage_keeps_unrelated_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let mut storage = FileStorage::new(&path);
        storage.store(LANG_KEY, "en").unwrap();

        assert_eq!(storage.load("theme").as_deref(), Some("dark"));
        assert_eq!(storage.load(LANG_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.load(LANG_KEY), None);
        storage.store(LANG_KEY, "de").unwrap();
        assert_eq!(storage.load(LANG_KEY).as_deref(), Some("de"));
    }
}
