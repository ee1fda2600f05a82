//! Persistence of object graphs for autosave.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::value::Value;

/// Opaque load/save of an object graph to a path.
pub trait Storage {
    /// Load the stored object, or `None` if nothing has been stored yet.
    fn load(&mut self, path: &Path) -> Result<Option<Value>, StorageError>;

    fn save(&mut self, value: &Value, path: &Path) -> Result<(), StorageError>;
}

/// Pretty-printed JSON files, written atomically (temp file + rename).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStorage;

impl JsonFileStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for JsonFileStorage {
    fn load(&mut self, path: &Path) -> Result<Option<Value>, StorageError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io {
                    operation: "read",
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let value = serde_json::from_slice(&bytes).map_err(|e| StorageError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Loaded state from {}", path.display());
        Ok(Some(value))
    }

    fn save(&mut self, value: &Value, path: &Path) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| StorageError::Serialization { source: e })?;

        let temp_path = temp_path_for(path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|e| StorageError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(&bytes).map_err(|e| StorageError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;

        file.sync_all().map_err(|e| StorageError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Saved state to {}", path.display());
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-process storage, mainly for tests and headless sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<PathBuf, Value>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored object without counting it as a save.
    pub fn insert(&mut self, path: impl Into<PathBuf>, value: Value) {
        self.entries.insert(path.into(), value);
    }

    pub fn get(&self, path: &Path) -> Option<&Value> {
        self.entries.get(path)
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Storage for MemoryStorage {
    fn load(&mut self, path: &Path) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(path).cloned())
    }

    fn save(&mut self, value: &Value, path: &Path) -> Result<(), StorageError> {
        self.saves += 1;
        self.entries.insert(path.to_path_buf(), value.clone());
        Ok(())
    }
}
