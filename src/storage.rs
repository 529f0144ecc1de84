//! Durable key-value storage for the last query
//!
//! A small JSON object file. Reads happen once at startup and writes after
//! every accepted query change; both are best-effort.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key holding the last-used query
pub const QUERY_KEY: &str = "search";

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("storage file {path} is corrupted: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Default location: `<data dir>/weather-widget/storage.json`
pub fn default_path() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("weather-widget").join("storage.json")
}

#[derive(Clone, Debug)]
pub struct QueryStore {
    path: PathBuf,
}

impl QueryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved query, or empty when nothing was saved or the file is unreadable
    pub fn load_query(&self) -> String {
        match self.get(QUERY_KEY) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not restore saved query");
                String::new()
            }
        }
    }

    pub fn save_query(&self, query: &str) -> Result<(), StorageError> {
        self.set(QUERY_KEY, query)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupted file is replaced rather than blocking new writes
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|source| self.json_error(source))?;
        std::fs::write(&self.path, json).map_err(|source| self.io_error(source))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_str(&json).map_err(|source| self.json_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StorageError {
        StorageError::Json {
            path: self.path.clone(),
            source,
        }
    }
}
