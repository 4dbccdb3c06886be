//! JSON-file persistence for the CLI session.
//!
//! The file holds a flat string map under the same keys the browser keeps in
//! `localStorage` (`token`, `userInfo`), so `labkit` hydrates it unchanged.
//! A missing or unreadable file reads as empty; the session store then
//! discards whatever half-state it finds.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use labkit::{KeyValueStore, StorageError};

const SESSION_DIR: &str = ".labdesk";
const SESSION_FILE: &str = "session.json";

/// `$HOME/.labdesk/session.json`, or a dotfile in the working directory
/// when no home directory is known.
#[must_use]
pub fn default_session_path(home: Option<PathBuf>) -> PathBuf {
    match home {
        Some(home) => home.join(SESSION_DIR).join(SESSION_FILE),
        None => PathBuf::from(format!("{SESSION_DIR}-{SESSION_FILE}")),
    }
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "session file is not a string map; ignoring");
            BTreeMap::new()
        })
    }

    fn write_entries(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let write_error = |reason: String| StorageError::Write { key: key.to_owned(), reason };

        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(write_error(e.to_string())),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(|e| write_error(e.to_string()))?;
        fs::write(&self.path, rendered).map_err(|e| write_error(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries();
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(key, &entries)
    }

    fn remove(&self, key: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries();
        if entries.remove(key).is_none() {
            return;
        }
        if let Err(e) = self.write_entries(key, &entries) {
            tracing::warn!(key, error = %e, "could not remove session key");
        }
    }
}
