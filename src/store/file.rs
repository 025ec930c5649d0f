// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JSON file backed session store.
//!
//! Persisting writes a sibling temp file and renames it over the target while
//! holding an exclusive lock on `<file>.lock`, so readers see either the old
//! or the new document.

use fs2::FileExt;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

use crate::bootstrap_core::errors::StoreError;
use crate::bootstrap_core::models::WorkspaceConfig;
use crate::bootstrap_core::traits::SessionStore;
use crate::store::{interpret, path, render};

pub struct JsonFileStore {
    path: PathBuf,
    version: String,
    state: RwLock<Value>,
    raw: RwLock<String>,
    corrupted: AtomicBool,
}

impl JsonFileStore {
    /// A missing file is an empty store, not an error.
    pub fn open(path: impl Into<PathBuf>, version: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let version = version.into();

        // Undecodable bytes are a corruption case, not an I/O failure
        let raw = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No persisted configuration, using defaults");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        let loaded = interpret(&raw, &version);
        info!(
            path = %path.display(),
            corrupted = loaded.corrupted,
            "Workspace configuration loaded"
        );

        Ok(Self {
            path,
            version,
            state: RwLock::new(loaded.config.state),
            raw: RwLock::new(raw),
            corrupted: AtomicBool::new(loaded.corrupted),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, text: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.sibling(".lock"))?;
        lock.lock_exclusive()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let tmp = self.sibling(".tmp");
        let result = (|| -> Result<(), StoreError> {
            let mut file = File::create(&tmp)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        })();

        let _ = FileExt::unlock(&lock);
        result
    }
}

impl SessionStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        path::get(&state, key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        path::set(&mut state, key, value);
    }

    fn raw_config(&self) -> String {
        self.raw
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_corrupted(&self) -> bool {
        self.corrupted.load(Ordering::Acquire)
    }

    fn replace_state(&self, state: Value) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn persist(&self) -> Result<(), StoreError> {
        let config = WorkspaceConfig {
            version: self.version.clone(),
            state: self
                .state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        };
        let text = render(&config)?;
        self.write_atomically(&text)?;

        *self.raw.write().unwrap_or_else(PoisonError::into_inner) = text;
        self.corrupted.store(false, Ordering::Release);
        debug!(path = %self.path.display(), "Workspace configuration persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_opens_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("cnc.json"), "1.0.0").unwrap();
        assert!(!store.is_corrupted());
        assert_eq!(store.raw_config(), "");
        assert!(store.session_token().is_empty());
    }

    #[test]
    fn corrupted_file_keeps_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cnc.json");
        fs::write(&path, "{\"version\": \"1.0.0\", \"state\": ").unwrap();

        let store = JsonFileStore::open(&path, "1.0.0").unwrap();
        assert!(store.is_corrupted());
        assert_eq!(store.raw_config(), "{\"version\": \"1.0.0\", \"state\": ");
    }

    #[test]
    fn invalid_utf8_file_is_corrupted_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cnc.json");
        fs::write(&path, b"{\"state\":\xff\xfe").unwrap();

        let store = JsonFileStore::open(&path, "1.0.0").unwrap();
        assert!(store.is_corrupted());
        assert_eq!(store.raw_config(), "{\"state\":\u{FFFD}\u{FFFD}");
        assert!(store.session_token().is_empty());
    }

    #[test]
    fn persist_writes_document_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cnc.json");

        let store = JsonFileStore::open(&path, "1.0.0").unwrap();
        store.set("session.token", json!("abc"));
        store.persist().unwrap();

        assert!(!store.sibling(".tmp").exists());
        let reopened = JsonFileStore::open(&path, "1.0.0").unwrap();
        assert!(!reopened.is_corrupted());
        assert_eq!(reopened.session_token().as_str(), "abc");
        assert_eq!(reopened.raw_config(), store.raw_config());
    }
}
