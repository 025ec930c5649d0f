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

use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::bootstrap_core::errors::StoreError;
use crate::bootstrap_core::models::WorkspaceConfig;
use crate::bootstrap_core::traits::SessionStore;
use crate::store::{interpret, path, render};

/// Store whose "storage" is a string held in memory.
pub struct MemoryStore {
    version: String,
    state: RwLock<Value>,
    raw: RwLock<String>,
    corrupted: AtomicBool,
    persists: AtomicUsize,
}

impl MemoryStore {
    /// Starts from already-valid state.
    pub fn new(state: Value) -> Self {
        let version = env!("CARGO_PKG_VERSION").to_string();
        let config = WorkspaceConfig {
            version: version.clone(),
            state,
        };
        let raw = render(&config).unwrap_or_default();
        Self {
            version,
            state: RwLock::new(config.state),
            raw: RwLock::new(raw),
            corrupted: AtomicBool::new(false),
            persists: AtomicUsize::new(0),
        }
    }

    /// Starts from persisted text, deriving the corruption flag like a real load.
    pub fn from_raw(raw: impl Into<String>, version: impl Into<String>) -> Self {
        let raw = raw.into();
        let version = version.into();
        let loaded = interpret(&raw, &version);
        Self {
            version,
            state: RwLock::new(loaded.config.state),
            raw: RwLock::new(raw),
            corrupted: AtomicBool::new(loaded.corrupted),
            persists: AtomicUsize::new(0),
        }
    }

    pub fn with_token(token: &str) -> Self {
        let mut state = WorkspaceConfig::default_state();
        path::set(&mut state, "session.token", Value::String(token.to_string()));
        Self::new(state)
    }

    /// Number of successful `persist` calls.
    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> Value {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemoryStore {
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
            state: self.snapshot(),
        };
        let text = render(&config)?;
        *self.raw.write().unwrap_or_else(PoisonError::into_inner) = text;
        self.corrupted.store(false, Ordering::Release);
        self.persists.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}
