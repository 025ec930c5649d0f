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

//! Session store implementations.
//!
//! Both stores keep the persisted form `{ "version": ..., "state": {...} }`
//! and derive the "corrupted" flag once, when the raw text is loaded.

pub mod file;
pub mod memory;
pub mod path;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::bootstrap_core::errors::StoreError;
use crate::bootstrap_core::models::WorkspaceConfig;

/// Outcome of interpreting persisted text.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub config: WorkspaceConfig,
    pub corrupted: bool,
}

/// Empty text means "nothing persisted yet" and yields defaults; text that is
/// not a `{ version, state: {..} }` document is corrupted and also yields
/// defaults in memory. The raw text itself is kept by the caller for export.
pub fn interpret(raw: &str, version: &str) -> Loaded {
    if raw.trim().is_empty() {
        return Loaded {
            config: WorkspaceConfig::defaults(version),
            corrupted: false,
        };
    }

    match serde_json::from_str::<WorkspaceConfig>(raw) {
        Ok(config) if config.state.is_object() => Loaded {
            config,
            corrupted: false,
        },
        Ok(_) | Err(_) => {
            tracing::error!("Persisted workspace configuration is corrupted or invalid");
            Loaded {
                config: WorkspaceConfig::defaults(version),
                corrupted: true,
            }
        }
    }
}

pub(crate) fn render(config: &WorkspaceConfig) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(config)?)
}
