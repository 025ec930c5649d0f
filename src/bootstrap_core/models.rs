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

//! Domain models for the bootstrap core.
//!
//! Pure data structures: inbound cross-origin messages, the validated action
//! envelope, routes, the persisted workspace configuration and the recovery
//! artifacts. Free of I/O side effects.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::bootstrap_core::constants::routes;

/// A message delivered from another browsing context, as seen by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Sender origin. Only checked when an allow-list is configured.
    #[serde(default)]
    pub origin: String,
    /// Structured payload, untrusted and of arbitrary shape
    #[serde(default)]
    pub data: Value,
}

impl MessageEvent {
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

/// `{ token, action?: { type, payload } }` extracted from `MessageEvent::data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundMessage {
    pub token: String,
    pub action: Option<InboundAction>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundAction {
    /// `None` when `type` is absent or not a string
    pub kind: Option<String>,
    pub payload: Value,
}

impl InboundMessage {
    /// Tolerant projection: absent or mistyped fields become empty instead of erroring.
    pub fn from_value(data: &Value) -> Self {
        let token = data
            .get("token")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let action = data.get("action").filter(|a| !a.is_null()).map(|a| InboundAction {
            kind: a.get("type").and_then(Value::as_str).map(str::to_string),
            payload: a.get("payload").cloned().unwrap_or(Value::Null),
        });

        Self { token, action }
    }

    pub fn action_kind(&self) -> Option<&str> {
        self.action.as_ref().and_then(|a| a.kind.as_deref())
    }
}

/// Validated projection of an `InboundMessage`, forwarded onto the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
}

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Public sign-in view
    Login,
    /// Application root; requires an authenticated session
    Protected,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => routes::LOGIN,
            Route::Protected => routes::ROOT,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Protected)
    }

    /// `/login` and anything beneath it is public; every other path is protected.
    pub fn for_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        if path == routes::LOGIN || path.starts_with("/login/") {
            Route::Login
        } else {
            Route::Protected
        }
    }
}

/// Persisted application settings blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub version: String,
    pub state: Value,
}

impl WorkspaceConfig {
    /// Fixed state written by "Restore Defaults".
    pub fn default_state() -> Value {
        json!({
            "session": {
                "name": "",
                "token": "",
                "enabled": false
            },
            "workspace": {
                "container": {
                    "default": { "widgets": ["visualizer"] },
                    "primary": { "show": true, "widgets": ["connection", "console", "position"] },
                    "secondary": { "show": true, "widgets": ["axes", "gcode", "macro"] }
                }
            },
            "widgets": {}
        })
    }

    pub fn defaults(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            state: Self::default_state(),
        }
    }
}

/// Result of a sign-in attempt with the persisted token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignIn {
    pub authenticated: bool,
    pub name: Option<String>,
}

impl SignIn {
    pub fn rejected() -> Self {
        Self::default()
    }
}

/// Downloadable snapshot of the raw persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub filename: String,
    pub mime: &'static str,
    /// `data:` URL with the percent-encoded body
    pub href: String,
    /// Raw configuration text, unmodified
    pub body: String,
}

/// What the recovery dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryNotice {
    pub title: String,
    pub message: String,
    pub download_label: String,
    pub restore_label: String,
    pub filename: String,
}

/// The two user-facing choices of the recovery dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryChoice {
    Export,
    RestoreDefaults,
}
