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

//! Collaborator Traits.
//!
//! Everything the bootstrap core talks to but does not own: the session store,
//! the i18n backend, the sign-in endpoint, the device controller and the page.
//! Hosts inject implementations; tests inject recorders.

use async_trait::async_trait;
use serde_json::Value;

use crate::bootstrap_core::constants::store as keys;
use crate::bootstrap_core::errors::{BootstrapError, StoreError};
use crate::bootstrap_core::models::{DownloadArtifact, RecoveryChoice, RecoveryNotice, SignIn};
use crate::bootstrap_core::types::SessionToken;
use crate::config::LogLevel;
use crate::engine::render::RouteTable;
use crate::i18n::bundles::BundleLookup;

/// Persisted key-value state with a synchronous get/set surface.
///
/// Keys are dotted paths into the state object (`"session.token"`).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value);

    /// Raw persisted configuration text, exactly as found in storage.
    fn raw_config(&self) -> String;

    /// Computed by the store when it loaded; cleared by a successful persist.
    fn is_corrupted(&self) -> bool;

    /// Replace the whole in-memory state.
    fn replace_state(&self, state: Value);

    /// Write the in-memory state to storage.
    fn persist(&self) -> Result<(), StoreError>;

    fn session_token(&self) -> SessionToken {
        self.get(keys::SESSION_TOKEN)
            .and_then(|v| v.as_str().map(SessionToken::new))
            .unwrap_or_default()
    }
}

/// Receives the resolved log level.
pub trait LogLevelSink: Send + Sync {
    fn set_level(&self, level: LogLevel);
}

/// One locale-detection strategy (query string, environment, navigator...).
pub trait LocaleDetector: Send + Sync {
    /// Candidate locales in preference order.
    fn detect(&self) -> Vec<String>;
}

/// i18n backend resource loader.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn load(&self, locale: &str, namespace: &str) -> Result<Value, BootstrapError>;
}

/// Locale-keyed formatting bundles.
#[async_trait]
pub trait BundleSource: Send + Sync {
    async fn load(&self, locale: &str) -> BundleLookup;
}

/// Sign-in endpoint.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// `Err` only for transport failures; a rejected token is `Ok` with
    /// `authenticated == false`.
    async fn sign_in(&self, token: &SessionToken) -> Result<SignIn, BootstrapError>;
}

/// Persistent device-controller connection.
#[async_trait]
pub trait DeviceController: Send + Sync {
    /// Resolves once the connection is ready.
    async fn connect(&self, token: &SessionToken) -> Result<(), BootstrapError>;
}

/// Authentication predicate consulted by protected routes.
pub trait AuthGuard: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// The document the view tree is mounted into.
pub trait PageHost: Send + Sync {
    fn mount(&self, routes: &RouteTable) -> Result<(), BootstrapError>;

    /// Returns whether the element existed.
    fn remove_element(&self, id: &str) -> bool;

    fn set_background_color(&self, color: &str);

    /// Stop dropped files from navigating the page away.
    fn suppress_file_drop(&self);
}

/// Modal shown while the workspace configuration is corrupted.
#[async_trait]
pub trait RecoveryPrompt: Send + Sync {
    /// Waits for the next user choice. May never resolve.
    async fn choose(&self, notice: &RecoveryNotice) -> RecoveryChoice;

    /// Hands an export artifact to the user.
    async fn deliver(&self, artifact: DownloadArtifact);
}
