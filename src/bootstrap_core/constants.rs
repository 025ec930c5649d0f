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

//! Bootstrap constants - single source of truth for channel names, keys,
//! defaults and limits shared by the pipeline, the gate and the host.

/// Internal bus channels
pub mod channels {
    /// Authorized cross-origin "connect" requests
    pub const MESSAGE_CONNECT: &str = "message:connect";
    /// Buffered events per channel before slow subscribers start lagging
    pub const CAPACITY: usize = 64;
}

/// Cross-origin message contract
pub mod actions {
    /// The only recognized action type
    pub const CONNECT: &str = "connect";
}

/// Keys in the persisted session store (dotted paths)
pub mod store {
    pub const SESSION_TOKEN: &str = "session.token";
}

/// Query string parameters read during startup
pub mod query {
    pub const LOG_LEVEL: &str = "log_level";
    pub const LANG: &str = "lang";
}

/// Localization defaults
pub mod locale {
    /// Locale whose formatting rules are compiled in; no bundle is loaded for it
    pub const BASELINE: &str = "en";
    /// Default resource namespace
    pub const DEFAULT_NAMESPACE: &str = "resource";
}

/// Recovery export artifact
pub mod download {
    pub const MIME: &str = "text/plain;charset=utf-8";
    pub const DATA_URL_PREFIX: &str = "data:text/plain;charset=utf-8,";
    pub const EXTENSION: &str = "json";
}

/// Page effects applied on first render
pub mod page {
    pub const LOADING_ELEMENT_ID: &str = "loading";
    /// Sidebar background color
    pub const BACKGROUND_COLOR: &str = "#222";
}

/// Route paths
pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const ROOT: &str = "/";
}

/// Configuration environment variables
pub mod config {
    pub const ENV_APP_NAME: &str = "CONSOLE_APP_NAME";
    pub const ENV_APP_VERSION: &str = "CONSOLE_APP_VERSION";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_SUPPORTED_LOCALES: &str = "CONSOLE_SUPPORTED_LOCALES";
    pub const ENV_FALLBACK_LOCALE: &str = "CONSOLE_FALLBACK_LOCALE";
    pub const ENV_ALLOWED_ORIGINS: &str = "CONSOLE_ALLOWED_ORIGINS";
    /// Checked by `EnvDetector` when no query override is present
    pub const ENV_LANG: &str = "LANG";
}

/// Token handling
pub mod crypto {
    /// HMAC-SHA256 key length in bytes
    pub const SECRET_KEY_LENGTH: usize = 32;
    /// Hex characters of the token digest shown in logs
    pub const FINGERPRINT_LENGTH: usize = 12;
}

/// Transport limits (DoS protection)
pub mod limits {
    /// Maximum size of one inbound message frame (10 MB)
    pub const MAX_MESSAGE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
}
