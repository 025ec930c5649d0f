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

use crate::bootstrap_core::constants::{config as env_keys, locale};
use crate::bootstrap_core::errors::BootstrapError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Exact, case-sensitive names only; anything else is unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse_safe(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nSettings {
    /// Lower-case locale codes the console ships translations for
    pub supported_locales: Vec<String>,
    pub fallback_locale: String,
    pub namespaces: Vec<String>,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            supported_locales: [
                "en", "cs", "de", "es", "fr", "hu", "it", "ja", "nl", "pt-br", "ru", "tr",
                "zh-cn", "zh-tw",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            fallback_locale: locale::BASELINE.to_string(),
            namespaces: vec![locale::DEFAULT_NAMESPACE.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    /// `None` accepts messages from any origin.
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub name: String,
    pub version: String,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    pub i18n: I18nSettings,
    pub gate: GateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            i18n: I18nSettings::default(),
            gate: GateSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, BootstrapError> {
        let mut settings = Self::default();
        settings.apply_env();
        Ok(settings)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, BootstrapError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BootstrapError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, BootstrapError> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| BootstrapError::Configuration(format!("invalid settings: {}", e)))
    }

    /// YAML file (if any) as the base layer, environment variables on top.
    pub fn load(path: Option<&Path>) -> Result<Self, BootstrapError> {
        let Some(path) = path else {
            return Self::from_env();
        };
        let mut settings = Self::from_yaml_file(path)?;
        settings.apply_env();
        Ok(settings)
    }

    fn apply_env(&mut self) {
        if let Ok(name) = env::var(env_keys::ENV_APP_NAME) {
            self.name = name;
        }
        if let Ok(version) = env::var(env_keys::ENV_APP_VERSION) {
            self.version = version;
        }
        if let Some(level) = env::var(env_keys::ENV_LOG_LEVEL)
            .ok()
            .and_then(|v| LogLevel::parse(&v.to_lowercase()))
        {
            self.log_level = level;
        }
        if let Ok(format) = env::var(env_keys::ENV_LOG_FORMAT) {
            self.log_format = LogFormat::parse_safe(&format);
        }
        if let Ok(locales) = env::var(env_keys::ENV_SUPPORTED_LOCALES) {
            self.i18n.supported_locales = split_list(&locales)
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect();
        }
        if let Ok(fallback) = env::var(env_keys::ENV_FALLBACK_LOCALE) {
            self.i18n.fallback_locale = fallback.to_lowercase();
        }
        if let Ok(origins) = env::var(env_keys::ENV_ALLOWED_ORIGINS) {
            self.gate.allowed_origins = Some(split_list(&origins));
        }
    }

    /// Suggested file name of the recovery export.
    pub fn export_filename(&self) -> String {
        format!(
            "{}-{}.{}",
            self.name,
            self.version,
            crate::bootstrap_core::constants::download::EXTENSION
        )
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
