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

//! Localization subsystem.
//!
//! Locale detection, resource loading into a `Catalog`, and the static
//! registry of formatting bundles.

pub mod bundles;
pub mod detector;
pub mod loader;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::bootstrap_core::errors::BootstrapError;
use crate::bootstrap_core::traits::{LocaleDetector, ResourceLoader};
use crate::config::I18nSettings;

/// Loaded translations for the active locale. Keys are the source strings.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    namespaces: HashMap<String, Value>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            namespaces: HashMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn insert(&mut self, namespace: impl Into<String>, resources: Value) {
        self.namespaces.insert(namespace.into(), resources);
    }

    /// Translation of `key`, or `key` itself when no namespace has it.
    pub fn translate(&self, key: &str) -> String {
        self.namespaces
            .values()
            .find_map(|ns| ns.get(key).and_then(Value::as_str))
            .unwrap_or(key)
            .to_string()
    }
}

/// Detector + loader + supported-locale list.
pub struct Localizer {
    detector: Arc<dyn LocaleDetector>,
    loader: Arc<dyn ResourceLoader>,
    settings: I18nSettings,
}

impl Localizer {
    pub fn new(
        detector: Arc<dyn LocaleDetector>,
        loader: Arc<dyn ResourceLoader>,
        settings: I18nSettings,
    ) -> Self {
        Self {
            detector,
            loader,
            settings,
        }
    }

    /// First detected candidate that is supported (exactly, or by its language
    /// part), else the fallback locale.
    pub fn resolve(&self) -> String {
        resolve_locale(&self.detector.detect(), &self.settings)
    }

    /// Loads every configured namespace for `locale`. Stops at the first failure.
    pub async fn load_catalog(&self, locale: &str) -> Result<Catalog, BootstrapError> {
        let mut catalog = Catalog::new(locale);
        for ns in &self.settings.namespaces {
            let resources = self.loader.load(locale, ns).await?;
            debug!(locale = %locale, namespace = %ns, "i18n namespace loaded");
            catalog.insert(ns.clone(), resources);
        }
        Ok(catalog)
    }
}

pub fn resolve_locale(candidates: &[String], settings: &I18nSettings) -> String {
    let supported = |code: &str| settings.supported_locales.iter().any(|s| s == code);

    for candidate in candidates {
        let code = candidate.trim().replace('_', "-").to_lowercase();
        if code.is_empty() {
            continue;
        }
        if supported(&code) {
            return code;
        }
        if let Some(lang) = code.split('-').next() {
            if supported(lang) {
                return lang.to_string();
            }
        }
    }
    settings.fallback_locale.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidates(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_exact_then_language_then_fallback() {
        let settings = I18nSettings::default();
        assert_eq!(resolve_locale(&candidates(&["zh_CN"]), &settings), "zh-cn");
        assert_eq!(resolve_locale(&candidates(&["fr-CA"]), &settings), "fr");
        assert_eq!(resolve_locale(&candidates(&["xx", "de"]), &settings), "de");
        assert_eq!(resolve_locale(&candidates(&["xx"]), &settings), "en");
        assert_eq!(resolve_locale(&[], &settings), "en");
    }

    #[test]
    fn catalog_falls_back_to_key() {
        let mut catalog = Catalog::new("de");
        assert_eq!(catalog.locale(), "de");
        catalog.insert("resource", json!({ "Restore Defaults": "Standard wiederherstellen" }));
        assert_eq!(catalog.translate("Restore Defaults"), "Standard wiederherstellen");
        assert_eq!(catalog.translate("Unknown"), "Unknown");
    }
}
