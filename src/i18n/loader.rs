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

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use crate::bootstrap_core::errors::BootstrapError;
use crate::bootstrap_core::traits::ResourceLoader;

/// Reads translation resources from `{root}/{locale}/{namespace}.json`.
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resource_path(&self, locale: &str, namespace: &str) -> Result<PathBuf, BootstrapError> {
        // Locale and namespace end up in a filesystem path
        let valid = |s: &str| {
            !s.is_empty()
                && s
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };
        if !valid(locale) || !valid(namespace) {
            return Err(BootstrapError::Localization(format!(
                "invalid resource key {}/{}",
                locale, namespace
            )));
        }
        Ok(self.root.join(locale).join(format!("{}.json", namespace)))
    }
}

#[async_trait]
impl ResourceLoader for DirectoryLoader {
    async fn load(&self, locale: &str, namespace: &str) -> Result<Value, BootstrapError> {
        let path = self.resource_path(locale, namespace)?;
        debug!(path = %path.display(), "Loading i18n resource");

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            BootstrapError::Localization(format!("cannot read {}: {}", path.display(), e))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            BootstrapError::Localization(format!("invalid JSON in {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_namespace_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("fr")).unwrap();
        std::fs::write(
            dir.path().join("fr").join("resource.json"),
            r#"{"Restore Defaults":"Restaurer les paramètres par défaut"}"#,
        )
        .unwrap();

        let loader = DirectoryLoader::new(dir.path());
        let value = loader.load("fr", "resource").await.unwrap();
        assert_eq!(
            value["Restore Defaults"],
            "Restaurer les paramètres par défaut"
        );
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let loader = DirectoryLoader::new("/tmp");
        let err = loader.load("../etc", "passwd").await.unwrap_err();
        assert!(matches!(err, BootstrapError::Localization(_)));
    }

    #[tokio::test]
    async fn missing_file_is_localization_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirectoryLoader::new(dir.path());
        assert!(loader.load("de", "resource").await.is_err());
    }
}
