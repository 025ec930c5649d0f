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

use std::env;
use std::sync::Arc;

use crate::bootstrap_core::constants::{config as env_keys, query};
use crate::bootstrap_core::traits::LocaleDetector;
use crate::utils::query::QueryParams;

/// `?lang=` override.
pub struct QueryDetector {
    params: QueryParams,
}

impl QueryDetector {
    pub fn new(params: QueryParams) -> Self {
        Self { params }
    }
}

impl LocaleDetector for QueryDetector {
    fn detect(&self) -> Vec<String> {
        self.params
            .get(query::LANG)
            .filter(|v| !v.is_empty())
            .map(|v| vec![v.to_string()])
            .unwrap_or_default()
    }
}

/// POSIX locale variables (`LC_ALL`, then `LANG`), e.g. `fr_FR.UTF-8` -> `fr-fr`.
pub struct EnvDetector;

impl LocaleDetector for EnvDetector {
    fn detect(&self) -> Vec<String> {
        ["LC_ALL", env_keys::ENV_LANG]
            .iter()
            .filter_map(|k| env::var(k).ok())
            .filter_map(|v| posix_to_tag(&v))
            .collect()
    }
}

/// Fixed candidate list, the equivalent of a browser's `navigator.languages`.
pub struct StaticDetector(pub Vec<String>);

impl LocaleDetector for StaticDetector {
    fn detect(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Runs detectors in order and concatenates their candidates.
#[derive(Default)]
pub struct DetectorChain {
    detectors: Vec<Arc<dyn LocaleDetector>>,
}

impl DetectorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, detector: impl LocaleDetector + 'static) -> Self {
        self.detectors.push(Arc::new(detector));
        self
    }
}

impl LocaleDetector for DetectorChain {
    fn detect(&self) -> Vec<String> {
        self.detectors.iter().flat_map(|d| d.detect()).collect()
    }
}

fn posix_to_tag(value: &str) -> Option<String> {
    let base = value.split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-").to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_locale_conversion() {
        assert_eq!(posix_to_tag("fr_FR.UTF-8").as_deref(), Some("fr-fr"));
        assert_eq!(posix_to_tag("de_DE@euro").as_deref(), Some("de-de"));
        assert_eq!(posix_to_tag("C.UTF-8"), None);
        assert_eq!(posix_to_tag("POSIX"), None);
        assert_eq!(posix_to_tag(""), None);
    }

    #[test]
    fn chain_preserves_order() {
        let chain = DetectorChain::new()
            .with(QueryDetector::new(QueryParams::parse("?lang=ja")))
            .with(StaticDetector(vec!["de".to_string()]));
        assert_eq!(chain.detect(), vec!["ja".to_string(), "de".to_string()]);
    }

    #[test]
    fn empty_query_lang_is_ignored() {
        let detector = QueryDetector::new(QueryParams::parse("?lang="));
        assert!(detector.detect().is_empty());
    }
}
