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

//! Locale formatting bundles.
//!
//! Date/number formatting rules are resolved through a static manifest keyed
//! by locale code instead of loading code at runtime. The baseline locale is
//! compiled in and never looked up here.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::bootstrap_core::traits::BundleSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatBundle {
    pub locale: &'static str,
    /// Long date format in moment-style tokens
    pub long_date_format: &'static str,
    /// 0 = Sunday, 1 = Monday
    pub week_start: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleLookup {
    Loaded(FormatBundle),
    NotFound,
}

pub struct BundleRegistry {
    entries: HashMap<&'static str, FormatBundle>,
}

const BUILTIN: &[FormatBundle] = &[
    FormatBundle {
        locale: "cs",
        long_date_format: "D. MMMM YYYY",
        week_start: 1,
    },
    FormatBundle {
        locale: "de",
        long_date_format: "D. MMMM YYYY",
        week_start: 1,
    },
    FormatBundle {
        locale: "es",
        long_date_format: "D [de] MMMM [de] YYYY",
        week_start: 1,
    },
    FormatBundle {
        locale: "fr",
        long_date_format: "D MMMM YYYY",
        week_start: 1,
    },
    FormatBundle {
        locale: "hu",
        long_date_format: "YYYY. MMMM D.",
        week_start: 1,
    },
    FormatBundle {
        locale: "it",
        long_date_format: "D MMMM YYYY",
        week_start: 1,
    },
    FormatBundle {
        locale: "ja",
        long_date_format: "YYYY年M月D日",
        week_start: 0,
    },
    FormatBundle {
        locale: "nl",
        long_date_format: "D MMMM YYYY",
        week_start: 1,
    },
    FormatBundle {
        locale: "pt-br",
        long_date_format: "D [de] MMMM [de] YYYY",
        week_start: 0,
    },
    FormatBundle {
        locale: "ru",
        long_date_format: "D MMMM YYYY г.",
        week_start: 1,
    },
    FormatBundle {
        locale: "tr",
        long_date_format: "D MMMM YYYY",
        week_start: 1,
    },
    FormatBundle {
        locale: "zh-cn",
        long_date_format: "YYYY年M月D日",
        week_start: 1,
    },
    FormatBundle {
        locale: "zh-tw",
        long_date_format: "YYYY年M月D日",
        week_start: 1,
    },
];

impl Default for BundleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BundleRegistry {
    pub fn builtin() -> Self {
        Self::from_bundles(BUILTIN.iter().copied())
    }

    pub fn from_bundles(bundles: impl IntoIterator<Item = FormatBundle>) -> Self {
        Self {
            entries: bundles.into_iter().map(|b| (b.locale, b)).collect(),
        }
    }

    pub fn lookup(&self, locale: &str) -> BundleLookup {
        match self.entries.get(locale) {
            Some(bundle) => BundleLookup::Loaded(*bundle),
            None => BundleLookup::NotFound,
        }
    }
}

#[async_trait]
impl BundleSource for BundleRegistry {
    async fn load(&self, locale: &str) -> BundleLookup {
        self.lookup(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_covers_supported_locales() {
        let registry = BundleRegistry::builtin();
        for locale in crate::config::I18nSettings::default().supported_locales {
            if locale == crate::bootstrap_core::constants::locale::BASELINE {
                continue;
            }
            assert!(
                matches!(registry.lookup(&locale), BundleLookup::Loaded(_)),
                "missing bundle for {}",
                locale
            );
        }
    }

    #[test]
    fn unknown_locale_is_not_found() {
        assert_eq!(BundleRegistry::builtin().lookup("xx"), BundleLookup::NotFound);
        assert_eq!(BundleRegistry::builtin().lookup("en"), BundleLookup::NotFound);
    }
}
