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

//! The four startup steps, in pipeline order.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::bootstrap_core::constants::{locale, query};
use crate::bootstrap_core::errors::BootstrapError;
use crate::bootstrap_core::session::SessionFlag;
use crate::bootstrap_core::traits::{
    AuthClient, BundleSource, DeviceController, LogLevelSink, SessionStore,
};
use crate::config::LogLevel;
use crate::engine::initializer::{BootContext, InitStep, StepStatus};
use crate::i18n::bundles::BundleLookup;
use crate::i18n::{Catalog, Localizer};

/// 1. `?log_level=` override, else the configured default. Cannot fail.
pub struct ResolveLogLevel {
    sink: Arc<dyn LogLevelSink>,
}

impl ResolveLogLevel {
    pub fn new(sink: Arc<dyn LogLevelSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl InitStep for ResolveLogLevel {
    fn name(&self) -> &'static str {
        "resolve_log_level"
    }

    async fn run(&self, ctx: &mut BootContext) -> Result<StepStatus, BootstrapError> {
        let level = ctx
            .query
            .get(query::LOG_LEVEL)
            .and_then(LogLevel::parse)
            .unwrap_or(ctx.settings.log_level);

        self.sink.set_level(level);
        ctx.log_level = Some(level);
        debug!(level = %level, "Log level resolved");
        Ok(StepStatus::Completed)
    }
}

/// 2. Detect the locale and load its translation resources.
///
/// The resolved locale is recorded before loading, so later steps see it even
/// if the backend fails.
pub struct InitLocalization {
    localizer: Localizer,
}

impl InitLocalization {
    pub fn new(localizer: Localizer) -> Self {
        Self { localizer }
    }
}

#[async_trait]
impl InitStep for InitLocalization {
    fn name(&self) -> &'static str {
        "init_localization"
    }

    async fn run(&self, ctx: &mut BootContext) -> Result<StepStatus, BootstrapError> {
        let resolved = self.localizer.resolve();
        info!(locale = %resolved, "Locale resolved");
        ctx.locale = Some(resolved.clone());
        ctx.catalog = Catalog::new(resolved.clone());

        ctx.catalog = self.localizer.load_catalog(&resolved).await?;
        Ok(StepStatus::Completed)
    }
}

/// 3. Apply the locale's formatting bundle, unless it is the baseline locale.
pub struct LoadFormatBundle {
    source: Arc<dyn BundleSource>,
}

impl LoadFormatBundle {
    pub fn new(source: Arc<dyn BundleSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl InitStep for LoadFormatBundle {
    fn name(&self) -> &'static str {
        "load_format_bundle"
    }

    async fn run(&self, ctx: &mut BootContext) -> Result<StepStatus, BootstrapError> {
        let active = ctx.locale().to_string();
        if active == locale::BASELINE {
            return Ok(StepStatus::Skipped);
        }

        match self.source.load(&active).await {
            BundleLookup::Loaded(bundle) => {
                debug!(locale = %active, "Formatting bundle applied");
                ctx.format = Some(bundle);
                Ok(StepStatus::Completed)
            }
            BundleLookup::NotFound => Err(BootstrapError::Localization(format!(
                "no formatting bundle for locale {}",
                active
            ))),
        }
    }
}

/// 4. Sign in with the persisted token; connect to the device controller
/// only when that succeeds.
pub struct RestoreSession {
    store: Arc<dyn SessionStore>,
    auth: Arc<dyn AuthClient>,
    controller: Arc<dyn DeviceController>,
    session: SessionFlag,
}

impl RestoreSession {
    pub fn new(
        store: Arc<dyn SessionStore>,
        auth: Arc<dyn AuthClient>,
        controller: Arc<dyn DeviceController>,
        session: SessionFlag,
    ) -> Self {
        Self {
            store,
            auth,
            controller,
            session,
        }
    }
}

#[async_trait]
impl InitStep for RestoreSession {
    fn name(&self) -> &'static str {
        "restore_session"
    }

    async fn run(&self, ctx: &mut BootContext) -> Result<StepStatus, BootstrapError> {
        let token = self.store.session_token();
        if token.is_empty() {
            debug!("No persisted session token");
            return Ok(StepStatus::Completed);
        }

        let signin = match self.auth.sign_in(&token).await {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Sign-in failed; continuing unauthenticated");
                return Ok(StepStatus::Completed);
            }
        };

        if !signin.authenticated {
            info!(token = %token.fingerprint(), "Persisted session token was not accepted");
            return Ok(StepStatus::Completed);
        }

        ctx.authenticated = true;
        self.session.mark_authenticated();

        debug!("Create and establish a device controller connection");
        self.controller.connect(&token).await?;
        ctx.connected = true;
        info!(user = signin.name.as_deref().unwrap_or_default(), "Device controller connected");
        Ok(StepStatus::Completed)
    }
}
