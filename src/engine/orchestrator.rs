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

//! Application Bootstrap Orchestrator.
//!
//! Initializer -> Recovery Gate -> Render Trigger, executed once. `run`
//! consumes the orchestrator, so a second pass is not expressible.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::bootstrap_core::session::SessionFlag;
use crate::bootstrap_core::traits::{
    AuthClient, BundleSource, DeviceController, LocaleDetector, LogLevelSink, PageHost,
    RecoveryPrompt, ResourceLoader, SessionStore,
};
use crate::config::Settings;
use crate::engine::initializer::{BootContext, InitReport, Initializer};
use crate::engine::recovery::{RecoveryGate, RecoveryOutcome};
use crate::engine::render::{RenderTrigger, RouteTable};
use crate::engine::steps::{InitLocalization, LoadFormatBundle, ResolveLogLevel, RestoreSession};
use crate::i18n::Localizer;
use crate::utils::query::QueryParams;

/// External collaborators of the standard pipeline.
pub struct Collaborators {
    pub store: Arc<dyn SessionStore>,
    pub log_sink: Arc<dyn LogLevelSink>,
    pub detector: Arc<dyn LocaleDetector>,
    pub resources: Arc<dyn ResourceLoader>,
    pub bundles: Arc<dyn BundleSource>,
    pub auth: Arc<dyn AuthClient>,
    pub controller: Arc<dyn DeviceController>,
    pub page: Arc<dyn PageHost>,
    pub prompt: Arc<dyn RecoveryPrompt>,
}

#[derive(Debug, Clone)]
pub struct BootReport {
    pub boot_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub init: InitReport,
    pub locale: String,
    pub authenticated: bool,
    pub connected: bool,
    pub recovery: RecoveryOutcome,
}

pub struct Bootstrap {
    settings: Arc<Settings>,
    initializer: Initializer,
    recovery: RecoveryGate,
    render: Arc<RenderTrigger>,
}

impl Bootstrap {
    /// The standard four-step pipeline.
    pub fn new(settings: Arc<Settings>, c: Collaborators) -> Self {
        let session = SessionFlag::new();
        let localizer = Localizer::new(c.detector, c.resources, settings.i18n.clone());

        let initializer = Initializer::new()
            .with_step(ResolveLogLevel::new(c.log_sink))
            .with_step(InitLocalization::new(localizer))
            .with_step(LoadFormatBundle::new(c.bundles))
            .with_step(RestoreSession::new(
                c.store.clone(),
                c.auth,
                c.controller,
                session.clone(),
            ));

        let recovery = RecoveryGate::new(c.store, c.prompt, &settings);
        let routes = RouteTable::new(Arc::new(session));
        let render = Arc::new(RenderTrigger::new(c.page, routes));

        Self {
            settings,
            initializer,
            recovery,
            render,
        }
    }

    /// Custom step list; used for embedding and tests.
    pub fn from_parts(
        settings: Arc<Settings>,
        initializer: Initializer,
        recovery: RecoveryGate,
        render: Arc<RenderTrigger>,
    ) -> Self {
        Self {
            settings,
            initializer,
            recovery,
            render,
        }
    }

    pub fn render_trigger(&self) -> Arc<RenderTrigger> {
        self.render.clone()
    }

    pub async fn run(self, query: QueryParams) -> BootReport {
        let started_at = Utc::now();
        let mut ctx = BootContext::new(self.settings.clone(), query);
        let span = info_span!("bootstrap", boot_id = %ctx.boot_id);

        async move {
            let init = self.initializer.run(&mut ctx).await;
            info!("{} {}", self.settings.name, self.settings.version);

            let recovery = self.recovery.resolve(&ctx.catalog, &self.render).await;

            BootReport {
                boot_id: ctx.boot_id,
                started_at,
                finished_at: Utc::now(),
                init,
                locale: ctx.locale().to_string(),
                authenticated: ctx.authenticated,
                connected: ctx.connected,
                recovery,
            }
        }
        .instrument(span)
        .await
    }
}
