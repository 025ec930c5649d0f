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

//! Ordered Async Initializer.
//!
//! Runs a fixed list of startup steps strictly one after another. A step
//! starts only after its predecessor has returned, whatever it returned.
//! Step failures are logged and recorded but never stop the pipeline, and
//! nothing here times out: a step that never completes stalls startup.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::bootstrap_core::constants::locale;
use crate::bootstrap_core::errors::BootstrapError;
use crate::config::{LogLevel, Settings};
use crate::i18n::bundles::FormatBundle;
use crate::i18n::Catalog;
use crate::utils::query::QueryParams;

/// State threaded through the steps of one page load.
#[derive(Debug)]
pub struct BootContext {
    pub boot_id: Uuid,
    pub settings: Arc<Settings>,
    pub query: QueryParams,
    pub log_level: Option<LogLevel>,
    /// Resolved active locale, set by the localization step
    pub locale: Option<String>,
    pub catalog: Catalog,
    /// Applied formatting bundle; `None` means baseline formatting
    pub format: Option<FormatBundle>,
    pub authenticated: bool,
    pub connected: bool,
}

impl BootContext {
    pub fn new(settings: Arc<Settings>, query: QueryParams) -> Self {
        Self {
            boot_id: Uuid::new_v4(),
            settings,
            query,
            log_level: None,
            locale: None,
            catalog: Catalog::default(),
            format: None,
            authenticated: false,
            connected: false,
        }
    }

    /// Resolved locale, or the baseline if localization never resolved one.
    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(locale::BASELINE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    /// The step decided it had nothing to do
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped,
    Failed(String),
}

#[async_trait]
pub trait InitStep: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut BootContext) -> Result<StepStatus, BootstrapError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub index: usize,
    pub name: &'static str,
    pub outcome: StepOutcome,
}

/// Per-step outcomes, for observability only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub steps: Vec<StepRecord>,
}

impl InitReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed(_)))
    }

    pub fn outcome_of(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name).map(|s| &s.outcome)
    }
}

#[derive(Default)]
pub struct Initializer {
    steps: Vec<Box<dyn InitStep>>,
}

impl Initializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: impl InitStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consumes the initializer; it cannot be run twice.
    pub async fn run(self, ctx: &mut BootContext) -> InitReport {
        let mut report = InitReport::default();

        for (index, step) in self.steps.iter().enumerate() {
            let name = step.name();
            let span = info_span!("init_step", index, step = name);

            let outcome = match step.run(ctx).instrument(span).await {
                Ok(StepStatus::Completed) => {
                    debug!(index, step = name, "Startup step completed");
                    StepOutcome::Completed
                }
                Ok(StepStatus::Skipped) => {
                    debug!(index, step = name, "Startup step skipped");
                    StepOutcome::Skipped
                }
                Err(e) => {
                    warn!(
                        index,
                        step = name,
                        kind = e.kind(),
                        error = %e,
                        "Startup step failed; continuing"
                    );
                    StepOutcome::Failed(e.to_string())
                }
            };

            report.steps.push(StepRecord {
                index,
                name,
                outcome,
            });
        }

        report
    }
}
