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

//! Recovery Gate.
//!
//! Runs once after the initializer. A healthy configuration renders straight
//! away. A corrupted one suspends startup behind a prompt offering an export
//! of the raw configuration (any number of times, no side effects) and a
//! restore to defaults, which writes, persists, and only then renders.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::bootstrap_core::errors::StoreError;
use crate::bootstrap_core::models::{
    DownloadArtifact, RecoveryChoice, RecoveryNotice, WorkspaceConfig,
};
use crate::bootstrap_core::traits::{RecoveryPrompt, SessionStore};
use crate::config::Settings;
use crate::engine::render::{RenderOutcome, RenderTrigger};
use crate::i18n::Catalog;
use crate::utils::download::text_artifact;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryPath {
    /// Configuration was healthy
    Direct,
    /// Defaults were restored after `exports` downloads
    Restored { exports: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryOutcome {
    pub path: RecoveryPath,
    pub render: RenderOutcome,
}

pub struct RecoveryGate {
    store: Arc<dyn SessionStore>,
    prompt: Arc<dyn RecoveryPrompt>,
    filename: String,
}

impl RecoveryGate {
    pub fn new(
        store: Arc<dyn SessionStore>,
        prompt: Arc<dyn RecoveryPrompt>,
        settings: &Settings,
    ) -> Self {
        Self {
            store,
            prompt,
            filename: settings.export_filename(),
        }
    }

    pub fn notice(&self, catalog: &Catalog) -> RecoveryNotice {
        RecoveryNotice {
            title: catalog.translate("Corrupted workspace settings"),
            message: catalog.translate(
                "The workspace settings have become corrupted or invalid. \
                 Click Restore Defaults to restore default settings and continue.",
            ),
            download_label: catalog.translate("Download workspace settings"),
            restore_label: catalog.translate("Restore Defaults"),
            filename: self.filename.clone(),
        }
    }

    /// Snapshot of the raw persisted text. Read-only.
    pub fn export(&self) -> DownloadArtifact {
        text_artifact(self.filename.clone(), self.store.raw_config())
    }

    /// Overwrite in-memory state with defaults, then persist.
    pub fn restore_defaults(&self) -> Result<(), StoreError> {
        self.store.replace_state(WorkspaceConfig::default_state());
        self.store.persist()
    }

    pub async fn resolve(&self, catalog: &Catalog, render: &RenderTrigger) -> RecoveryOutcome {
        if !self.store.is_corrupted() {
            return RecoveryOutcome {
                path: RecoveryPath::Direct,
                render: render.fire(),
            };
        }

        warn!("Workspace settings are corrupted; waiting for recovery");
        let notice = self.notice(catalog);
        let mut exports = 0;

        loop {
            match self.prompt.choose(&notice).await {
                RecoveryChoice::Export => {
                    let artifact = self.export();
                    exports += 1;
                    info!(
                        filename = %artifact.filename,
                        bytes = artifact.body.len(),
                        "Exporting workspace settings"
                    );
                    self.prompt.deliver(artifact).await;
                }
                RecoveryChoice::RestoreDefaults => {
                    match self.restore_defaults() {
                        Ok(()) => info!("Workspace settings restored to defaults"),
                        // In-memory state is already the default; render from it
                        Err(e) => {
                            error!(error = %e, "Failed to persist default workspace settings")
                        }
                    }
                    break;
                }
            }
        }

        RecoveryOutcome {
            path: RecoveryPath::Restored { exports },
            render: render.fire(),
        }
    }
}
