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

//! Non-interactive recovery prompt.
//!
//! Answers the corrupted-configuration modal from a fixed list of choices.
//! Exports are written to a directory when one is configured. Once the list
//! is exhausted the prompt never answers again, which keeps startup suspended
//! exactly as an unattended modal would.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};

use crate::bootstrap_core::models::{DownloadArtifact, RecoveryChoice, RecoveryNotice};
use crate::bootstrap_core::traits::RecoveryPrompt;

pub struct ScriptedPrompt {
    choices: Mutex<VecDeque<RecoveryChoice>>,
    export_dir: Option<PathBuf>,
    delivered: Mutex<Vec<DownloadArtifact>>,
    notices: Mutex<Vec<RecoveryNotice>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedPrompt {
    pub fn new(choices: impl IntoIterator<Item = RecoveryChoice>) -> Self {
        Self {
            choices: Mutex::new(choices.into_iter().collect()),
            export_dir: None,
            delivered: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// Artifacts handed over so far, in order.
    pub fn delivered(&self) -> Vec<DownloadArtifact> {
        lock(&self.delivered).clone()
    }

    /// How many times the modal was consulted.
    pub fn times_shown(&self) -> usize {
        lock(&self.notices).len()
    }

    pub fn last_notice(&self) -> Option<RecoveryNotice> {
        lock(&self.notices).last().cloned()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.choices).len()
    }
}

#[async_trait]
impl RecoveryPrompt for ScriptedPrompt {
    async fn choose(&self, notice: &RecoveryNotice) -> RecoveryChoice {
        lock(&self.notices).push(notice.clone());
        let next = lock(&self.choices).pop_front();
        match next {
            Some(choice) => {
                info!(?choice, title = %notice.title, "Recovery choice");
                choice
            }
            None => {
                warn!(title = %notice.title, "No recovery choice left; startup stays suspended");
                std::future::pending().await
            }
        }
    }

    async fn deliver(&self, artifact: DownloadArtifact) {
        if let Some(dir) = &self.export_dir {
            let target = dir.join(&artifact.filename);
            match tokio::fs::write(&target, artifact.body.as_bytes()).await {
                Ok(()) => info!(path = %target.display(), "Workspace settings exported"),
                Err(e) => error!(path = %target.display(), error = %e, "Failed to write export"),
            }
        }
        lock(&self.delivered).push(artifact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::download::text_artifact;
    use std::time::Duration;

    fn notice() -> RecoveryNotice {
        RecoveryNotice {
            title: "Corrupted workspace settings".into(),
            message: String::new(),
            download_label: String::new(),
            restore_label: String::new(),
            filename: "app-1.0.0.json".into(),
        }
    }

    #[tokio::test]
    async fn answers_in_order() {
        let prompt = ScriptedPrompt::new([RecoveryChoice::Export, RecoveryChoice::RestoreDefaults]);
        assert_eq!(prompt.choose(&notice()).await, RecoveryChoice::Export);
        assert_eq!(prompt.choose(&notice()).await, RecoveryChoice::RestoreDefaults);
        assert_eq!(prompt.remaining(), 0);
        assert_eq!(prompt.times_shown(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_script_never_answers() {
        let prompt = ScriptedPrompt::new(Vec::<RecoveryChoice>::new());
        let waited =
            tokio::time::timeout(Duration::from_secs(3600), prompt.choose(&notice())).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn exports_land_in_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let prompt = ScriptedPrompt::new(Vec::<RecoveryChoice>::new()).with_export_dir(dir.path());
        prompt
            .deliver(text_artifact("app-1.0.0.json", "{broken"))
            .await;

        let written = std::fs::read_to_string(dir.path().join("app-1.0.0.json")).unwrap();
        assert_eq!(written, "{broken");
        assert_eq!(prompt.delivered().len(), 1);
    }
}
