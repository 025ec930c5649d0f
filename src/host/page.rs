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

//! Headless page host.
//!
//! Stands in for the browser document when the pipeline runs outside one:
//! records what was mounted and which page tweaks were applied.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::bootstrap_core::constants::page;
use crate::bootstrap_core::errors::BootstrapError;
use crate::bootstrap_core::traits::PageHost;
use crate::engine::render::{Resolution, RouteTable};

#[derive(Debug, Default)]
struct PageState {
    mounts: usize,
    view: Option<Resolution>,
    elements: HashSet<String>,
    background: Option<String>,
    drop_suppressed: bool,
}

pub struct HeadlessPage {
    path: String,
    state: Mutex<PageState>,
}

impl HeadlessPage {
    /// A page at `path` still showing the loading indicator.
    pub fn new(path: impl Into<String>) -> Self {
        let mut state = PageState::default();
        state.elements.insert(page::LOADING_ELEMENT_ID.to_string());
        Self {
            path: path.into(),
            state: Mutex::new(state),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mount_count(&self) -> usize {
        self.state().mounts
    }

    pub fn view(&self) -> Option<Resolution> {
        self.state().view.clone()
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.state().elements.contains(id)
    }

    pub fn background(&self) -> Option<String> {
        self.state().background.clone()
    }

    pub fn drop_suppressed(&self) -> bool {
        self.state().drop_suppressed
    }
}

impl PageHost for HeadlessPage {
    fn mount(&self, routes: &RouteTable) -> Result<(), BootstrapError> {
        let view = routes.resolve(&self.path);
        match &view {
            Resolution::Render(route) => {
                info!(path = %self.path, route = %route.path(), "Rendering view")
            }
            Resolution::RedirectToLogin { from } => info!(from = %from, "Redirecting to login"),
        }

        let mut state = self.state();
        state.mounts += 1;
        state.view = Some(view);
        Ok(())
    }

    fn remove_element(&self, id: &str) -> bool {
        self.state().elements.remove(id)
    }

    fn set_background_color(&self, color: &str) {
        self.state().background = Some(color.to_string());
    }

    fn suppress_file_drop(&self) {
        self.state().drop_suppressed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap_core::models::Route;
    use crate::bootstrap_core::session::SessionFlag;
    use std::sync::Arc;

    #[test]
    fn mount_resolves_against_the_session() {
        let flag = SessionFlag::new();
        let routes = RouteTable::new(Arc::new(flag.clone()));

        let page = HeadlessPage::new("/workspace");
        page.mount(&routes).unwrap();
        assert_eq!(
            page.view(),
            Some(Resolution::RedirectToLogin {
                from: "/workspace".into()
            })
        );

        flag.mark_authenticated();
        let page = HeadlessPage::new("/workspace");
        page.mount(&routes).unwrap();
        assert_eq!(page.view(), Some(Resolution::Render(Route::Protected)));
        assert_eq!(page.mount_count(), 1);
    }

    #[test]
    fn loading_element_is_removed_once() {
        let page = HeadlessPage::new("/");
        assert!(page.has_element(page::LOADING_ELEMENT_ID));
        assert!(page.remove_element(page::LOADING_ELEMENT_ID));
        assert!(!page.remove_element(page::LOADING_ELEMENT_ID));
    }
}
