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

//! Render Trigger.
//!
//! Mounts the routed view tree at most once per page load, whichever path
//! (direct or post-recovery) reaches it first.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::bootstrap_core::constants::page;
use crate::bootstrap_core::models::Route;
use crate::bootstrap_core::traits::{AuthGuard, PageHost};

/// Where a navigation to a path ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    RedirectToLogin { from: String },
}

/// `/login` (public) and the protected catch-all.
#[derive(Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    guard: Arc<dyn AuthGuard>,
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl RouteTable {
    pub fn new(guard: Arc<dyn AuthGuard>) -> Self {
        Self {
            routes: vec![Route::Login, Route::Protected],
            guard,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        let route = Route::for_path(path);
        if route.requires_auth() && !self.guard.is_authenticated() {
            return Resolution::RedirectToLogin {
                from: path.to_string(),
            };
        }
        Resolution::Render(route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Mounted,
    /// A previous call already mounted (or tried to mount) the tree
    AlreadyMounted,
    /// The host refused; not retried
    Failed(String),
}

pub struct RenderTrigger {
    host: Arc<dyn PageHost>,
    routes: RouteTable,
    fired: AtomicBool,
}

impl RenderTrigger {
    pub fn new(host: Arc<dyn PageHost>, routes: RouteTable) -> Self {
        Self {
            host,
            routes,
            fired: AtomicBool::new(false),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn fire(&self) -> RenderOutcome {
        if self
            .fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("View tree already mounted");
            return RenderOutcome::AlreadyMounted;
        }

        if let Err(e) = self.host.mount(&self.routes) {
            error!(error = %e, "Failed to mount the view tree");
            return RenderOutcome::Failed(e.to_string());
        }

        // Hide loading
        self.host.remove_element(page::LOADING_ELEMENT_ID);
        self.host.set_background_color(page::BACKGROUND_COLOR);
        self.host.suppress_file_drop();

        info!(routes = ?self.routes.routes(), "View tree mounted");
        RenderOutcome::Mounted
    }
}
