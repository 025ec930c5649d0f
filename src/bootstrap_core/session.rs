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

//! Authenticated-session flag.
//!
//! Written once by the session-restore step, read by the route guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::bootstrap_core::traits::AuthGuard;

#[derive(Debug, Clone, Default)]
pub struct SessionFlag(Arc<AtomicBool>);

impl SessionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_authenticated(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl AuthGuard for SessionFlag {
    fn is_authenticated(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
