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

//! console-bootstrap: startup orchestration for a machine-control console.
//!
//! Runs the ordered initializer (log level, localization, formatting bundle,
//! session restore), holds startup behind the recovery gate while the stored
//! workspace configuration is corrupted, and mounts the routed view tree
//! exactly once. Alongside it, the cross-origin command gate authenticates
//! messages from other browsing contexts and forwards `connect` actions on a
//! typed event bus.

pub mod bootstrap_core;
pub mod config;
pub mod engine;
pub mod gate;
pub mod host;
pub mod i18n;
pub mod store;
pub mod utils;
