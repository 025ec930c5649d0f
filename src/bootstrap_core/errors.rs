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

// Domain error types for the bootstrap pipeline and its collaborators

use thiserror::Error;

/// Main error type for startup steps and host adapters
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Settings could not be loaded or are invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Locale detection or resource loading failed
    #[error("Localization error: {0}")]
    Localization(String),

    /// The sign-in round trip failed at the transport level
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The device controller connection could not be established
    #[error("Device connection error: {0}")]
    DeviceConnection(String),

    /// Session store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The page host refused to mount the view tree
    #[error("Render error: {0}")]
    Render(String),

    /// I/O Error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Could not take the exclusive lock on the backing file
    #[error("Lock error: {0}")]
    Lock(String),
}

impl BootstrapError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            BootstrapError::Configuration(_) => "configuration",
            BootstrapError::Localization(_) => "localization",
            BootstrapError::Authentication(_) => "authentication",
            BootstrapError::DeviceConnection(_) => "device_connection",
            BootstrapError::Store(_) => "store",
            BootstrapError::Render(_) => "render",
            BootstrapError::Io(_) => "io",
        }
    }
}
