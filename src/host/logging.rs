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

//! Tracing setup with a reloadable level filter.

use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::bootstrap_core::errors::BootstrapError;
use crate::bootstrap_core::traits::LogLevelSink;
use crate::config::{LogFormat, LogLevel, Settings};

/// Applies the resolved level to the global subscriber.
pub struct TracingLevelSink {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelSink for TracingLevelSink {
    fn set_level(&self, level: LogLevel) {
        if let Err(e) = self.handle.reload(EnvFilter::new(level.as_str())) {
            warn!(level = %level, error = %e, "Failed to change log level");
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level
/// until the startup pipeline resolves its own.
pub fn init_tracing(settings: &Settings) -> Result<TracingLevelSink, BootstrapError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level.as_str()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (filter, handle) = reload::Layer::new(filter);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|e| {
        BootstrapError::Configuration(format!("cannot install tracing subscriber: {}", e))
    })?;

    Ok(TracingLevelSink { handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_after_subscriber_is_gone_is_not_fatal() {
        let (layer, handle) = reload::Layer::<EnvFilter, Registry>::new(EnvFilter::new("info"));
        drop(layer);
        let sink = TracingLevelSink { handle };
        sink.set_level(LogLevel::Debug);
    }
}
