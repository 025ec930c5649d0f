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

//! Device-controller connection over TCP.

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::bootstrap_core::errors::BootstrapError;
use crate::bootstrap_core::traits::DeviceController;
use crate::bootstrap_core::types::SessionToken;

pub struct SocketController {
    addr: String,
    stream: Mutex<Option<TcpStream>>,
}

impl SocketController {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            stream: Mutex::new(None),
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub async fn is_connected(&self) -> bool {
        self.stream.lock().await.is_some()
    }
}

#[async_trait]
impl DeviceController for SocketController {
    async fn connect(&self, token: &SessionToken) -> Result<(), BootstrapError> {
        let mut slot = self.stream.lock().await;
        if slot.is_some() {
            debug!(addr = %self.addr, "Controller already connected");
            return Ok(());
        }

        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| BootstrapError::DeviceConnection(format!("{}: {}", self.addr, e)))?;
        stream.set_nodelay(true)?;

        info!(addr = %self.addr, token = %token.fingerprint(), "Controller connected");
        *slot = Some(stream);
        Ok(())
    }
}
