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

//! Sign-in over HTTP: `POST {server}/api/signin` with `{ "token": ... }`.
//! Any 2xx answer authenticates; only the user name is taken from the body.
//! The persisted token is never rewritten here.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::bootstrap_core::errors::BootstrapError;
use crate::bootstrap_core::models::SignIn;
use crate::bootstrap_core::traits::AuthClient;
use crate::bootstrap_core::types::SessionToken;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SigninResponse {
    name: String,
}

pub struct HttpAuthClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAuthClient {
    pub fn new(server: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/signin", server.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn sign_in(&self, token: &SessionToken) -> Result<SignIn, BootstrapError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "token": token.as_str() }))
            .send()
            .await
            .map_err(|e| BootstrapError::Authentication(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "Sign-in rejected");
            return Ok(SignIn::rejected());
        }

        let body: SigninResponse = response.json().await.map_err(|e| {
            BootstrapError::Authentication(format!("invalid sign-in response: {}", e))
        })?;

        Ok(SignIn {
            authenticated: true,
            name: Some(body.name).filter(|n| !n.is_empty()),
        })
    }
}
