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

//! Token comparison for the command gate.
//!
//! `TokenVerifier` decides exact string equality between a presented token and
//! the session token, but does so by comparing HMAC-SHA256 tags under an
//! ephemeral key so the comparison time does not depend on the common prefix.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::bootstrap_core::constants::crypto;
use crate::bootstrap_core::types::SessionToken;

type HmacSha256 = Hmac<Sha256>;

pub struct TokenVerifier {
    secret: [u8; crypto::SECRET_KEY_LENGTH],
}

impl Default for TokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenVerifier {
    /// Create a verifier with a random ephemeral key
    pub fn new() -> Self {
        Self {
            secret: rand::random(),
        }
    }

    /// `true` iff both tokens are non-empty and byte-for-byte equal.
    pub fn matches(&self, presented: &str, expected: &SessionToken) -> bool {
        if presented.is_empty() || expected.is_empty() {
            return false;
        }

        let expected_tag = match self.tag(expected.as_str().as_bytes()) {
            Some(t) => t,
            None => return false,
        };

        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(m) => m,
            Err(_) => return false,
        };
        mac.update(presented.as_bytes());

        // Constant-time verify
        mac.verify_slice(&expected_tag).is_ok()
    }

    fn tag(&self, data: &[u8]) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(data);
        Some(mac.finalize().into_bytes().to_vec())
    }
}
