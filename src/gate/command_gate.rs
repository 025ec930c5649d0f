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

//! Cross-Origin Command Gate.
//!
//! Authorization boundary for messages posted by other browsing contexts.
//! A message is forwarded only when its token equals the current session
//! token; only the `connect` action is recognized. Rejections are logged and
//! dropped without any reply to the sender.
//!
//! The sender origin is not checked unless an allow-list is configured.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::bootstrap_core::constants::actions;
use crate::bootstrap_core::crypto::TokenVerifier;
use crate::bootstrap_core::models::{ActionEnvelope, InboundAction, InboundMessage, MessageEvent};
use crate::bootstrap_core::traits::SessionStore;
use crate::bootstrap_core::types::fingerprint;
use crate::config::GateSettings;
use crate::gate::bus::{ConnectRequest, EventBus};

/// What the gate did with one message.
#[derive(Debug, Clone, PartialEq)]
pub enum GateVerdict {
    /// Authorized and published on the bus
    Forwarded(ActionEnvelope),
    /// Sender origin not in the configured allow-list
    OriginRejected { origin: String },
    /// Missing, empty or mismatched token
    Unauthorized,
    /// Authorized, but the action type is missing or not recognized
    UnknownAction { kind: Option<String> },
}

pub struct CommandGate {
    store: Arc<dyn SessionStore>,
    bus: EventBus,
    verifier: TokenVerifier,
    allowed_origins: Option<Vec<String>>,
}

impl CommandGate {
    pub fn new(store: Arc<dyn SessionStore>, bus: EventBus, settings: &GateSettings) -> Self {
        Self {
            store,
            bus,
            verifier: TokenVerifier::new(),
            allowed_origins: settings.allowed_origins.clone(),
        }
    }

    pub fn handle(&self, event: &MessageEvent) -> GateVerdict {
        if let Some(allowed) = &self.allowed_origins {
            if !allowed.iter().any(|o| o == &event.origin) {
                warn!(origin = %event.origin, "Received a message from a disallowed origin");
                return GateVerdict::OriginRejected {
                    origin: event.origin.clone(),
                };
            }
        }

        let message = InboundMessage::from_value(&event.data);

        // Token authentication
        let expected = self.store.session_token();
        if !self.verifier.matches(&message.token, &expected) {
            let shown = if message.token.is_empty() {
                "<empty>".to_string()
            } else {
                fingerprint(&message.token)
            };
            warn!(
                token = %shown,
                origin = %event.origin,
                "Received a message with an unauthorized token"
            );
            return GateVerdict::Unauthorized;
        }

        match message.action {
            Some(InboundAction {
                kind: Some(kind),
                payload,
            }) if kind == actions::CONNECT => {
                let delivered = self.bus.connect.publish(ConnectRequest(payload.clone()));
                debug!(
                    channel = self.bus.connect.name(),
                    subscribers = delivered,
                    "Forwarded cross-origin connect action"
                );
                GateVerdict::Forwarded(ActionEnvelope { kind, payload })
            }
            other => {
                let kind = other.and_then(|a| a.kind);
                warn!(
                    action_type = ?kind,
                    "No valid action type specified in the message"
                );
                GateVerdict::UnknownAction { kind }
            }
        }
    }

    /// Standing listener. Runs until every sender of `rx` is dropped.
    pub fn listen(self: Arc<Self>, mut rx: mpsc::Receiver<MessageEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let _ = self.handle(&event);
            }
            debug!("Cross-origin message channel closed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn gate_with(token: &str, origins: Option<Vec<String>>) -> (CommandGate, EventBus) {
        let bus = EventBus::new();
        let settings = GateSettings {
            allowed_origins: origins,
        };
        let gate = CommandGate::new(
            Arc::new(MemoryStore::with_token(token)),
            bus.clone(),
            &settings,
        );
        (gate, bus)
    }

    #[test]
    fn missing_action_is_unknown() {
        let (gate, _bus) = gate_with("abc", None);
        let verdict = gate.handle(&MessageEvent::new("x", json!({ "token": "abc" })));
        assert_eq!(verdict, GateVerdict::UnknownAction { kind: None });
    }

    #[test]
    fn origin_allow_list_is_enforced_before_token() {
        let (gate, bus) = gate_with("abc", Some(vec!["https://ok.example".to_string()]));
        let mut rx = bus.connect.subscribe();
        let data = json!({ "token": "abc", "action": { "type": "connect", "payload": {} } });

        let verdict = gate.handle(&MessageEvent::new("https://evil.example", data.clone()));
        assert_eq!(
            verdict,
            GateVerdict::OriginRejected {
                origin: "https://evil.example".to_string()
            }
        );
        assert!(rx.try_recv().is_err());

        let verdict = gate.handle(&MessageEvent::new("https://ok.example", data));
        assert!(matches!(verdict, GateVerdict::Forwarded(_)));
        assert!(rx.try_recv().is_ok());
    }
}
