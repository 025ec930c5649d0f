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

//! Internal publish/subscribe bus.
//!
//! One typed `Topic<T>` per channel; a channel name can only ever carry its
//! own payload type. Publishing with no subscribers is not an error.

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::bootstrap_core::constants::channels;

/// Payload of an authorized `connect` action, forwarded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectRequest(pub Value);

pub struct Topic<T> {
    name: &'static str,
    tx: broadcast::Sender<T>,
}

impl<T> Clone for Topic<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Topic<T> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { name, tx }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of subscribers the value was delivered to.
    pub fn publish(&self, value: T) -> usize {
        match self.tx.send(value) {
            Ok(n) => {
                trace!(channel = self.name, subscribers = n, "Published");
                n
            }
            Err(_) => {
                debug!(channel = self.name, "Published with no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }
}

/// All channels of the application.
#[derive(Clone)]
pub struct EventBus {
    /// `message:connect`
    pub connect: Topic<ConnectRequest>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            connect: Topic::new(channels::MESSAGE_CONNECT, channels::CAPACITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::new();
        assert_eq!(bus.connect.publish(ConnectRequest(json!(1))), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives() {
        let bus = EventBus::new();
        let mut a = bus.connect.subscribe();
        let mut b = bus.connect.clone().subscribe();

        assert_eq!(bus.connect.publish(ConnectRequest(json!({ "p": 1 }))), 2);
        assert_eq!(a.recv().await.unwrap(), ConnectRequest(json!({ "p": 1 })));
        assert_eq!(b.recv().await.unwrap(), ConnectRequest(json!({ "p": 1 })));
        assert_eq!(bus.connect.name(), "message:connect");
    }
}
