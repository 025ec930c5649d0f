use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::mpsc;

use console_bootstrap::bootstrap_core::models::{ActionEnvelope, MessageEvent};
use console_bootstrap::bootstrap_core::traits::SessionStore;
use console_bootstrap::config::GateSettings;
use console_bootstrap::gate::transport::spawn_message_reader;
use console_bootstrap::gate::{CommandGate, EventBus, GateVerdict};
use console_bootstrap::store::MemoryStore;

const ORIGIN: &str = "http://pendant.local:8000";

fn gate(token: &str) -> (Arc<CommandGate>, Arc<MemoryStore>, EventBus) {
    let store = Arc::new(MemoryStore::with_token(token));
    let bus = EventBus::new();
    let gate = CommandGate::new(store.clone(), bus.clone(), &GateSettings::default());
    (Arc::new(gate), store, bus)
}

fn connect(token: &str, payload: Value) -> MessageEvent {
    MessageEvent::new(
        ORIGIN,
        json!({ "token": token, "action": { "type": "connect", "payload": payload } }),
    )
}

#[test]
fn test_authorized_connect_is_published_once() {
    let (gate, _store, bus) = gate("abc");
    let mut rx = bus.connect.subscribe();
    let payload = json!({ "port": "/dev/ttyUSB0", "baudRate": 115200 });

    let verdict = gate.handle(&connect("abc", payload.clone()));

    assert_eq!(
        verdict,
        GateVerdict::Forwarded(ActionEnvelope {
            kind: "connect".into(),
            payload: payload.clone(),
        })
    );
    assert_eq!(rx.try_recv().unwrap().0, payload);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_mismatched_token_is_dropped() {
    let (gate, _store, bus) = gate("abc");
    let mut rx = bus.connect.subscribe();

    for forged in ["abd", "ABC", "abc ", "", "abcabc"] {
        assert_eq!(gate.handle(&connect(forged, json!({}))), GateVerdict::Unauthorized);
    }
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_empty_session_token_authorizes_nothing() {
    let (gate, _store, bus) = gate("");
    let mut rx = bus.connect.subscribe();

    assert_eq!(gate.handle(&connect("", json!({}))), GateVerdict::Unauthorized);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_token_is_read_at_message_time() {
    let (gate, store, bus) = gate("old");
    let mut rx = bus.connect.subscribe();

    store.set("session.token", json!("new"));

    assert_eq!(gate.handle(&connect("old", json!({}))), GateVerdict::Unauthorized);
    assert!(matches!(gate.handle(&connect("new", json!({}))), GateVerdict::Forwarded(_)));
    assert!(rx.try_recv().is_ok());
}

#[test]
fn test_unknown_or_missing_action_is_not_forwarded() {
    let (gate, _store, bus) = gate("abc");
    let mut rx = bus.connect.subscribe();

    let unknown = MessageEvent::new(
        ORIGIN,
        json!({ "token": "abc", "action": { "type": "disconnect", "payload": {} } }),
    );
    assert_eq!(
        gate.handle(&unknown),
        GateVerdict::UnknownAction {
            kind: Some("disconnect".into())
        }
    );

    let missing = MessageEvent::new(ORIGIN, json!({ "token": "abc" }));
    assert_eq!(gate.handle(&missing), GateVerdict::UnknownAction { kind: None });

    let untyped = MessageEvent::new(ORIGIN, json!({ "token": "abc", "action": { "payload": 1 } }));
    assert_eq!(gate.handle(&untyped), GateVerdict::UnknownAction { kind: None });

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_malformed_data_is_tolerated() {
    let (gate, _store, bus) = gate("abc");
    let mut rx = bus.connect.subscribe();

    for data in [
        Value::Null,
        json!("abc"),
        json!(42),
        json!(["abc", "connect"]),
        json!({ "token": 7, "action": "connect" }),
        json!({ "action": { "type": "connect" } }),
    ] {
        assert_eq!(
            gate.handle(&MessageEvent::new(ORIGIN, data)),
            GateVerdict::Unauthorized
        );
    }
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_connect_without_payload_forwards_null() {
    let (gate, _store, bus) = gate("abc");
    let mut rx = bus.connect.subscribe();

    let event = MessageEvent::new(
        ORIGIN,
        json!({ "token": "abc", "action": { "type": "connect" } }),
    );
    assert!(matches!(gate.handle(&event), GateVerdict::Forwarded(_)));
    assert_eq!(rx.try_recv().unwrap().0, Value::Null);
}

#[test]
fn test_origin_allow_list() {
    let store = Arc::new(MemoryStore::with_token("abc"));
    let bus = EventBus::new();
    let mut rx = bus.connect.subscribe();
    let gate = CommandGate::new(
        store,
        bus,
        &GateSettings {
            allowed_origins: Some(vec![ORIGIN.to_string()]),
        },
    );

    let foreign = MessageEvent::new(
        "http://evil.example",
        json!({ "token": "abc", "action": { "type": "connect", "payload": {} } }),
    );
    assert_eq!(
        gate.handle(&foreign),
        GateVerdict::OriginRejected {
            origin: "http://evil.example".into()
        }
    );
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

    assert!(matches!(gate.handle(&connect("abc", json!({}))), GateVerdict::Forwarded(_)));
}

#[tokio::test]
async fn test_listener_processes_channel_until_closed() {
    let (gate, _store, bus) = gate("abc");
    let mut rx = bus.connect.subscribe();
    let (tx, events) = mpsc::channel(8);
    let listener = gate.listen(events);

    tx.send(connect("nope", json!({ "n": 0 }))).await.unwrap();
    tx.send(connect("abc", json!({ "n": 1 }))).await.unwrap();
    tx.send(connect("abc", json!({ "n": 2 }))).await.unwrap();
    drop(tx);
    listener.await.unwrap();

    assert_eq!(rx.recv().await.unwrap().0, json!({ "n": 1 }));
    assert_eq!(rx.recv().await.unwrap().0, json!({ "n": 2 }));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_framed_stream_reaches_the_bus() {
    let (gate, _store, bus) = gate("abc");
    let mut rx = bus.connect.subscribe();

    let input: &'static [u8] = b"{\"origin\":\"http://pendant.local:8000\",\"data\":{\"token\":\"abc\",\"action\":{\"type\":\"connect\",\"payload\":{\"port\":\"COM3\"}}}}\n\
not json at all\n\
{\"origin\":\"x\",\"data\":{\"token\":\"zzz\",\"action\":{\"type\":\"connect\"}}}\n";

    let (tx, events) = mpsc::channel(8);
    let reader = spawn_message_reader(input, tx);
    let listener = gate.listen(events);

    reader.await.unwrap();
    listener.await.unwrap();

    assert_eq!(rx.recv().await.unwrap().0, json!({ "port": "COM3" }));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}
