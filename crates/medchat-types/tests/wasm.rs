//! WASM-target tests for medchat-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use medchat_types::config::*;
use medchat_types::conversation::*;
use medchat_types::error::*;
use medchat_types::event::*;
use medchat_types::message::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_user() {
    let msg = Message::user("Hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "Hello");
    assert!(!msg.id.is_empty());
}

#[wasm_bindgen_test]
fn message_ids_unique() {
    assert_ne!(Message::user("a").id, Message::user("a").id);
}

#[wasm_bindgen_test]
fn message_timestamp_has_millis() {
    let json = serde_json::to_value(Message::assistant("ok")).unwrap();
    let ts = json["timestamp"].as_str().unwrap();
    assert!(ts.ends_with('Z'));
    assert_eq!(ts.len(), "2024-01-01T00:00:00.000Z".len());
}

#[wasm_bindgen_test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
}

// ─── Conversation Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn conversation_title_from_first_user_message() {
    let mut conv = Conversation::new();
    assert_eq!(conv.title, DEFAULT_TITLE);
    conv.push(Message::user("Persistent headache for three days now"));
    assert_eq!(conv.title, "Persistent headache for three ...");
    conv.push(Message::user("Also nausea"));
    assert_eq!(conv.title, "Persistent headache for three ...");
}

#[wasm_bindgen_test]
fn derive_title_short_text_kept() {
    assert_eq!(derive_title("Hi"), "Hi");
}

#[wasm_bindgen_test]
fn conversation_roundtrip() {
    let mut conv = Conversation::new();
    conv.push(Message::user("Cough"));
    conv.push(Message::assistant("How long?"));
    let json = serde_json::to_string(&conv).unwrap();
    let back: Conversation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, conv);
    assert_eq!(back.summary().message_count, 2);
}

// ─── Config / Event / Error Tests ────────────────────────

#[wasm_bindgen_test]
fn config_defaults() {
    let config = ChatConfig::default();
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
    assert_eq!(config.storage.backend, StorageBackendType::Auto);
}

#[wasm_bindgen_test]
fn event_serialization() {
    let event = ChatEvent::ReplyReceived { text: "Rest".to_string() };
    let json = serde_json::to_string(&event).unwrap();
    let back: ChatEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[wasm_bindgen_test]
fn error_display() {
    assert_eq!(ChatError::Reply("HTTP 500".to_string()).to_string(), "Reply error: HTTP 500");
    assert_eq!(ChatError::Busy.to_string(), "A reply is already pending");
}
