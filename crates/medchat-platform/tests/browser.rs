//! Browser-only tests: `localStorage` needs a real window.
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use medchat_core::ports::StoragePort;
use medchat_core::store::ConversationStore;
use medchat_platform::storage::{auto_detect_storage, LocalStorage};
use medchat_types::message::Message;
use std::rc::Rc;

wasm_bindgen_test_configure!(run_in_browser);

const TEST_KEY: &str = "medchat:test:history";

#[wasm_bindgen_test]
fn local_storage_opens() {
    let storage = LocalStorage::open().unwrap();
    assert_eq!(storage.backend_name(), "localStorage");
}

#[wasm_bindgen_test]
fn auto_detect_prefers_local_storage() {
    assert_eq!(auto_detect_storage().backend_name(), "localStorage");
}

#[wasm_bindgen_test]
async fn local_storage_set_get_delete() {
    let storage = LocalStorage::open().unwrap();
    storage.set("medchat:test:a", b"1").await.unwrap();
    assert_eq!(storage.get("medchat:test:a").await.unwrap(), Some(b"1".to_vec()));

    storage.delete("medchat:test:a").await.unwrap();
    assert!(storage.get("medchat:test:a").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn local_storage_rejects_non_utf8() {
    let storage = LocalStorage::open().unwrap();
    assert!(storage.set("medchat:test:bin", &[0xff, 0xfe]).await.is_err());
}

#[wasm_bindgen_test]
async fn store_survives_reopen() {
    let storage: Rc<dyn StoragePort> = Rc::new(LocalStorage::open().unwrap());
    let mut store = ConversationStore::new(storage, TEST_KEY);
    let id = store.create().await;
    store.append(&id, Message::user("Persist across reload")).await;

    let reopened: Rc<dyn StoragePort> = Rc::new(LocalStorage::open().unwrap());
    let reloaded = ConversationStore::load(reopened.clone(), TEST_KEY).await;
    assert_eq!(reloaded.conversations(), store.conversations());

    reopened.delete(TEST_KEY).await.unwrap();
}
