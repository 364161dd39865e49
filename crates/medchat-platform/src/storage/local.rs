//! `window.localStorage` backend.
//! Persistent across page reloads. Values are stored as strings, so only
//! UTF-8 payloads (the JSON chat history, the config) are accepted.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};

use medchat_core::ports::StoragePort;
use medchat_types::{ChatError, Result};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Grab the page's `localStorage`. Fails outside a browser window or
    /// when the browser denies access.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.storage.get_item(key).map_err(js_error)?;
        Ok(value.map(String::into_bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value).map_err(|e| {
            ChatError::Storage(format!("Value for '{}' is not UTF-8: {}", key, e))
        })?;
        // Throws QuotaExceededError when the origin's quota is full
        self.storage.set_item(key, text).map_err(js_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

fn js_error(value: JsValue) -> ChatError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    ChatError::JsInterop(message)
}
