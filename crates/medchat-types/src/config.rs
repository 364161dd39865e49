use serde::{Deserialize, Serialize};

use crate::{ChatError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://medical-chatbot-kfbq.onrender.com/api/chat";
pub const DEFAULT_STORAGE_KEY: &str = "medicalChatHistories";
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// URL that receives `{"message": ...}` and answers `{"reply": ...}`
    pub endpoint: String,
    pub storage: StorageConfig,
    /// Assistant text shown when a reply cannot be obtained
    pub fallback_reply: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            storage: StorageConfig::default(),
            fallback_reply: FALLBACK_REPLY.to_string(),
        }
    }
}

impl ChatConfig {
    /// Decode a saved config. Fields left out take their defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ChatError::Config(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Slot holding the serialized conversation list
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    LocalStorage,
}
