//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `medchat-core` (pure Rust).
//! Implementations live in `medchat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use medchat_types::Result;

// ─── Reply Port ──────────────────────────────────────────────

/// The remote assistant. One call per user turn, no streaming.
#[async_trait(?Send)]
pub trait ReplyPort {
    /// Send the user's text and return the assistant's reply text
    async fn ask(&self, message: &str) -> Result<String>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Durable key-value storage
#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
