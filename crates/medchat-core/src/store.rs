//! Conversation store: every conversation plus which one is active.
//!
//! The whole list lives in a single storage slot as a JSON array, newest
//! conversation first. Each mutation rewrites the slot; a failed write is
//! logged and the in-memory state is kept so the chat stays usable.

use std::rc::Rc;

use medchat_types::{
    conversation::{Conversation, ConversationSummary},
    message::Message,
    Result,
};

use crate::ports::StoragePort;

pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    storage: Rc<dyn StoragePort>,
    key: String,
}

impl ConversationStore {
    /// An empty store writing to `key`. Nothing is read from storage.
    pub fn new(storage: Rc<dyn StoragePort>, key: impl Into<String>) -> Self {
        Self {
            conversations: Vec::new(),
            active_id: None,
            storage,
            key: key.into(),
        }
    }

    /// Read the persisted conversations. Missing or unreadable data gives an
    /// empty store. No conversation is active afterwards.
    pub async fn load(storage: Rc<dyn StoragePort>, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);

        match store.storage.get(&store.key).await {
            Ok(Some(bytes)) => match decode(&bytes) {
                Ok(conversations) => store.conversations = conversations,
                Err(e) => log::warn!(
                    "Discarding malformed chat history in '{}': {}",
                    store.key,
                    e
                ),
            },
            Ok(None) => log::debug!("No chat history under '{}'", store.key),
            Err(e) => log::warn!("Chat history unreadable ({}), starting empty", e),
        }

        log::info!(
            "Loaded {} conversations from {} storage",
            store.conversations.len(),
            store.storage.backend_name()
        );
        store
    }

    /// Write the full store. An empty store removes the slot instead of
    /// skipping the write; otherwise deleting the last conversation would
    /// leave the old history in storage and it would come back on reload.
    pub async fn persist(&self) -> Result<()> {
        if self.conversations.is_empty() {
            return self.storage.delete(&self.key).await;
        }
        let json = serde_json::to_vec(&self.conversations)?;
        self.storage.set(&self.key, &json).await
    }

    async fn persist_or_log(&self) {
        if let Err(e) = self.persist().await {
            log::error!("Failed to persist chat history: {}", e);
        }
    }

    /// Start a fresh conversation at the front of the list and make it
    /// active. Returns its id.
    pub async fn create(&mut self) -> String {
        let conversation = Conversation::new();
        let id = conversation.id.clone();
        self.conversations.insert(0, conversation);
        self.active_id = Some(id.clone());
        log::info!("Created conversation {}", id);
        self.persist_or_log().await;
        id
    }

    /// Remove a conversation. Removing the active one immediately creates a
    /// replacement so something is always active. Returns `false` for an
    /// unknown id.
    pub async fn delete(&mut self, id: &str) -> bool {
        let Some(pos) = self.position(id) else {
            log::debug!("Delete ignored, no conversation {}", id);
            return false;
        };
        self.conversations.remove(pos);
        log::info!("Deleted conversation {}", id);

        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
            self.create().await;
        } else {
            self.persist_or_log().await;
        }
        true
    }

    /// Make `id` active. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: &str) -> bool {
        if self.position(id).is_none() {
            log::debug!("Select ignored, no conversation {}", id);
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }

    /// Append to conversation `id`, bumping its timestamp and deriving the
    /// title from an opening user message.
    pub async fn append(&mut self, id: &str, message: Message) -> bool {
        let Some(pos) = self.position(id) else {
            log::warn!("Append ignored, no conversation {}", id);
            return false;
        };
        self.conversations[pos].push(message);
        self.persist_or_log().await;
        true
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn summaries(&self) -> Vec<ConversationSummary> {
        self.conversations.iter().map(Conversation::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }
}

fn decode(bytes: &[u8]) -> Result<Vec<Conversation>> {
    Ok(serde_json::from_slice(bytes)?)
}
