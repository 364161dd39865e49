use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{new_id, Message, Role};
use crate::time::{self, iso8601};

pub const DEFAULT_TITLE: &str = "New Consultation";

/// Titles longer than this are cut and suffixed with `...`
pub const TITLE_MAX_CHARS: usize = 30;

/// One chat thread, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// Instant of last activity
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: new_id(),
            title: DEFAULT_TITLE.to_string(),
            timestamp: time::now(),
            messages: Vec::new(),
        }
    }

    /// Append a message, bump the activity timestamp and, when this is the
    /// opening user message, derive the title from it.
    pub fn push(&mut self, message: Message) {
        if self.messages.is_empty() && message.role == Role::User {
            self.title = derive_title(&message.content);
        }
        self.messages.push(message);
        self.timestamp = time::now();
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            timestamp: self.timestamp,
            message_count: self.messages.len(),
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Title for a conversation opened by `text`.
pub fn derive_title(text: &str) -> String {
    match text.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Summary of a conversation for the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    pub message_count: usize,
}
