//! UI-level state that drives rendering.
//! This is a read-only projection of the chat session,
//! updated each frame by draining the EventBus.

use medchat_types::{
    conversation::{ConversationSummary, DEFAULT_TITLE},
    event::ChatEvent,
    message::Message,
};

pub const STATUS_READY: &str = "Ready";
pub const STATUS_LOADING: &str = "Loading history...";
pub const STATUS_AWAITING: &str = "Consulting...";
pub const STATUS_FAILED: &str = "Reply unavailable";

/// State visible to UI panels
pub struct UiState {
    /// Messages of the active conversation
    pub messages: Vec<Message>,
    /// Sidebar entries, newest first
    pub conversations: Vec<ConversationSummary>,
    pub active_id: Option<String>,
    /// A reply is pending; the composer is disabled
    pub awaiting_reply: bool,
    /// Composer content
    pub input_text: String,
    /// Whether the conversation sidebar is open
    pub show_sidebar: bool,
    /// Status line text
    pub status_text: String,
    /// History has been loaded and a session is attached
    pub ready: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            conversations: Vec::new(),
            active_id: None,
            awaiting_reply: false,
            input_text: String::new(),
            show_sidebar: false,
            status_text: STATUS_LOADING.to_string(),
            ready: false,
        }
    }

    /// The session is attached; the composer may be used.
    pub fn mark_ready(&mut self) {
        self.ready = true;
        self.status_text = STATUS_READY.to_string();
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::ConversationsChanged { summaries } => {
                    self.conversations = summaries;
                }
                ChatEvent::ActiveChanged { id, messages } => {
                    self.active_id = id;
                    self.messages = messages;
                }
                ChatEvent::MessageAppended { message } => {
                    self.messages.push(message);
                }
                ChatEvent::TurnStart => {
                    self.awaiting_reply = true;
                    self.status_text = STATUS_AWAITING.to_string();
                }
                // Give the unsent text back unless something new was typed
                ChatEvent::TurnRejected { text } => {
                    if self.input_text.trim().is_empty() {
                        self.input_text = text;
                    }
                }
                ChatEvent::ReplyReceived { .. } => {
                    self.status_text = STATUS_READY.to_string();
                }
                // The cause is logged by the session, not shown
                ChatEvent::ReplyFailed { .. } => {
                    self.status_text = STATUS_FAILED.to_string();
                }
                ChatEvent::TurnEnd => {
                    self.awaiting_reply = false;
                }
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.awaiting_reply
    }

    /// Send is allowed: history loaded, no reply pending, input not blank
    pub fn can_submit(&self) -> bool {
        self.ready && !self.awaiting_reply && !self.input_text.trim().is_empty()
    }

    /// Take the composer text for submission, clearing the composer.
    pub fn take_input(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        Some(std::mem::take(&mut self.input_text))
    }

    pub fn active_title(&self) -> &str {
        self.active_id
            .as_deref()
            .and_then(|id| self.conversations.iter().find(|c| c.id == id))
            .map(|c| c.title.as_str())
            .unwrap_or(DEFAULT_TITLE)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
