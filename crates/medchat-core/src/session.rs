//! Chat session: the visible conversation and one request/reply turn.
//!
//! A turn:
//! 1. Append the user's message to the active conversation (creating one
//!    if nothing is active)
//! 2. Ask the reply port, exactly once
//! 3. Append the reply, or the fallback text if the ask failed
//!
//! Hosts that must not hold the session across the network await can run
//! the two halves separately with `begin_turn` and `finish_turn`.

use medchat_types::{
    config::FALLBACK_REPLY,
    event::ChatEvent,
    message::Message,
    ChatError, Result,
};

use crate::event_bus::EventBus;
use crate::ports::ReplyPort;
use crate::store::ConversationStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    /// A reply has been requested and not yet resolved
    Sending,
}

/// How a submitted turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// The endpoint's reply was appended
    Replied,
    /// The ask failed and the fallback message was appended
    Fallback,
}

/// A turn whose user message is stored and whose reply is outstanding.
#[derive(Debug)]
pub struct PendingTurn {
    conversation_id: String,
    text: String,
}

impl PendingTurn {
    /// Text to send to the reply port
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }
}

pub struct ChatSession {
    store: ConversationStore,
    /// Messages of the active conversation, as displayed
    messages: Vec<Message>,
    state: TurnState,
    fallback_reply: String,
    event_bus: EventBus,
}

impl ChatSession {
    pub fn new(store: ConversationStore, event_bus: EventBus) -> Self {
        let messages = store
            .active()
            .map(|c| c.messages.clone())
            .unwrap_or_default();
        Self {
            store,
            messages,
            state: TurnState::Idle,
            fallback_reply: FALLBACK_REPLY.to_string(),
            event_bus,
        }
    }

    pub fn with_fallback_reply(mut self, text: impl Into<String>) -> Self {
        self.fallback_reply = text.into();
        self
    }

    /// Publish the full current state, for a UI that just attached.
    pub fn announce(&self) {
        self.emit_conversations();
        self.event_bus.emit(ChatEvent::ActiveChanged {
            id: self.active_id().map(str::to_string),
            messages: self.messages.clone(),
        });
    }

    /// Start a new, empty conversation and switch to it.
    pub async fn new_conversation(&mut self) -> String {
        let id = self.store.create().await;
        self.emit_conversations();
        self.sync_active();
        id
    }

    /// Switch to `id`. Unknown ids are ignored.
    pub fn select_conversation(&mut self, id: &str) -> bool {
        if !self.store.select(id) {
            return false;
        }
        self.sync_active();
        true
    }

    pub async fn delete_conversation(&mut self, id: &str) -> bool {
        let was_active = self.active_id() == Some(id);
        if !self.store.delete(id).await {
            return false;
        }
        self.emit_conversations();
        if was_active {
            self.sync_active();
        }
        true
    }

    /// Run a whole turn: store the user's text, ask for a reply, store the
    /// reply or the fallback. Only a turn already in flight is an error.
    pub async fn submit(&mut self, text: &str, reply: &dyn ReplyPort) -> Result<TurnOutcome> {
        let Some(pending) = self.begin_turn(text).await? else {
            return Ok(TurnOutcome::Ignored);
        };
        let result = reply.ask(pending.text()).await;
        Ok(self.finish_turn(pending, result).await)
    }

    /// First half of a turn. `Ok(None)` for blank input, `Err(Busy)` while
    /// another turn is pending.
    pub async fn begin_turn(&mut self, text: &str) -> Result<Option<PendingTurn>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if self.state == TurnState::Sending {
            log::warn!("Submit rejected, a reply is still pending");
            self.event_bus.emit(ChatEvent::TurnRejected {
                text: text.to_string(),
            });
            return Err(ChatError::Busy);
        }

        let conversation_id = match self.active_id().map(str::to_string) {
            Some(id) => id,
            None => self.new_conversation().await,
        };

        self.append_to(&conversation_id, Message::user(text)).await;
        self.state = TurnState::Sending;
        self.event_bus.emit(ChatEvent::TurnStart);
        log::info!("Turn started in conversation {}", conversation_id);

        Ok(Some(PendingTurn {
            conversation_id,
            text: text.to_string(),
        }))
    }

    /// Second half of a turn. Never fails: a failed ask becomes the
    /// fallback message.
    pub async fn finish_turn(&mut self, pending: PendingTurn, result: Result<String>) -> TurnOutcome {
        let (message, event, outcome) = match result {
            Ok(text) => (
                Message::assistant(text.clone()),
                ChatEvent::ReplyReceived { text },
                TurnOutcome::Replied,
            ),
            Err(e) => {
                log::error!("Reply failed: {}", e);
                (
                    Message::assistant(self.fallback_reply.clone()),
                    ChatEvent::ReplyFailed { error: e.to_string() },
                    TurnOutcome::Fallback,
                )
            }
        };

        self.append_to(&pending.conversation_id, message).await;
        self.event_bus.emit(event);
        self.state = TurnState::Idle;
        self.event_bus.emit(ChatEvent::TurnEnd);
        log::info!("Turn finished: {:?}", outcome);
        outcome
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn active_id(&self) -> Option<&str> {
        self.store.active_id()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state == TurnState::Sending
    }

    /// Store the message; mirror it into the view only if its conversation
    /// is the one on screen.
    async fn append_to(&mut self, conversation_id: &str, message: Message) {
        let visible = self.active_id() == Some(conversation_id);
        if !self.store.append(conversation_id, message.clone()).await {
            return;
        }
        if visible {
            self.messages.push(message.clone());
            self.event_bus.emit(ChatEvent::MessageAppended { message });
        }
        self.emit_conversations();
    }

    /// Replace the view with the active conversation's stored messages.
    fn sync_active(&mut self) {
        self.messages = self
            .store
            .active()
            .map(|c| c.messages.clone())
            .unwrap_or_default();
        self.event_bus.emit(ChatEvent::ActiveChanged {
            id: self.active_id().map(str::to_string),
            messages: self.messages.clone(),
        });
    }

    fn emit_conversations(&self) {
        self.event_bus.emit(ChatEvent::ConversationsChanged {
            summaries: self.store.summaries(),
        });
    }
}
