use serde::{Deserialize, Serialize};

use crate::conversation::ConversationSummary;
use crate::message::Message;

/// Events emitted by the chat session.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The conversation list changed (created, deleted, appended to)
    ConversationsChanged { summaries: Vec<ConversationSummary> },

    /// A different conversation is now active; `messages` replaces the view
    ActiveChanged { id: Option<String>, messages: Vec<Message> },

    /// A message was added to the visible conversation
    MessageAppended { message: Message },

    /// A user message was sent and the reply is pending
    TurnStart,

    /// A submit arrived while a reply was still pending; `text` was not sent
    TurnRejected { text: String },

    /// The endpoint answered
    ReplyReceived { text: String },

    /// The endpoint failed; the fallback message was used instead
    ReplyFailed { error: String },

    /// The pending reply resolved, one way or the other
    TurnEnd,
}
