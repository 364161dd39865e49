#[cfg(test)]
mod tests {
    use crate::format::format_timestamp_in;
    use crate::state::*;
    use chrono::{FixedOffset, TimeZone, Utc};
    use medchat_types::conversation::{ConversationSummary, DEFAULT_TITLE};
    use medchat_types::event::ChatEvent;
    use medchat_types::message::Message;

    fn summary(id: &str, title: &str) -> ConversationSummary {
        ConversationSummary {
            id: id.to_string(),
            title: title.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 10, 19, 8, 15, 0).unwrap(),
            message_count: 0,
        }
    }

    fn ready_state() -> UiState {
        let mut state = UiState::new();
        state.mark_ready();
        state
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert!(state.messages.is_empty());
        assert!(state.conversations.is_empty());
        assert!(state.active_id.is_none());
        assert!(!state.awaiting_reply);
        assert!(!state.show_sidebar);
        assert!(!state.ready);
        assert_eq!(state.status_text, STATUS_LOADING);
        assert_eq!(state.active_title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_ui_state_mark_ready() {
        let state = ready_state();
        assert!(state.ready);
        assert_eq!(state.status_text, STATUS_READY);
    }

    #[test]
    fn test_cannot_submit_before_ready() {
        let mut state = UiState::new();
        state.input_text = "hello".to_string();
        assert!(!state.can_submit());
        assert!(state.take_input().is_none());
        assert_eq!(state.input_text, "hello");
    }

    #[test]
    fn test_take_input_clears_composer() {
        let mut state = ready_state();
        state.input_text = "I have a rash".to_string();
        assert_eq!(state.take_input(), Some("I have a rash".to_string()));
        assert!(state.input_text.is_empty());
    }

    #[test]
    fn test_take_input_blank_is_none() {
        let mut state = ready_state();
        state.input_text = "   ".to_string();
        assert!(state.take_input().is_none());
        assert_eq!(state.input_text, "   ");
    }

    #[test]
    fn test_take_input_blocked_while_awaiting() {
        let mut state = ready_state();
        state.process_events(vec![ChatEvent::TurnStart]);
        state.input_text = "follow-up".to_string();
        assert!(!state.can_submit());
        assert!(state.take_input().is_none());
    }

    #[test]
    fn test_process_conversations_changed() {
        let mut state = ready_state();
        state.process_events(vec![ChatEvent::ConversationsChanged {
            summaries: vec![summary("b", "Second"), summary("a", "First")],
        }]);
        assert_eq!(state.conversations.len(), 2);
        assert_eq!(state.conversations[0].id, "b");
    }

    #[test]
    fn test_process_active_changed_replaces_messages() {
        let mut state = ready_state();
        state.messages = vec![Message::user("old")];
        state.process_events(vec![ChatEvent::ActiveChanged {
            id: Some("c2".to_string()),
            messages: vec![Message::user("new"), Message::assistant("reply")],
        }]);
        assert_eq!(state.active_id.as_deref(), Some("c2"));
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].content, "new");
    }

    #[test]
    fn test_active_title_from_summaries() {
        let mut state = ready_state();
        state.process_events(vec![
            ChatEvent::ConversationsChanged {
                summaries: vec![summary("c1", "Back pain")],
            },
            ChatEvent::ActiveChanged {
                id: Some("c1".to_string()),
                messages: Vec::new(),
            },
        ]);
        assert_eq!(state.active_title(), "Back pain");
    }

    #[test]
    fn test_process_full_turn() {
        let mut state = ready_state();
        state.process_events(vec![
            ChatEvent::MessageAppended { message: Message::user("Hi") },
            ChatEvent::TurnStart,
        ]);
        assert!(state.is_busy());
        assert_eq!(state.status_text, STATUS_AWAITING);

        state.process_events(vec![
            ChatEvent::MessageAppended { message: Message::assistant("Hello") },
            ChatEvent::ReplyReceived { text: "Hello".to_string() },
            ChatEvent::TurnEnd,
        ]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, STATUS_READY);
        assert_eq!(state.messages.len(), 2);
    }

    #[test]
    fn test_process_failed_turn_hides_cause() {
        let mut state = ready_state();
        state.process_events(vec![
            ChatEvent::TurnStart,
            ChatEvent::ReplyFailed { error: "Network error: connection refused".to_string() },
            ChatEvent::TurnEnd,
        ]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, STATUS_FAILED);
        assert!(!state.status_text.contains("connection refused"));
    }

    #[test]
    fn test_rejected_turn_restores_composer() {
        let mut state = ready_state();
        state.process_events(vec![ChatEvent::TurnStart]);
        state.process_events(vec![ChatEvent::TurnRejected {
            text: "Is ibuprofen safe?".to_string(),
        }]);
        assert_eq!(state.input_text, "Is ibuprofen safe?");
        assert!(state.is_busy());
    }

    #[test]
    fn test_rejected_turn_keeps_newer_input() {
        let mut state = ready_state();
        state.input_text = "typed meanwhile".to_string();
        state.process_events(vec![ChatEvent::TurnRejected {
            text: "older".to_string(),
        }]);
        assert_eq!(state.input_text, "typed meanwhile");
    }

    #[test]
    fn test_ui_state_default() {
        let state = UiState::default();
        assert!(state.messages.is_empty());
        assert!(!state.is_busy());
    }

    // ─── Format Tests ────────────────────────────────────────

    #[test]
    fn test_format_timestamp_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 19, 8, 15, 0).unwrap();
        assert_eq!(format_timestamp_in(&ts, &Utc), "Oct 19, 08:15 AM");
    }

    #[test]
    fn test_format_timestamp_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 22, 40, 0).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_timestamp_in(&ts, &ist), "Mar 6, 04:10 AM");
    }
}
