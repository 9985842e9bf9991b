//! Terminal output for CLI commands.

use std::io::{self, Write};

use tracing::debug;

use crate::error::ChatError;
use crate::models::{ConversationSummary, Message};
use crate::session::TurnCallbacks;

/// Streams reply fragments to stdout as they arrive.
#[derive(Debug, Default)]
pub struct PrintCallbacks {
    printed_any: bool,
}

impl PrintCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any reply text was written.
    pub fn printed_any(&self) -> bool {
        self.printed_any
    }
}

impl TurnCallbacks for PrintCallbacks {
    fn on_start(&mut self, conversation_id: &str) {
        eprintln!("conversation: {}", conversation_id);
    }

    fn on_content(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
        self.printed_any = true;
    }

    fn on_summary(&mut self, message_count: u64) {
        debug!(message_count, "Exchange summary");
    }

    fn on_complete(&mut self, _conversation_id: &str) {
        if self.printed_any {
            println!();
        }
    }

    fn on_error(&mut self, error: &ChatError) {
        if self.printed_any {
            println!();
        }
        eprintln!("error [{}]: {}", error.error_code(), error.user_message());
    }
}

/// One line of `--list` output.
pub fn format_conversation_line(conversation: &ConversationSummary) -> String {
    let updated = conversation
        .updated_at
        .or(conversation.created_at)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let title = conversation
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or("(untitled)");
    format!("{}\t{}\t{}", conversation.id, updated, title)
}

/// One block of `--history` output.
pub fn format_message(message: &Message) -> String {
    format!("[{}] {}", message.role, message.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_conversation_line() {
        let conversation = ConversationSummary {
            id: "c1".to_string(),
            title: Some("Trip plans".to_string()),
            created_at: None,
            updated_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()),
            message_count: Some(4),
        };
        assert_eq!(
            format_conversation_line(&conversation),
            "c1\t2026-03-01 09:30\tTrip plans"
        );
    }

    #[test]
    fn test_format_conversation_line_untitled() {
        let conversation = ConversationSummary {
            id: "c2".to_string(),
            title: None,
            created_at: None,
            updated_at: None,
            message_count: None,
        };
        assert_eq!(format_conversation_line(&conversation), "c2\t-\t(untitled)");
    }

    #[test]
    fn test_format_message() {
        assert_eq!(format_message(&Message::user("hi")), "[user] hi");
    }
}
