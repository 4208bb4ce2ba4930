use super::Formatter;
use super::shared::{ConversationDetail, ConversationList, SingleOptions};
use crate::error::Result;
use crate::models::Conversation;

/// Pretty-printed JSON with two-space indentation; non-ASCII text is kept as is
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn render_list(&self, conversations: &[&Conversation]) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ConversationList::new(conversations))?)
    }

    fn render_single(
        &self,
        conversation: &Conversation,
        options: &SingleOptions,
    ) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ConversationDetail::new(conversation, options))?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::models::{Message, Role};

    fn conversation() -> Conversation {
        let mut conv = Conversation::new("s1", "~/café", "/tmp/s1.jsonl");
        let stamp = DateTime::parse_from_rfc3339("2025-11-01T10:00:00Z").unwrap();
        conv.push_message(Message::new(stamp, Role::User, "Grüße"));
        conv
    }

    #[test]
    fn test_render_list_keeps_non_ascii_and_indent() {
        let conv = conversation();
        let output = JsonFormatter.render_list(&[&conv]).unwrap();

        assert!(output.starts_with("{\n  \"total\": 1,"));
        assert!(output.contains("\"project\": \"~/café\""));
        assert!(output.contains("\"first_user_message\": \"Grüße\""));
    }

    #[test]
    fn test_render_single_field_order() {
        let conv = conversation();
        let output = JsonFormatter.render_single(&conv, &SingleOptions::default()).unwrap();

        let session = output.find("\"session_id\"").unwrap();
        let messages = output.find("\"messages\"").unwrap();
        assert!(session < messages);
        assert!(!output.contains("filtered_role"));
    }
}
