use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};

use super::Formatter;
use super::shared::{SingleOptions, select_messages};
use crate::error::Result;
use crate::models::Conversation;
use crate::utils::sanitize_for_terminal;

const RULE_WIDTH: usize = 60;
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable output, grouped by project in list view
///
/// Text taken from session files passes through [`sanitize_for_terminal`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

fn display_time(timestamp: DateTime<FixedOffset>) -> String {
    timestamp.format(DISPLAY_TIME_FORMAT).to_string()
}

impl Formatter for TextFormatter {
    fn render_list(&self, conversations: &[&Conversation]) -> Result<String> {
        let mut lines = vec!["Recent Claude conversations:".to_string(), "=".repeat(RULE_WIDTH)];
        lines.push(String::new());

        let mut by_project: BTreeMap<&str, Vec<&Conversation>> = BTreeMap::new();
        for conversation in conversations.iter().copied() {
            by_project.entry(conversation.project_path.as_str()).or_default().push(conversation);
        }

        for (project, group) in by_project {
            lines.push(format!("📁 Project: {}", sanitize_for_terminal(project)));
            lines.push(String::new());

            for conversation in group {
                lines.push(format!("  🗨️  Session: {}", conversation.session_id));
                if let Some(summary) = conversation.summary.as_deref().filter(|s| !s.is_empty()) {
                    lines.push(format!("      Summary: {}", sanitize_for_terminal(summary)));
                }
                if let Some(started) = conversation.started() {
                    lines.push(format!("      Started: {}", display_time(started)));
                }
                if let Some(last) = conversation.last_activity() {
                    lines.push(format!("      Last: {}", display_time(last)));
                }
                lines.push(format!(
                    "      Messages: {} ({} user, {} assistant)",
                    conversation.message_count(),
                    conversation.user_message_count(),
                    conversation.assistant_message_count()
                ));
                if let Some(preview) = conversation.first_user_preview().filter(|p| !p.is_empty()) {
                    lines.push(format!("      Preview: {}", sanitize_for_terminal(&preview)));
                }
                lines.push(String::new());
            }
        }

        Ok(lines.join("\n"))
    }

    fn render_single(
        &self,
        conversation: &Conversation,
        options: &SingleOptions,
    ) -> Result<String> {
        let mut lines = vec![
            format!("Conversation: {}", conversation.session_id),
            "=".repeat(RULE_WIDTH),
        ];
        if let Some(summary) = conversation.summary.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Summary: {}", sanitize_for_terminal(summary)));
        }
        lines.push(format!("Project: {}", sanitize_for_terminal(&conversation.project_path)));
        if let Some(started) = conversation.started() {
            lines.push(format!("Started: {}", display_time(started)));
        }
        if let Some(last) = conversation.last_activity() {
            lines.push(format!("Last: {}", display_time(last)));
        }
        lines.push(format!("Messages: {}", conversation.message_count()));

        let selected = select_messages(conversation, options.role_filter);
        if let Some(role) = options.role_filter {
            lines.push(format!("Filtered to: {} {} messages", selected.len(), role));
        }
        lines.push(String::new());

        if options.include_messages {
            for message in selected {
                lines.push(format!(
                    "[{}] {}:",
                    display_time(message.timestamp),
                    message.role.as_str().to_uppercase()
                ));
                lines.push(sanitize_for_terminal(&message.text_content()).into_owned());
                lines.push(String::new());
            }
        }

        Ok(lines.join("\n"))
    }
}
