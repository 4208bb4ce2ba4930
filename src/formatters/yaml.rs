use super::Formatter;
use super::shared::{ConversationDetail, ConversationList, SingleOptions};
use crate::error::Result;
use crate::models::Conversation;

/// Block-style YAML, fields in declaration order
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn render_list(&self, conversations: &[&Conversation]) -> Result<String> {
        Ok(serde_yaml::to_string(&ConversationList::new(conversations))?)
    }

    fn render_single(
        &self,
        conversation: &Conversation,
        options: &SingleOptions,
    ) -> Result<String> {
        Ok(serde_yaml::to_string(&ConversationDetail::new(conversation, options))?)
    }
}
