use chrono::{DateTime, FixedOffset};

use crate::models::Conversation;

/// Filtering, searching and sorting over an already-loaded set of conversations
///
/// Every operation returns a fresh `Vec` of references; the underlying
/// conversations are never touched. Wrap a previous result with
/// [`QueryEngine::from_refs`] to chain operations.
///
/// # Examples
///
/// ```
/// use ai_history_query::{Conversation, QueryEngine};
///
/// let conversations = vec![Conversation::new("abc", "~/Code/app", "/tmp/abc.jsonl")];
/// let engine = QueryEngine::new(&conversations);
/// assert!(engine.get_by_session_id("abc").is_some());
/// assert!(engine.filter_by_project("CODE").len() == 1);
/// ```
#[derive(Debug, Clone)]
pub struct QueryEngine<'a> {
    conversations: Vec<&'a Conversation>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(conversations: &'a [Conversation]) -> Self {
        Self { conversations: conversations.iter().collect() }
    }

    pub fn from_refs(conversations: Vec<&'a Conversation>) -> Self {
        Self { conversations }
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn conversations(&self) -> &[&'a Conversation] {
        &self.conversations
    }

    /// Keep conversations whose start lies within the bounds (both inclusive)
    ///
    /// Conversations without messages have no start and never match, even
    /// when neither bound is given.
    pub fn filter_by_date_range(
        &self,
        since: Option<DateTime<FixedOffset>>,
        until: Option<DateTime<FixedOffset>>,
    ) -> Vec<&'a Conversation> {
        self.retain(|conversation| {
            let Some(started) = conversation.started() else {
                return false;
            };
            since.is_none_or(|since| started >= since) && until.is_none_or(|until| started <= until)
        })
    }

    /// Case-insensitive substring match on the decoded project path
    pub fn filter_by_project(&self, pattern: &str) -> Vec<&'a Conversation> {
        let pattern = pattern.to_lowercase();
        self.retain(|conversation| conversation.project_path.to_lowercase().contains(&pattern))
    }

    pub fn filter_by_min_messages(&self, min_count: usize) -> Vec<&'a Conversation> {
        self.retain(|conversation| conversation.message_count() >= min_count)
    }

    /// Conversations whose summary or any message text contains `term`
    pub fn search_content(&self, term: &str, case_sensitive: bool) -> Vec<&'a Conversation> {
        let needle = if case_sensitive { term.to_string() } else { term.to_lowercase() };
        let matches = |haystack: &str| {
            if case_sensitive {
                haystack.contains(&needle)
            } else {
                haystack.to_lowercase().contains(&needle)
            }
        };

        self.retain(|conversation| {
            if conversation.summary.as_deref().is_some_and(&matches) {
                return true;
            }
            conversation.messages.iter().any(|message| matches(&message.text_content()))
        })
    }

    /// Exact session id lookup
    pub fn get_by_session_id(&self, session_id: &str) -> Option<&'a Conversation> {
        self.conversations.iter().copied().find(|c| c.session_id == session_id)
    }

    /// Stable sort by start time, newest first when `reverse` is set
    ///
    /// Conversations without a start time are left out of the result.
    pub fn sort_by_date(&self, reverse: bool) -> Vec<&'a Conversation> {
        let mut dated: Vec<(DateTime<FixedOffset>, &'a Conversation)> = self
            .conversations
            .iter()
            .filter_map(|conversation| conversation.started().map(|ts| (ts, *conversation)))
            .collect();

        if reverse {
            dated.sort_by(|(a, _), (b, _)| b.cmp(a));
        } else {
            dated.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        dated.into_iter().map(|(_, conversation)| conversation).collect()
    }

    fn retain(&self, predicate: impl Fn(&Conversation) -> bool) -> Vec<&'a Conversation> {
        self.conversations.iter().copied().filter(|c| predicate(c)).collect()
    }
}
