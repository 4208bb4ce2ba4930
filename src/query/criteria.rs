use chrono::{DateTime, FixedOffset};

use super::engine::QueryEngine;
use crate::models::Conversation;

/// Search term plus its case mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub term: String,
    pub case_sensitive: bool,
}

/// Criteria shared by the `list` and `search` commands
///
/// Unset fields do not filter. Criteria combine with AND; the result is always
/// sorted newest first with undated conversations removed, then truncated to
/// `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationQuery {
    pub search: Option<SearchTerm>,
    pub since: Option<DateTime<FixedOffset>>,
    pub until: Option<DateTime<FixedOffset>>,
    pub project: Option<String>,
    pub min_messages: Option<usize>,
    /// `None` or `Some(0)` returns every match
    pub limit: Option<usize>,
}

impl ConversationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>, case_sensitive: bool) -> Self {
        self.search = Some(SearchTerm { term: term.into(), case_sensitive });
        self
    }

    pub fn since(mut self, since: Option<DateTime<FixedOffset>>) -> Self {
        self.since = since;
        self
    }

    pub fn until(mut self, until: Option<DateTime<FixedOffset>>) -> Self {
        self.until = until;
        self
    }

    pub fn project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    pub fn min_messages(mut self, min_messages: Option<usize>) -> Self {
        self.min_messages = min_messages;
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    fn has_date_bounds(&self) -> bool {
        self.since.is_some() || self.until.is_some()
    }

    /// Run the query against `conversations`
    pub fn apply<'a>(&self, conversations: &'a [Conversation]) -> Vec<&'a Conversation> {
        let mut engine = QueryEngine::new(conversations);

        if let Some(search) = &self.search {
            engine = QueryEngine::from_refs(engine.search_content(&search.term, search.case_sensitive));
        }

        if self.has_date_bounds() {
            engine = QueryEngine::from_refs(engine.filter_by_date_range(self.since, self.until));
        }

        if let Some(project) = &self.project {
            engine = QueryEngine::from_refs(engine.filter_by_project(project));
        }

        if let Some(min_messages) = self.min_messages {
            engine = QueryEngine::from_refs(engine.filter_by_min_messages(min_messages));
        }

        let mut sorted = engine.sort_by_date(true);
        if let Some(limit) = self.limit.filter(|&limit| limit > 0) {
            sorted.truncate(limit);
        }
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Role};

    fn ts(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn conversation(id: &str, project: &str, day: u32, messages: usize) -> Conversation {
        let mut conv = Conversation::new(id, project, format!("/tmp/{id}.jsonl"));
        for minute in 0..messages {
            let stamp = ts(&format!("2025-11-{day:02}T10:{minute:02}:00Z"));
            conv.push_message(Message::new(stamp, Role::User, format!("{id} text").as_str()));
        }
        conv
    }

    fn fixture() -> Vec<Conversation> {
        vec![
            conversation("a", "~/web", 1, 5),
            conversation("b", "~/web", 10, 1),
            conversation("c", "~/cli", 20, 3),
            conversation("d", "~/web", 25, 0),
        ]
    }

    fn ids(conversations: &[&Conversation]) -> Vec<String> {
        conversations.iter().map(|c| c.session_id.clone()).collect()
    }

    #[test]
    fn test_empty_query_sorts_and_drops_undated() {
        let conversations = fixture();
        assert_eq!(ids(&ConversationQuery::new().apply(&conversations)), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_combined_criteria() {
        let conversations = fixture();
        let query = ConversationQuery::new()
            .since(Some(ts("2025-11-01T00:00:00Z")))
            .project(Some("WEB".to_string()))
            .min_messages(Some(2));

        assert_eq!(ids(&query.apply(&conversations)), vec!["a"]);
    }

    #[test]
    fn test_until_bound() {
        let conversations = fixture();
        let query = ConversationQuery::new().until(Some(ts("2025-11-10T10:00:00Z")));
        assert_eq!(ids(&query.apply(&conversations)), vec!["b", "a"]);
    }

    #[test]
    fn test_search_then_limit() {
        let conversations = fixture();
        let query = ConversationQuery::new().search("TEXT", false).limit(Some(2));
        assert_eq!(ids(&query.apply(&conversations)), vec!["c", "b"]);
    }

    #[test]
    fn test_zero_limit_returns_everything() {
        let conversations = fixture();
        let query = ConversationQuery::new().limit(Some(0));
        assert_eq!(query.apply(&conversations).len(), 3);
    }
}
