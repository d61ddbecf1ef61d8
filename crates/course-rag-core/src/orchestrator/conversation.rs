//! Per-query conversation state

use crate::types::{ChatMessage, ContentPart, MessageRole, ToolResult};

/// Ordered message list of one query
///
/// Append-only. Tool rounds are appended as a pair (assistant tool-use turn
/// followed by the user turn with one result per request), so every
/// tool-use id is answered before the next LLM call sees the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start with the user's query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(query)],
        }
    }

    /// Append the assistant's raw tool-use content and the matching results
    ///
    /// `results` must answer the tool-use blocks of `assistant_content` in
    /// order; a mismatch is a bug in the caller.
    pub fn push_tool_round(&mut self, assistant_content: Vec<ContentPart>, results: Vec<ToolResult>) {
        debug_assert_eq!(
            assistant_content
                .iter()
                .filter_map(|p| p.as_tool_call().map(|c| c.id))
                .collect::<Vec<_>>(),
            results.iter().map(|r| r.call_id.clone()).collect::<Vec<_>>(),
            "tool results must answer every tool-use request in order"
        );

        self.messages.push(ChatMessage::with_parts(MessageRole::Assistant, assistant_content));
        if !results.is_empty() {
            self.messages.push(ChatMessage::tool_results(&results));
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_conversation_holds_query() {
        let conversation = Conversation::new("What is MCP?");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].text(), Some("What is MCP?"));
    }

    #[test]
    fn test_tool_round_pairs_results() {
        let mut conversation = Conversation::new("q");
        conversation.push_tool_round(
            vec![
                ContentPart::text("Searching"),
                ContentPart::tool_use("toolu_a", "search_course_content", json!({ "query": "a" })),
                ContentPart::tool_use("toolu_b", "get_course_outline", json!({ "course_name": "b" })),
            ],
            vec![ToolResult::success("toolu_a", "A"), ToolResult::error("toolu_b", "B failed")],
        );

        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.messages()[1].role, MessageRole::Assistant);
        assert_eq!(conversation.messages()[2].role, MessageRole::User);

        let answered: Vec<&str> = conversation.messages()[2]
            .parts()
            .iter()
            .filter_map(|p| match p {
                ContentPart::ToolResult { tool_use_id, .. } => Some(tool_use_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(answered, vec!["toolu_a", "toolu_b"]);
    }
}
