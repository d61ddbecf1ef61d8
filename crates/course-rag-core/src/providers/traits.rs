//! Provider trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, ContentPart, Tool, ToolCall, ToolChoice};
use super::error::ProviderResult;

/// `max_tokens` when the caller sets none
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// One Messages API request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature for response generation
    pub temperature: f32,
    /// System prompt
    pub system: String,
    /// Accumulated conversation
    pub messages: Vec<ChatMessage>,
    /// Tools available for the model to use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    /// Tool choice behavior
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl MessagesRequest {
    /// Create a request without tools
    pub fn new(model: impl Into<String>, system: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            system: system.into(),
            messages,
            tools: None,
            tool_choice: None,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    /// Offer tools to the model
    pub fn with_tools(mut self, tools: Vec<Tool>, choice: ToolChoice) -> Self {
        self.tools = Some(tools);
        self.tool_choice = Some(choice);
        self
    }

    /// Whether this request carries any tool definitions
    pub fn has_tools(&self) -> bool {
        self.tools.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    #[serde(other)]
    Other,
}

/// Response of one Messages API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub stop_reason: StopReason,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

impl MessagesResponse {
    /// A plain text answer
    pub fn text(stop_reason: StopReason, text: impl Into<String>) -> Self {
        Self {
            stop_reason,
            content: vec![ContentPart::text(text)],
        }
    }

    /// A tool-use response requesting the given calls
    pub fn tool_use(calls: Vec<ToolCall>) -> Self {
        Self {
            stop_reason: StopReason::ToolUse,
            content: calls
                .into_iter()
                .map(|c| ContentPart::tool_use(c.id, c.name, c.input))
                .collect(),
        }
    }

    /// Concatenated text blocks
    pub fn output_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Tool calls in the order the model listed them
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content.iter().filter_map(ContentPart::as_tool_call).collect()
    }

    /// True when the model stopped to run tools and named at least one
    pub fn requests_tools(&self) -> bool {
        self.stop_reason == StopReason::ToolUse
            && self.content.iter().any(|p| matches!(p, ContentPart::ToolUse { .. }))
    }
}

/// Provider trait for LLM implementations
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "anthropic")
    fn name(&self) -> &str;

    /// Issue one request and wait for the complete response
    async fn create(&self, request: MessagesRequest) -> ProviderResult<MessagesResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_tools_when_absent() {
        let request = MessagesRequest::new("claude", "system", vec![ChatMessage::user("hi")]);
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("tools").is_none());
        assert!(json.get("tool_choice").is_none());
        assert!(!request.has_tools());

        let with_tools = request.with_tools(vec![Tool::new("t", "d")], ToolChoice::Auto);
        let json = serde_json::to_value(&with_tools).unwrap();
        assert_eq!(json["tool_choice"], json!({ "type": "auto" }));
        assert!(with_tools.has_tools());
    }

    #[test]
    fn test_response_parsing() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "stop_reason": "tool_use",
            "content": [
                { "type": "text", "text": "Let me look that up." },
                { "type": "tool_use", "id": "toolu_1", "name": "get_course_outline", "input": { "course_name": "MCP" } }
            ]
        }))
        .unwrap();

        assert!(response.requests_tools());
        assert_eq!(response.output_text(), "Let me look that up.");
        assert_eq!(response.tool_calls()[0].name, "get_course_outline");
    }

    #[test]
    fn test_unknown_stop_reason() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "stop_reason": "pause_turn",
            "content": []
        }))
        .unwrap();
        assert_eq!(response.stop_reason, StopReason::Other);
        assert!(!response.requests_tools());
    }

    #[test]
    fn test_tool_use_stop_without_blocks_is_not_a_tool_request() {
        let response = MessagesResponse::text(StopReason::ToolUse, "odd");
        assert!(!response.requests_tools());
    }
}
