//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition sent to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (function name)
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    pub input_schema: Value,
}

impl Tool {
    /// Create a new tool definition with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// Names listed as required by the input schema
    pub fn required_params(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Tool call requested by the LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Request identifier, echoed back in the matching result
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Input arguments for the tool
    pub input: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// Tool result to send back to LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this is responding to
    pub call_id: String,
    /// The result content
    pub content: String,
    /// Whether this result represents an error
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(call_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: error.into(),
            is_error: true,
        }
    }
}

/// Tool choice policy, serialized as `{"type": "auto"}`
///
/// Tool-enabled rounds always let the model decide; finalization turns tools
/// off by omitting them rather than through a choice value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("get_course_outline", "Get a course outline")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "course_name": { "type": "string" }
                },
                "required": ["course_name"]
            }));

        assert_eq!(tool.name, "get_course_outline");
        assert_eq!(tool.required_params(), vec!["course_name"]);

        let json = serde_json::to_value(&tool).unwrap();
        assert!(json.get("input_schema").is_some());
    }

    #[test]
    fn test_tool_result() {
        let success = ToolResult::success("toolu_123", "[Course - Lesson 1]\ntext");
        assert!(!success.is_error);

        let error = ToolResult::error("toolu_456", "Tool execution error in round 1: boom");
        assert!(error.is_error);
    }

    #[test]
    fn test_tool_choice_wire_format() {
        assert_eq!(serde_json::to_value(ToolChoice::Auto).unwrap(), json!({ "type": "auto" }));
    }
}
