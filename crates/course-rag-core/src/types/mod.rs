//! Core types for LLM interactions
//!
//! Shared by the provider boundary, the tool registry and the orchestrator.

mod message;
mod tool;
mod citation;

pub use message::{ChatMessage, ContentPart, MessageRole, MessageContent};
pub use tool::{Tool, ToolCall, ToolResult, ToolChoice};
pub use citation::SourceCitation;
