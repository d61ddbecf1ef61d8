//! Tool capability traits

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::types::{SourceCitation, Tool};

/// Failures raised by a tool (as opposed to negative results, which are text)
#[derive(Error, Debug)]
pub enum ToolError {
    /// Tool definition has no name
    #[error("Tool must have a 'name' in its definition")]
    MissingName,

    /// Input does not match the tool's schema
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// The tool ran and failed
    #[error("{0}")]
    Execution(String),
}

impl ToolError {
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

pub type ToolOutcome<T> = Result<T, ToolError>;

/// A tool the model can call
///
/// Implementations return `Ok` text for anything the model should read,
/// including "nothing found" style answers, and `Err` only for genuine
/// failures.
#[async_trait]
pub trait CourseTool: Send + Sync {
    /// Definition sent to the model; the name must be non-empty
    fn definition(&self) -> Tool;

    /// Run with the model-supplied input object
    async fn execute(&self, input: &Value) -> ToolOutcome<String>;

    /// Citations recorded by the most recent run
    fn last_citations(&self) -> Vec<SourceCitation> {
        Vec::new()
    }

    /// Forget recorded citations
    fn reset_citations(&self) {}
}

/// Capability used by the orchestrator to run a named tool
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute_tool(&self, name: &str, input: &Value) -> ToolOutcome<String>;
}
