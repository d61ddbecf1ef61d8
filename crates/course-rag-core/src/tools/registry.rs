//! Tool registry for managing LLM tool calling
//!
//! The ToolRegistry is the central component for:
//! - Holding tool implementations keyed by name, in registration order
//! - Converting them to the definitions sent with each tool-enabled round
//! - Dispatching tool calls by name
//! - Collecting UI-facing citations from the tools

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::log_warn;
use crate::logging::Logger;
use crate::types::{SourceCitation, Tool};

use super::traits::{CourseTool, ToolError, ToolExecutor, ToolOutcome};

/// Tool registry for managing available tools
pub struct ToolRegistry {
    /// Registered tools with their names, in registration order
    tools: RwLock<Vec<(String, Arc<dyn CourseTool>)>>,
    /// Logger
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Create an empty tool registry
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            tools: RwLock::new(Vec::new()),
            logger,
        }
    }

    /// Register a tool under the name from its definition
    ///
    /// Registering a second tool under an existing name replaces the first
    /// one in place; the replacement is logged as a warning.
    pub fn register(&self, tool: Arc<dyn CourseTool>) -> ToolOutcome<()> {
        let name = tool.definition().name;
        if name.trim().is_empty() {
            return Err(ToolError::MissingName);
        }

        let mut tools = self.tools.write();
        if let Some(slot) = tools.iter_mut().find(|(n, _)| *n == name) {
            log_warn!(
                self.logger,
                "[ToolRegistry] Tool '{}' registered twice, replacing the earlier registration",
                name
            );
            slot.1 = tool;
        } else {
            self.logger.debug(&format!("[ToolRegistry] Registered tool: {}", name));
            tools.push((name, tool));
        }
        Ok(())
    }

    /// Definitions for the LLM `tools` parameter, in registration order
    pub fn definitions(&self) -> Vec<Tool> {
        self.tools.read().iter().map(|(_, t)| t.definition()).collect()
    }

    /// Names of all registered tools
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.read().iter().map(|(n, _)| n.clone()).collect()
    }

    /// Get count of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.read().len()
    }

    fn get(&self, name: &str) -> Option<Arc<dyn CourseTool>> {
        self.tools
            .read()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| Arc::clone(t))
    }

    /// Execute a tool by name
    ///
    /// An unknown name is answered with text rather than an error so that a
    /// bad reference from the model never aborts a round. Failures raised by
    /// the tool itself are returned as `Err`.
    pub async fn execute(&self, name: &str, input: &Value) -> ToolOutcome<String> {
        let Some(tool) = self.get(name) else {
            self.logger.warn(&format!("[ToolRegistry] Tool not found: {}", name));
            return Ok(format!("Tool '{}' not found", name));
        };

        self.logger.info(&format!("[ToolRegistry] Calling tool: {}", name));
        tool.execute(input).await
    }

    /// First non-empty citation list among the registered tools
    pub fn last_citations(&self) -> Vec<SourceCitation> {
        self.tools
            .read()
            .iter()
            .map(|(_, t)| t.last_citations())
            .find(|c| !c.is_empty())
            .unwrap_or_default()
    }

    /// Clear citation state on every tool
    pub fn reset_citations(&self) {
        for (_, tool) in self.tools.read().iter() {
            tool.reset_citations();
        }
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute_tool(&self, name: &str, input: &Value) -> ToolOutcome<String> {
        self.execute(name, input).await
    }
}
