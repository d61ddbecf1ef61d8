//! Tool management module
//!
//! Tools the model may call while answering a question about the course
//! catalog, and the registry that exposes and dispatches them.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  RoundOrchestrator                          │
//! │    definitions() ──► LLM `tools` parameter  │
//! │    execute_tool(name, input)                │
//! └─────────────────────────────────────────────┘
//!           │
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  ToolRegistry                               │
//! │    search_course_content  (citations)       │
//! │    get_course_outline                       │
//! └─────────────────────────────────────────────┘
//!           │
//!           ▼
//!      CourseStore (vector store)
//! ```
//!
//! Citation state lives on the tool instances. Two queries running at the
//! same time against one registry overwrite each other's citations (last
//! writer wins); serialize them or give each query its own registry.

mod traits;
mod registry;
mod search;
mod outline;

pub use traits::{CourseTool, ToolError, ToolExecutor, ToolOutcome};
pub use registry::ToolRegistry;
pub use search::{CourseSearchTool, SEARCH_TOOL_NAME};
pub use outline::{CourseOutlineTool, OUTLINE_TOOL_NAME};

use std::sync::Arc;

use crate::logging::Logger;
use crate::store::CourseStore;

/// Registry with the standard search and outline tools over `store`
pub fn course_tools(store: Arc<dyn CourseStore>, logger: Arc<dyn Logger>) -> ToolOutcome<ToolRegistry> {
    let registry = ToolRegistry::new(logger);
    registry.register(Arc::new(CourseSearchTool::new(Arc::clone(&store))))?;
    registry.register(Arc::new(CourseOutlineTool::new(store)))?;
    Ok(registry)
}
