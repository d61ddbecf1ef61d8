//! Course RAG Core
//!
//! Tool-calling question answering over course material. A query goes to
//! the model together with the course tools; the model may search content
//! or fetch an outline for a bounded number of rounds before it must answer.
//!
//! ## Orchestration
//!
//! ```rust,ignore
//! use course_rag_core::{CourseAssistant, FileConfigProvider, ConsoleLogger, MemoryCourseStore};
//!
//! let config = FileConfigProvider::resolve(&[&FileConfigProvider::user()])?;
//! let assistant = CourseAssistant::from_config(&config, Arc::new(store), Arc::new(ConsoleLogger::new()))?;
//!
//! let answer = assistant.query("What does lesson 2 of the MCP course cover?", None).await?;
//! println!("{}", answer.answer);
//! for source in &answer.sources {
//!     println!("  {}", source.text);
//! }
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod providers;
pub mod store;
pub mod tools;
pub mod orchestrator;
pub mod assistant;

// Re-export commonly used types
pub use types::{
    ChatMessage, ContentPart, MessageRole, MessageContent,
    Tool, ToolCall, ToolResult, ToolChoice,
    SourceCitation,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, MemoryLogger};

pub use config::{RagConfig, FileConfigProvider, ConfigError};

pub use providers::{Provider, AnthropicProvider, ScriptedProvider, ProviderError};

pub use store::{CourseStore, MemoryCourseStore, SearchResults};

pub use tools::{CourseTool, ToolExecutor, ToolRegistry, CourseSearchTool, CourseOutlineTool, course_tools};

pub use orchestrator::{RoundOrchestrator, CallStatistics, OrchestratorError, DEFAULT_MAX_ROUNDS};

pub use assistant::{CourseAssistant, QueryAnswer, AssistantError};
