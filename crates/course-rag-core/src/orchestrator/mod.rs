//! Sequential tool-calling orchestration
//!
//! Drives up to `max_rounds` tool-enabled LLM calls for one query and then
//! guarantees a textual answer:
//!
//! ```text
//! AwaitingRound ──end_turn──────────────────────────────► Done
//! AwaitingRound ──tool_use, rounds left, no tool error──► AwaitingRound
//! AwaitingRound ──tool_use, budget spent or tool error──► Finalizing ──► Done
//! ```
//!
//! Finalizing is one extra call without tool definitions, so the model
//! cannot ask for more tools. A provider failure inside a round is returned
//! as `OrchestratorError::RoundFailed`; a provider failure while finalizing
//! becomes the returned answer text.
//!
//! Nothing here enforces a deadline. Wrap `generate_response` in
//! `tokio::time::timeout` when one is needed; there is no mid-round
//! checkpoint to resume from.

mod conversation;
mod engine;
mod error;
mod stats;

pub use conversation::Conversation;
pub use engine::{RoundOrchestrator, GenerationParams, SYSTEM_PROMPT, DEFAULT_MAX_ROUNDS};
pub use error::{OrchestratorError, OrchestratorResult};
pub use stats::CallStatistics;
