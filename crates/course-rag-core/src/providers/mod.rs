//! LLM provider boundary
//!
//! The orchestrator only sees the `Provider` trait: one non-streaming
//! `create` call per round, shaped like the Anthropic Messages API.
//!
//! - `AnthropicProvider` talks to the real API over `reqwest`
//! - `ScriptedProvider` replays canned responses and records requests (tests)

mod traits;
mod error;
mod anthropic;
mod mock;

pub use traits::{Provider, MessagesRequest, MessagesResponse, StopReason, DEFAULT_MAX_TOKENS};
pub use error::{ProviderError, ProviderResult};
pub use anthropic::{AnthropicProvider, ANTHROPIC_API_BASE, ANTHROPIC_VERSION};
pub use mock::{ScriptedProvider, ScriptedReply};

use std::sync::Arc;

use crate::config::ProviderSettings;
use crate::logging::Logger;

/// Create the provider described by the settings
pub fn create_provider(settings: &ProviderSettings, logger: Arc<dyn Logger>) -> ProviderResult<Arc<dyn Provider>> {
    let provider = AnthropicProvider::from_settings(settings, logger)?;
    Ok(Arc::new(provider))
}
