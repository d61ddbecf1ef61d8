//! Scripted provider for testing
//!
//! Replays a queue of canned responses without network access and records
//! every request it receives, so tests can assert on call counts, tool
//! definitions and the exact message list of each round.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::traits::{MessagesRequest, MessagesResponse, Provider, StopReason};
use crate::logging::Logger;
use crate::types::ToolCall;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this response
    Respond(MessagesResponse),
    /// Fail the call with this message
    Fail(String),
}

impl ScriptedReply {
    /// An `end_turn` text answer
    pub fn text(text: impl Into<String>) -> Self {
        ScriptedReply::Respond(MessagesResponse::text(StopReason::EndTurn, text))
    }

    /// A `tool_use` response with a single call
    pub fn tool_call(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        Self::tool_calls(vec![ToolCall::new(id, name, input)])
    }

    /// A `tool_use` response with several calls in one round
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        ScriptedReply::Respond(MessagesResponse::tool_use(calls))
    }

    /// A failing call
    pub fn fail(message: impl Into<String>) -> Self {
        ScriptedReply::Fail(message.into())
    }
}

/// Mock LLM provider that replays a script
pub struct ScriptedProvider {
    script: Mutex<VecDeque<ScriptedReply>>,
    fallback: Option<ScriptedReply>,
    requests: Mutex<Vec<MessagesRequest>>,
    logger: Arc<dyn Logger>,
}

impl ScriptedProvider {
    /// Create a provider that replays `replies` in order
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>, logger: Arc<dyn Logger>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().collect()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Reply used once the script runs out
    pub fn with_fallback(mut self, reply: ScriptedReply) -> Self {
        self.fallback = Some(reply);
        self
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<MessagesRequest> {
        self.requests.lock().clone()
    }

    /// Number of `create` calls so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Replies still queued
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn create(&self, request: MessagesRequest) -> ProviderResult<MessagesResponse> {
        let call = {
            let mut requests = self.requests.lock();
            requests.push(request);
            requests.len()
        };

        let next = self.script.lock().pop_front().or_else(|| self.fallback.clone());
        self.logger.debug(&format!("[ScriptedProvider] call {}: {:?}", call, next));

        match next {
            Some(ScriptedReply::Respond(response)) => Ok(response),
            Some(ScriptedReply::Fail(message)) => Err(ProviderError::Scripted(message)),
            None => Err(ProviderError::Scripted(format!("script exhausted at call {}", call))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::ChatMessage;
    use serde_json::json;

    fn request(text: &str) -> MessagesRequest {
        MessagesRequest::new("mock-model", "system", vec![ChatMessage::user(text)])
    }

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let provider = ScriptedProvider::new(
            [
                ScriptedReply::tool_call("toolu_1", "search_course_content", json!({ "query": "x" })),
                ScriptedReply::text("done"),
            ],
            Arc::new(NoOpLogger::new()),
        );

        let first = provider.create(request("one")).await.unwrap();
        assert!(first.requests_tools());
        let second = provider.create(request("two")).await.unwrap();
        assert_eq!(second.output_text(), "done");

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.requests()[1].messages[0].text(), Some("two"));
        assert!(provider.create(request("three")).await.is_err());
    }

    #[tokio::test]
    async fn test_fallback_and_failures() {
        let provider = ScriptedProvider::new([ScriptedReply::fail("overloaded")], Arc::new(NoOpLogger::new()))
            .with_fallback(ScriptedReply::text("again"));

        let err = provider.create(request("a")).await.unwrap_err();
        assert_eq!(err.to_string(), "overloaded");

        for _ in 0..3 {
            assert_eq!(provider.create(request("b")).await.unwrap().output_text(), "again");
        }
        assert_eq!(provider.remaining(), 0);
    }
}
