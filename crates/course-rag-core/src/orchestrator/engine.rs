//! Round orchestrator

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ProviderSettings;
use crate::log_error;
use crate::logging::Logger;
use crate::providers::{
    MessagesRequest, MessagesResponse, Provider, ProviderError, ProviderResult, DEFAULT_MAX_TOKENS,
};
use crate::tools::ToolExecutor;
use crate::types::{ContentPart, Tool, ToolChoice, ToolResult};

use super::conversation::Conversation;
use super::error::{OrchestratorError, OrchestratorResult};
use super::stats::CallStatistics;

/// Rounds allowed when the caller has no preference
pub const DEFAULT_MAX_ROUNDS: usize = 2;

/// Base system prompt for course questions
pub const SYSTEM_PROMPT: &str = "You are an assistant for course materials and educational content. You have tools for searching course content and for reading course outlines.

Tools:
- **search_course_content**: specific course content or detailed lesson material
- **get_course_outline**: course structure, lesson lists, or a course overview
- You may call tools in up to 2 separate rounds. Use the first round to gather information and a second round only when you need more specific or additional details
- Base answers on what the tools return
- If the tools find nothing, say so plainly and do not suggest alternatives

Two-round patterns:
- Search a broad topic, then search one aspect of it
- Read a course outline, then search a specific lesson
- Search one course, then search another one to compare

How to respond:
- **General knowledge questions**: answer from your own knowledge without tools
- **Course content questions**: search first, and search again only if needed
- **Outline questions** (\"what lessons are in...\", \"what's covered in...\", \"course outline\"): use the outline tool and give the course title, course link, and every lesson number with its title
- Give the answer only. Do not describe your reasoning or searches, and do not say \"based on the search results\"

Every answer must be:
1. **Brief and focused**
2. **Educational**
3. **Clear**
4. **Backed by examples** when they help understanding
";

/// Model parameters sent with every request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }
}

impl From<&ProviderSettings> for GenerationParams {
    fn from(settings: &ProviderSettings) -> Self {
        Self {
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

#[derive(Debug)]
enum RoundState {
    AwaitingRound,
    Finalizing,
    Done(String),
}

/// Drives the bounded tool-calling loop for one query at a time
///
/// All per-query state is local to `generate_response`; the statistics are
/// the only state shared between calls.
pub struct RoundOrchestrator {
    provider: Arc<dyn Provider>,
    params: GenerationParams,
    stats: Mutex<CallStatistics>,
    logger: Arc<dyn Logger>,
}

fn system_prompt(conversation_history: Option<&str>) -> String {
    match conversation_history {
        Some(history) if !history.is_empty() => {
            format!("{}\n\nPrevious conversation:\n{}", SYSTEM_PROMPT, history)
        }
        _ => SYSTEM_PROMPT.to_string(),
    }
}

impl RoundOrchestrator {
    pub fn new(provider: Arc<dyn Provider>, params: GenerationParams, logger: Arc<dyn Logger>) -> Self {
        Self {
            provider,
            params,
            stats: Mutex::new(CallStatistics::default()),
            logger,
        }
    }

    /// Copy of the statistics collected so far
    pub fn call_stats(&self) -> CallStatistics {
        *self.stats.lock()
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Answer `query`, letting the model call tools for up to `max_rounds` rounds
    ///
    /// Without tool definitions or an executor this is a single call without
    /// tool access. A text answer from the model ends the query at any round;
    /// otherwise the query ends with one tools-disabled synthesis call once
    /// the budget is spent or a tool fails.
    pub async fn generate_response(
        &self,
        query: &str,
        conversation_history: Option<&str>,
        tools: Option<&[Tool]>,
        tool_executor: Option<&dyn ToolExecutor>,
        max_rounds: usize,
    ) -> OrchestratorResult<String> {
        self.stats.lock().record_start();

        let system = system_prompt(conversation_history);
        let mut conversation = Conversation::new(query);

        let (tools, executor) = match (tools.filter(|t| !t.is_empty()), tool_executor) {
            (Some(tools), Some(executor)) => (tools, executor),
            _ => {
                self.logger.debug("[RoundOrchestrator] No tools available, answering directly");
                let response = self
                    .request(&system, &conversation, None)
                    .await
                    .map_err(|source| self.round_failed(1, source))?;
                self.stats.lock().record_outcome(1, false, false);
                return Ok(response.output_text());
            }
        };

        let mut round = 0;
        let mut had_tool_errors = false;
        let mut finalized = false;
        let mut state = if max_rounds == 0 {
            RoundState::Finalizing
        } else {
            RoundState::AwaitingRound
        };

        loop {
            state = match state {
                RoundState::AwaitingRound => {
                    round += 1;
                    self.logger.debug(&format!(
                        "[RoundOrchestrator] Round {}/{} with {} messages",
                        round,
                        max_rounds,
                        conversation.len()
                    ));

                    let response = self
                        .request(&system, &conversation, Some(tools))
                        .await
                        .map_err(|source| self.round_failed(round, source))?;

                    if !response.requests_tools() {
                        RoundState::Done(response.output_text())
                    } else {
                        let failed = self
                            .run_tools(&mut conversation, response.content, executor, round)
                            .await;
                        had_tool_errors |= failed;

                        if failed || round >= max_rounds {
                            RoundState::Finalizing
                        } else {
                            RoundState::AwaitingRound
                        }
                    }
                }
                RoundState::Finalizing => {
                    finalized = true;
                    RoundState::Done(self.finalize(&system, &conversation).await)
                }
                RoundState::Done(answer) => {
                    let reached_max = finalized && round >= max_rounds;
                    self.stats
                        .lock()
                        .record_outcome(round, had_tool_errors, reached_max);
                    self.logger.info(&format!(
                        "[RoundOrchestrator] Answered after {} round(s), finalized={}, tool_errors={}",
                        round, finalized, had_tool_errors
                    ));
                    return Ok(answer);
                }
            };
        }
    }

    async fn request(
        &self,
        system: &str,
        conversation: &Conversation,
        tools: Option<&[Tool]>,
    ) -> ProviderResult<MessagesResponse> {
        let mut request = MessagesRequest::new(
            self.params.model.clone(),
            system,
            conversation.messages().to_vec(),
        )
        .with_max_tokens(self.params.max_tokens)
        .with_temperature(self.params.temperature);

        if let Some(tools) = tools {
            request = request.with_tools(tools.to_vec(), ToolChoice::Auto);
        }

        self.provider.create(request).await
    }

    fn round_failed(&self, round: usize, source: ProviderError) -> OrchestratorError {
        log_error!(
            self.logger,
            "[RoundOrchestrator] API call failed in round {} ({}): {}",
            round,
            if source.is_transient() { "transient" } else { "permanent" },
            source
        );
        OrchestratorError::RoundFailed { round, source }
    }

    /// Dispatch every tool call of the response in order and append the round
    ///
    /// Returns true if any dispatch failed.
    async fn run_tools(
        &self,
        conversation: &mut Conversation,
        content: Vec<ContentPart>,
        executor: &dyn ToolExecutor,
        round: usize,
    ) -> bool {
        let calls: Vec<_> = content.iter().filter_map(ContentPart::as_tool_call).collect();
        let mut results = Vec::with_capacity(calls.len());
        let mut failed = false;

        for call in &calls {
            match executor.execute_tool(&call.name, &call.input).await {
                Ok(output) => results.push(ToolResult::success(&call.id, output)),
                Err(e) => {
                    self.logger.warn(&format!(
                        "[RoundOrchestrator] Tool '{}' failed in round {}: {}",
                        call.name, round, e
                    ));
                    failed = true;
                    results.push(ToolResult::error(
                        &call.id,
                        format!("Tool execution error in round {}: {}", round, e),
                    ));
                }
            }
        }

        conversation.push_tool_round(content, results);
        failed
    }

    /// Tools-disabled synthesis call; failures become the answer text
    async fn finalize(&self, system: &str, conversation: &Conversation) -> String {
        match self.request(system, conversation, None).await {
            Ok(response) => response.output_text(),
            Err(e) => {
                self.logger.error(&format!("[RoundOrchestrator] Final response failed: {}", e));
                format!("Error generating final response: {}", e)
            }
        }
    }
}
