//! Question answering over the course tools
//!
//! `CourseAssistant` wires a provider, the standard course tools and the
//! round orchestrator together and returns the answer with the sources the
//! tools recorded while producing it.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::config::RagConfig;
use crate::logging::Logger;
use crate::orchestrator::{
    CallStatistics, GenerationParams, OrchestratorResult, RoundOrchestrator,
};
use crate::providers::{create_provider, Provider, ProviderError};
use crate::store::CourseStore;
use crate::tools::{course_tools, ToolError, ToolExecutor, ToolRegistry};
use crate::types::SourceCitation;
use crate::{log_debug, log_info};

/// Failures while assembling an assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

pub type AssistantResult<T> = Result<T, AssistantError>;

/// Answer text plus the citations gathered for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<SourceCitation>,
}

pub struct CourseAssistant {
    orchestrator: RoundOrchestrator,
    tools: Arc<ToolRegistry>,
    max_rounds: usize,
    logger: Arc<dyn Logger>,
}

impl CourseAssistant {
    pub fn new(
        orchestrator: RoundOrchestrator,
        tools: Arc<ToolRegistry>,
        max_rounds: usize,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            orchestrator,
            tools,
            max_rounds,
            logger,
        }
    }

    /// Assistant over `store` with the standard tools and the given provider
    pub fn with_provider(
        provider: Arc<dyn Provider>,
        config: &RagConfig,
        store: Arc<dyn CourseStore>,
        logger: Arc<dyn Logger>,
    ) -> AssistantResult<Self> {
        let tools = Arc::new(course_tools(store, Arc::clone(&logger))?);
        let orchestrator = RoundOrchestrator::new(
            provider,
            GenerationParams::from(&config.provider),
            Arc::clone(&logger),
        );
        Ok(Self::new(
            orchestrator,
            tools,
            config.orchestration.max_rounds,
            logger,
        ))
    }

    /// Assistant talking to the provider described by `config`
    pub fn from_config(
        config: &RagConfig,
        store: Arc<dyn CourseStore>,
        logger: Arc<dyn Logger>,
    ) -> AssistantResult<Self> {
        let provider = create_provider(&config.provider, Arc::clone(&logger))?;
        Self::with_provider(provider, config, store, logger)
    }

    /// Answer one question
    ///
    /// Citations left over from an earlier query are cleared first. With
    /// concurrent queries on one assistant the sources may belong to
    /// whichever query searched last.
    pub async fn query(
        &self,
        query: &str,
        conversation_history: Option<&str>,
    ) -> OrchestratorResult<QueryAnswer> {
        log_debug!(self.logger, "[CourseAssistant] Query: {}", query);
        self.tools.reset_citations();

        let definitions = self.tools.definitions();
        let executor: &dyn ToolExecutor = self.tools.as_ref();
        let answer = self
            .orchestrator
            .generate_response(
                query,
                conversation_history,
                Some(definitions.as_slice()),
                Some(executor),
                self.max_rounds,
            )
            .await?;

        let sources = self.tools.last_citations();
        log_info!(
            self.logger,
            "[CourseAssistant] Answered with {} source(s)",
            sources.len()
        );
        Ok(QueryAnswer { answer, sources })
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn call_stats(&self) -> CallStatistics {
        self.orchestrator.call_stats()
    }
}
