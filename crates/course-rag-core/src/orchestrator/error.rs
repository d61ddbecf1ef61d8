//! Orchestrator errors

use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// The LLM call of a tool-enabled round failed
    #[error("API call failed in round {round}: {source}")]
    RoundFailed {
        round: usize,
        #[source]
        source: ProviderError,
    },
}

impl OrchestratorError {
    /// Round in which the failure happened
    pub fn round(&self) -> usize {
        match self {
            OrchestratorError::RoundFailed { round, .. } => *round,
        }
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
