//! Settings structure shared by the provider and the orchestrator

use serde::{Deserialize, Serialize};

use crate::orchestrator::DEFAULT_MAX_ROUNDS;
use crate::providers::DEFAULT_MAX_TOKENS;

use super::error::{ConfigError, ConfigResult};

/// Model used when neither the file nor the environment names one
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Top-level configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RagConfig {
    /// LLM provider settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Round budget settings
    #[serde(default)]
    pub orchestration: OrchestrationSettings,
}

/// Settings for the Anthropic Messages API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Model identifier as used by the API
    #[serde(default = "default_model")]
    pub model: String,
    /// API key; usually supplied through `ANTHROPIC_API_KEY` instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Maximum tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            api_base: None,
            max_tokens: default_max_tokens(),
            temperature: 0.0,
        }
    }
}

/// Settings for the round orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationSettings {
    /// Tool-enabled rounds before the forced synthesis call
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
}

impl Default for OrchestrationSettings {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

impl RagConfig {
    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: RagConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ANTHROPIC_API_KEY` / `ANTHROPIC_MODEL` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup; empty values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("ANTHROPIC_API_KEY") {
            self.provider.api_key = Some(key);
        }
        if let Some(model) = non_empty("ANTHROPIC_MODEL") {
            self.provider.model = model;
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::invalid("provider.model", "must not be empty"));
        }
        if self.provider.max_tokens == 0 {
            return Err(ConfigError::invalid("provider.max_tokens", "must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.provider.temperature) {
            return Err(ConfigError::invalid(
                "provider.temperature",
                format!("{} is outside 0.0..=1.0", self.provider.temperature),
            ));
        }
        Ok(())
    }
}
