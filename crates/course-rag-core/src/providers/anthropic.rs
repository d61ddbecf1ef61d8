//! Anthropic Messages API provider
//!
//! Plain JSON POST to `/v1/messages`; no streaming, since the orchestrator
//! needs the whole response before it can decide on the next round.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderSettings;
use crate::logging::Logger;

use super::error::{ProviderError, ProviderResult};
use super::traits::{MessagesRequest, MessagesResponse, Provider};

/// Default API base URL
pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";

/// Value of the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const PROVIDER: &str = "anthropic";

/// Provider backed by the Anthropic Messages API
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    logger: Arc<dyn Logger>,
}

impl AnthropicProvider {
    /// Create a provider with the default API base
    pub fn new(api_key: impl Into<String>, logger: Arc<dyn Logger>) -> ProviderResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: ANTHROPIC_API_BASE.to_string(),
            logger,
        })
    }

    /// Create a provider from config settings
    pub fn from_settings(settings: &ProviderSettings, logger: Arc<dyn Logger>) -> ProviderResult<Self> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| ProviderError::MissingApiKey)?;
        let provider = Self::new(api_key, logger)?;

        Ok(match &settings.api_base {
            Some(base) => provider.with_api_base(base.clone()),
            None => provider,
        })
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Full URL of the messages endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.api_base.trim_end_matches('/'))
    }
}

/// Decode a 2xx body
fn decode_response(body: &str) -> ProviderResult<MessagesResponse> {
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn create(&self, request: MessagesRequest) -> ProviderResult<MessagesResponse> {
        self.logger.debug(&format!(
            "[AnthropicProvider] POST {} model={} messages={} tools={}",
            self.endpoint(),
            request.model,
            request.messages.len(),
            request.tools.as_ref().map_or(0, Vec::len),
        ));

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = ProviderError::from_status(status.as_u16(), &body);
            self.logger.error(&format!("[AnthropicProvider] {}", err));
            return Err(err);
        }

        decode_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            AnthropicProvider::new("  ", logger()),
            Err(ProviderError::MissingApiKey)
        ));
        assert!(matches!(
            AnthropicProvider::from_settings(&ProviderSettings::default(), logger()),
            Err(ProviderError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_from_settings() {
        let settings = ProviderSettings {
            api_key: Some("sk-test".to_string()),
            api_base: Some("http://localhost:9000/".to_string()),
            ..Default::default()
        };
        let provider = AnthropicProvider::from_settings(&settings, logger()).unwrap();

        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.endpoint(), "http://localhost:9000/v1/messages");

        let default = AnthropicProvider::new("sk-test", logger()).unwrap();
        assert_eq!(default.endpoint(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_decode_response_body() {
        let body = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "tool_use",
            "content": [
                {"type": "text", "text": "Let me search."},
                {"type": "tool_use", "id": "toolu_01", "name": "search_course_content", "input": {"query": "MCP"}}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }"#;
        let response = decode_response(body).unwrap();

        assert!(response.requests_tools());
        assert_eq!(response.output_text(), "Let me search.");
        assert_eq!(response.tool_calls()[0].id, "toolu_01");
    }

    #[test]
    fn test_undecodable_body_is_json_error() {
        let err = decode_response("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, ProviderError::Json(_)));
        assert!(err.to_string().starts_with("Malformed response body: "));
    }
}
