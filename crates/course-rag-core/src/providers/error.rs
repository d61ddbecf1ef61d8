//! Provider error types
//!
//! How a Messages API exchange fails:
//!
//! | Situation                          | Variant        |
//! |------------------------------------|----------------|
//! | no key in config or environment    | `MissingApiKey`|
//! | transport failure, unreadable body | `Http`         |
//! | HTTP 429                           | `RateLimited`  |
//! | any other non-2xx status           | `Api`          |
//! | 2xx body that is not a response    | `Json`         |
//! | failure replayed by a test script  | `Scripted`     |

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Anthropic API key is not set (provider.api_key or ANTHROPIC_API_KEY)")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Anthropic rate limited: {message}")]
    RateLimited { message: String },

    /// Non-2xx answer; `kind` is the API's error type, e.g. `overloaded_error`
    #[error("Anthropic API error ({status} {kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Scripted(String),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl ProviderError {
    /// Classify a non-2xx response from its status and raw body
    ///
    /// Bodies that are not the API's `{"error": {...}}` envelope are kept as
    /// the message with kind `unknown`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let (kind, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.kind, envelope.error.message),
            Err(_) if body.trim().is_empty() => ("unknown".to_string(), "empty response body".to_string()),
            Err(_) => ("unknown".to_string(), body.trim().to_string()),
        };

        if status == 429 {
            Self::RateLimited {
                message: format!("{}: {}", kind, message),
            }
        } else {
            Self::Api { status, kind, message }
        }
    }

    /// True for failures worth retrying later (429, 529 overloaded, 5xx)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
