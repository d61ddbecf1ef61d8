//! UI-facing source citations

use serde::{Deserialize, Serialize};

/// Pointer to the course material backing an answer
///
/// Distinct from the raw tool-result text fed to the model: citations are
/// what the UI renders next to the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    /// Display text, e.g. "Intro to MCP - Lesson 2"
    pub text: String,
    /// Lesson link, when the store knows one
    #[serde(default)]
    pub link: Option<String>,
}

impl SourceCitation {
    /// Create a citation without a link
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    /// Set the link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_serializes_missing_link_as_null() {
        let citation = SourceCitation::new("Test Course - Lesson 1");
        let json = serde_json::to_value(&citation).unwrap();
        assert_eq!(json["text"], "Test Course - Lesson 1");
        assert!(json["link"].is_null());

        let linked = citation.with_link("https://example.com/lesson-1");
        assert_eq!(linked.link.as_deref(), Some("https://example.com/lesson-1"));
    }
}
