//! Course store trait and result types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata stored next to each content chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default = "unknown_course")]
    pub course_title: String,
    #[serde(default)]
    pub lesson_number: Option<i64>,
}

fn unknown_course() -> String {
    "unknown".to_string()
}

/// Result of a unified search
///
/// Store-side failures are carried in `error` rather than raised, so the
/// search tool can hand them to the model as ordinary content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub documents: Vec<String>,
    pub metadata: Vec<ChunkMetadata>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Results carrying only an error message
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn push(&mut self, document: impl Into<String>, metadata: ChunkMetadata) {
        self.documents.push(document.into());
        self.metadata.push(metadata);
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Catalog record for one course
///
/// `lessons_json` is kept exactly as stored (a JSON array of
/// `LessonEntry`); readers must cope with it being malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub course_link: Option<String>,
    #[serde(default = "empty_lessons")]
    pub lessons_json: String,
}

fn empty_lessons() -> String {
    "[]".to_string()
}

/// One element of `CatalogEntry::lessons_json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonEntry {
    /// Missing in partly ingested catalogs
    #[serde(default)]
    pub lesson_number: Option<i64>,
    #[serde(default)]
    pub lesson_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_link: Option<String>,
}

impl CatalogEntry {
    /// Parse the stored lesson list
    pub fn lessons(&self) -> Result<Vec<LessonEntry>, serde_json::Error> {
        serde_json::from_str(&self.lessons_json)
    }
}

/// Errors raised by store lookups
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Capabilities the tools need from the vector store
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Unified search with fuzzy course-name resolution and optional lesson filter
    async fn search(
        &self,
        query: &str,
        course_name: Option<&str>,
        lesson_number: Option<i64>,
    ) -> SearchResults;

    /// Canonical course title for a possibly partial name
    async fn resolve_course_name(&self, partial: &str) -> Option<String>;

    /// Link of one lesson, if known
    async fn lesson_link(&self, course_title: &str, lesson_number: i64) -> Option<String>;

    /// Catalog record keyed by canonical course title
    async fn catalog_entry(&self, course_title: &str) -> StoreResult<Option<CatalogEntry>>;
}
