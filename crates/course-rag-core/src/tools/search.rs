//! Content search tool

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::store::{CourseStore, SearchResults};
use crate::types::{SourceCitation, Tool};

use super::traits::{CourseTool, ToolError, ToolOutcome};

pub const SEARCH_TOOL_NAME: &str = "search_course_content";

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    course_name: Option<String>,
    #[serde(default)]
    lesson_number: Option<i64>,
}

/// Searches course content with fuzzy course matching and lesson filtering
///
/// Each successful search replaces the recorded citations with one entry
/// per returned document.
pub struct CourseSearchTool {
    store: Arc<dyn CourseStore>,
    last_citations: RwLock<Vec<SourceCitation>>,
}

impl CourseSearchTool {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self {
            store,
            last_citations: RwLock::new(Vec::new()),
        }
    }

    async fn format_results(&self, results: &SearchResults) -> String {
        let mut formatted = Vec::with_capacity(results.len());
        let mut citations = Vec::with_capacity(results.len());

        for (doc, meta) in results.documents.iter().zip(&results.metadata) {
            let label = match meta.lesson_number {
                Some(n) => format!("{} - Lesson {}", meta.course_title, n),
                None => meta.course_title.clone(),
            };

            let link = match meta.lesson_number {
                Some(n) => self.store.lesson_link(&meta.course_title, n).await,
                None => None,
            };

            formatted.push(format!("[{}]\n{}", label, doc));
            citations.push(SourceCitation { text: label, link });
        }

        *self.last_citations.write() = citations;
        formatted.join("\n\n")
    }
}

fn no_content_message(args: &SearchArgs) -> String {
    let mut filters = String::new();
    if let Some(course) = &args.course_name {
        filters.push_str(&format!(" in course '{}'", course));
    }
    if let Some(lesson) = args.lesson_number {
        filters.push_str(&format!(" in lesson {}", lesson));
    }
    format!("No relevant content found{}.", filters)
}

#[async_trait]
impl CourseTool for CourseSearchTool {
    fn definition(&self) -> Tool {
        Tool::new(
            SEARCH_TOOL_NAME,
            "Search course materials with smart course name matching and lesson filtering",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What to search for in the course content"
                },
                "course_name": {
                    "type": "string",
                    "description": "Course title (partial matches work, e.g. 'MCP', 'Introduction')"
                },
                "lesson_number": {
                    "type": "integer",
                    "description": "Specific lesson number to search within (e.g. 1, 2, 3)"
                }
            },
            "required": ["query"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome<String> {
        let args: SearchArgs = serde_json::from_value(input.clone())
            .map_err(|e| ToolError::invalid_arguments(SEARCH_TOOL_NAME, e.to_string()))?;

        let results = self
            .store
            .search(&args.query, args.course_name.as_deref(), args.lesson_number)
            .await;

        if let Some(error) = results.error {
            return Ok(error);
        }
        if results.is_empty() {
            return Ok(no_content_message(&args));
        }

        Ok(self.format_results(&results).await)
    }

    fn last_citations(&self) -> Vec<SourceCitation> {
        self.last_citations.read().clone()
    }

    fn reset_citations(&self) {
        self.last_citations.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Course, CourseChunk, Lesson, MemoryCourseStore};

    fn store() -> Arc<MemoryCourseStore> {
        let store = MemoryCourseStore::new();
        store.add_course(
            Course {
                title: "Building Towards Computer Use".to_string(),
                instructor: Some("Colt".to_string()),
                course_link: None,
                lessons: vec![Lesson {
                    lesson_number: 1,
                    title: "Overview".to_string(),
                    lesson_link: Some("https://example.com/cu/1".to_string()),
                }],
            },
            vec![
                CourseChunk {
                    text: "Computer use lets the model drive a desktop".to_string(),
                    course_title: "Building Towards Computer Use".to_string(),
                    lesson_number: Some(1),
                },
                CourseChunk {
                    text: "Course wrap-up notes".to_string(),
                    course_title: "Building Towards Computer Use".to_string(),
                    lesson_number: None,
                },
            ],
        );
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_formats_results_and_records_citations() {
        let tool = CourseSearchTool::new(store());
        let text = tool
            .execute(&json!({ "query": "computer use desktop", "course_name": "Computer" }))
            .await
            .unwrap();

        assert_eq!(
            text,
            "[Building Towards Computer Use - Lesson 1]\nComputer use lets the model drive a desktop\n\n\
             [Building Towards Computer Use]\nCourse wrap-up notes"
        );
        assert_eq!(
            tool.last_citations(),
            vec![
                SourceCitation::new("Building Towards Computer Use - Lesson 1")
                    .with_link("https://example.com/cu/1"),
                SourceCitation::new("Building Towards Computer Use"),
            ]
        );
    }

    #[tokio::test]
    async fn test_new_search_replaces_citations() {
        let tool = CourseSearchTool::new(store());
        tool.execute(&json!({ "query": "computer" })).await.unwrap();
        assert_eq!(tool.last_citations().len(), 2);

        tool.execute(&json!({ "query": "computer", "lesson_number": 1 })).await.unwrap();
        assert_eq!(tool.last_citations().len(), 1);

        tool.reset_citations();
        assert!(tool.last_citations().is_empty());
    }

    #[tokio::test]
    async fn test_empty_results_name_filters() {
        let tool = CourseSearchTool::new(store());
        let text = tool
            .execute(&json!({ "query": "x", "course_name": "Computer", "lesson_number": 9 }))
            .await
            .unwrap();
        assert_eq!(text, "No relevant content found in course 'Computer' in lesson 9.");

        let text = tool.execute(&json!({ "query": "x", "lesson_number": 0 })).await.unwrap();
        assert_eq!(text, "No relevant content found in lesson 0.");
    }

    #[tokio::test]
    async fn test_store_error_returned_verbatim() {
        let tool = CourseSearchTool::new(store());
        let text = tool
            .execute(&json!({ "query": "x", "course_name": "Cooking" }))
            .await
            .unwrap();
        assert_eq!(text, "No course found matching 'Cooking'");
        assert!(tool.last_citations().is_empty());
    }

    #[tokio::test]
    async fn test_missing_query_is_a_tool_failure() {
        let tool = CourseSearchTool::new(store());
        let err = tool.execute(&json!({ "course_name": "Computer" })).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn test_definition_schema() {
        let tool = CourseSearchTool::new(store());
        let def = tool.definition();
        assert_eq!(def.name, SEARCH_TOOL_NAME);
        assert_eq!(def.required_params(), vec!["query"]);
        assert_eq!(def.input_schema["properties"]["lesson_number"]["type"], "integer");
    }
}
