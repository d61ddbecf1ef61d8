//! Course outline tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::store::{CatalogEntry, CourseStore};
use crate::types::Tool;

use super::traits::{CourseTool, ToolError, ToolOutcome};

pub const OUTLINE_TOOL_NAME: &str = "get_course_outline";

#[derive(Debug, Deserialize)]
struct OutlineArgs {
    course_name: String,
}

/// Returns title, instructor, link and lesson list of one course
pub struct CourseOutlineTool {
    store: Arc<dyn CourseStore>,
}

impl CourseOutlineTool {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }
}

fn format_outline(entry: &CatalogEntry, resolved_title: &str) -> Result<String, serde_json::Error> {
    let lessons = entry.lessons()?;
    let title = if entry.title.is_empty() { resolved_title } else { entry.title.as_str() };

    let mut lines = vec![
        format!("Course: {}", title),
        format!("Instructor: {}", entry.instructor.as_deref().unwrap_or("Unknown")),
    ];
    if let Some(link) = &entry.course_link {
        lines.push(format!("Course Link: {}", link));
    }

    lines.push(format!("\nLessons ({} total):", lessons.len()));
    for lesson in &lessons {
        let title = lesson.lesson_title.as_deref().unwrap_or("Untitled");
        lines.push(match lesson.lesson_number {
            Some(n) => format!("  Lesson {}: {}", n, title),
            None => format!("  Lesson: {}", title),
        });
    }

    Ok(lines.join("\n"))
}

#[async_trait]
impl CourseTool for CourseOutlineTool {
    fn definition(&self) -> Tool {
        Tool::new(
            OUTLINE_TOOL_NAME,
            "Get course outline including title, link, and complete list of lessons",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "course_name": {
                    "type": "string",
                    "description": "Course title or partial title to get outline for (e.g. 'MCP', 'Introduction')"
                }
            },
            "required": ["course_name"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome<String> {
        let args: OutlineArgs = serde_json::from_value(input.clone())
            .map_err(|e| ToolError::invalid_arguments(OUTLINE_TOOL_NAME, e.to_string()))?;

        let Some(title) = self.store.resolve_course_name(&args.course_name).await else {
            return Ok(format!("No course found matching '{}'", args.course_name));
        };

        let entry = match self.store.catalog_entry(&title).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return Ok(format!("Course '{}' not found in catalog", title)),
            Err(e) => return Ok(format!("Error retrieving course outline: {}", e)),
        };

        Ok(format_outline(&entry, &title)
            .unwrap_or_else(|e| format!("Error retrieving course outline: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Course, Lesson, MemoryCourseStore, StoreError, StoreResult, SearchResults};

    fn store() -> Arc<MemoryCourseStore> {
        let store = MemoryCourseStore::new();
        store.add_course(
            Course {
                title: "MCP: Build Rich-Context AI Apps".to_string(),
                instructor: Some("Elie Schoppik".to_string()),
                course_link: Some("https://example.com/mcp".to_string()),
                lessons: vec![
                    Lesson {
                        lesson_number: 0,
                        title: "Introduction".to_string(),
                        lesson_link: None,
                    },
                    Lesson {
                        lesson_number: 1,
                        title: "Why MCP".to_string(),
                        lesson_link: None,
                    },
                ],
            },
            vec![],
        );
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_outline_formatting() {
        let tool = CourseOutlineTool::new(store());
        let text = tool.execute(&json!({ "course_name": "mcp" })).await.unwrap();

        assert_eq!(
            text,
            "Course: MCP: Build Rich-Context AI Apps\n\
             Instructor: Elie Schoppik\n\
             Course Link: https://example.com/mcp\n\
             \n\
             Lessons (2 total):\n  \
             Lesson 0: Introduction\n  \
             Lesson 1: Why MCP"
        );
    }

    #[tokio::test]
    async fn test_missing_instructor_and_link() {
        let store = store();
        store.put_catalog_entry(CatalogEntry {
            title: "MCP: Build Rich-Context AI Apps".to_string(),
            instructor: None,
            course_link: None,
            lessons_json: r#"[{"lesson_number":3}]"#.to_string(),
        });
        let tool = CourseOutlineTool::new(store);
        let text = tool.execute(&json!({ "course_name": "MCP" })).await.unwrap();

        assert!(text.contains("Instructor: Unknown"));
        assert!(!text.contains("Course Link"));
        assert!(text.ends_with("Lesson 3: Untitled"));
    }

    #[tokio::test]
    async fn test_unresolved_and_uncatalogued_courses() {
        let store = store();
        let tool = CourseOutlineTool::new(store.clone());

        let text = tool.execute(&json!({ "course_name": "Rust" })).await.unwrap();
        assert_eq!(text, "No course found matching 'Rust'");

        store.remove_catalog_entry("MCP: Build Rich-Context AI Apps");
        let text = tool.execute(&json!({ "course_name": "MCP" })).await.unwrap();
        assert_eq!(text, "Course 'MCP: Build Rich-Context AI Apps' not found in catalog");
    }

    #[tokio::test]
    async fn test_unnumbered_lesson_keeps_outline() {
        let store = store();
        store.put_catalog_entry(CatalogEntry {
            title: "MCP: Build Rich-Context AI Apps".to_string(),
            instructor: None,
            course_link: None,
            lessons_json: r#"[{"lesson_title":"Intro"},{"lesson_number":2,"lesson_title":"Servers"}]"#
                .to_string(),
        });
        let tool = CourseOutlineTool::new(store);

        let text = tool.execute(&json!({ "course_name": "MCP" })).await.unwrap();
        assert!(text.ends_with("Lessons (2 total):\n  Lesson: Intro\n  Lesson 2: Servers"));
    }

    #[tokio::test]
    async fn test_malformed_lessons_return_error_text() {
        let store = store();
        store.put_catalog_entry(CatalogEntry {
            title: "MCP: Build Rich-Context AI Apps".to_string(),
            instructor: None,
            course_link: None,
            lessons_json: "[{broken".to_string(),
        });
        let tool = CourseOutlineTool::new(store);

        let text = tool.execute(&json!({ "course_name": "MCP" })).await.unwrap();
        assert!(text.starts_with("Error retrieving course outline: "));
    }

    struct OfflineCatalog;

    #[async_trait]
    impl CourseStore for OfflineCatalog {
        async fn search(&self, _: &str, _: Option<&str>, _: Option<i64>) -> SearchResults {
            SearchResults::empty()
        }

        async fn resolve_course_name(&self, partial: &str) -> Option<String> {
            Some(partial.to_string())
        }

        async fn lesson_link(&self, _: &str, _: i64) -> Option<String> {
            None
        }

        async fn catalog_entry(&self, _: &str) -> StoreResult<Option<CatalogEntry>> {
            Err(StoreError::Unavailable("catalog offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_catalog_failure_return_error_text() {
        let tool = CourseOutlineTool::new(Arc::new(OfflineCatalog));
        let text = tool.execute(&json!({ "course_name": "Any" })).await.unwrap();
        assert_eq!(text, "Error retrieving course outline: Store unavailable: catalog offline");
    }

    #[tokio::test]
    async fn test_missing_course_name_is_a_tool_failure() {
        let tool = CourseOutlineTool::new(store());
        assert!(tool.execute(&json!({})).await.is_err());
    }
}
