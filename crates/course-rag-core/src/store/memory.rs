//! In-memory course store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::traits::{
    CatalogEntry, ChunkMetadata, CourseStore, LessonEntry, SearchResults, StoreResult,
};

/// Lesson of a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_number: i64,
    pub title: String,
    #[serde(default)]
    pub lesson_link: Option<String>,
}

/// Course with its lessons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub course_link: Option<String>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Searchable chunk of course content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseChunk {
    pub text: String,
    pub course_title: String,
    #[serde(default)]
    pub lesson_number: Option<i64>,
}

#[derive(Default)]
struct StoreState {
    courses: Vec<Course>,
    catalog: HashMap<String, CatalogEntry>,
    chunks: Vec<CourseChunk>,
}

/// Course store holding everything in memory
///
/// Course names resolve case-insensitively: an exact title match wins,
/// otherwise the first title containing the partial name. Chunks are ranked
/// by how many query words they contain.
pub struct MemoryCourseStore {
    state: RwLock<StoreState>,
    max_results: usize,
}

impl Default for MemoryCourseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            max_results: 5,
        }
    }

    /// Limit the number of documents returned per search
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Add a course, its catalog entry and its content chunks
    pub fn add_course(&self, course: Course, chunks: Vec<CourseChunk>) {
        let lessons: Vec<LessonEntry> = course
            .lessons
            .iter()
            .map(|l| LessonEntry {
                lesson_number: Some(l.lesson_number),
                lesson_title: Some(l.title.clone()),
                lesson_link: l.lesson_link.clone(),
            })
            .collect();
        let entry = CatalogEntry {
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            course_link: course.course_link.clone(),
            lessons_json: serde_json::to_string(&lessons).unwrap_or_else(|_| "[]".to_string()),
        };

        let mut state = self.state.write();
        state.courses.retain(|c| c.title != course.title);
        state.chunks.retain(|c| c.course_title != course.title);
        state.catalog.insert(course.title.clone(), entry);
        state.courses.push(course);
        state.chunks.extend(chunks);
    }

    /// Replace the raw catalog entry of a course
    pub fn put_catalog_entry(&self, entry: CatalogEntry) {
        self.state.write().catalog.insert(entry.title.clone(), entry);
    }

    /// Drop the catalog entry of a course, keeping its content
    pub fn remove_catalog_entry(&self, title: &str) -> Option<CatalogEntry> {
        self.state.write().catalog.remove(title)
    }

    /// Titles of all known courses, in insertion order
    pub fn course_titles(&self) -> Vec<String> {
        self.state.read().courses.iter().map(|c| c.title.clone()).collect()
    }

    pub fn course_count(&self) -> usize {
        self.state.read().courses.len()
    }

    fn resolve(state: &StoreState, partial: &str) -> Option<String> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let titles = || state.courses.iter().map(|c| &c.title);
        titles()
            .find(|t| t.to_lowercase() == needle)
            .or_else(|| titles().find(|t| t.to_lowercase().contains(&needle)))
            .cloned()
    }
}

fn score(text: &str, query: &str) -> usize {
    let text = text.to_lowercase();
    query
        .split_whitespace()
        .filter(|word| text.contains(&word.to_lowercase()))
        .count()
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn search(
        &self,
        query: &str,
        course_name: Option<&str>,
        lesson_number: Option<i64>,
    ) -> SearchResults {
        let state = self.state.read();

        let course_title = match course_name {
            Some(name) => match Self::resolve(&state, name) {
                Some(title) => Some(title),
                None => return SearchResults::with_error(format!("No course found matching '{}'", name)),
            },
            None => None,
        };

        let mut matches: Vec<(usize, &CourseChunk)> = state
            .chunks
            .iter()
            .filter(|c| course_title.as_ref().map_or(true, |t| &c.course_title == t))
            .filter(|c| lesson_number.map_or(true, |n| c.lesson_number == Some(n)))
            .map(|c| (score(&c.text, query), c))
            .collect();
        matches.sort_by(|a, b| b.0.cmp(&a.0));

        let mut results = SearchResults::empty();
        for (_, chunk) in matches.into_iter().take(self.max_results) {
            results.push(
                chunk.text.clone(),
                ChunkMetadata {
                    course_title: chunk.course_title.clone(),
                    lesson_number: chunk.lesson_number,
                },
            );
        }
        results
    }

    async fn resolve_course_name(&self, partial: &str) -> Option<String> {
        Self::resolve(&self.state.read(), partial)
    }

    async fn lesson_link(&self, course_title: &str, lesson_number: i64) -> Option<String> {
        self.state
            .read()
            .courses
            .iter()
            .find(|c| c.title == course_title)?
            .lessons
            .iter()
            .find(|l| l.lesson_number == lesson_number)?
            .lesson_link
            .clone()
    }

    async fn catalog_entry(&self, course_title: &str) -> StoreResult<Option<CatalogEntry>> {
        Ok(self.state.read().catalog.get(course_title).cloned())
    }
}
