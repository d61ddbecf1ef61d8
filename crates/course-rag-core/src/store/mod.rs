//! Vector store boundary
//!
//! The tools only depend on the `CourseStore` trait. Embedding, ranking and
//! persistence live behind it; `MemoryCourseStore` is a small in-process
//! implementation for tests and for running without a vector database.

mod traits;
mod memory;

pub use traits::{
    CatalogEntry, ChunkMetadata, CourseStore, LessonEntry, SearchResults, StoreError, StoreResult,
};
pub use memory::{Course, CourseChunk, Lesson, MemoryCourseStore};
