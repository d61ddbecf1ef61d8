//! Logging abstractions for runtime-agnostic logging
//!
//! Components take an `Arc<dyn Logger>` and prefix their lines with
//! `[Component]`, so the embedding application decides where output goes.

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::Logger;
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{LogLevel, MemoryLogger};
