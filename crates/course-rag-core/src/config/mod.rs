//! Configuration
//!
//! - `RagConfig`: provider and orchestration settings with defaults
//! - `FileConfigProvider`: YAML file-based (user/workspace level)

mod error;
mod settings;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use settings::{RagConfig, ProviderSettings, OrchestrationSettings, DEFAULT_MODEL};
pub use file::{FileConfigProvider, ConfigLevel};
