//! File-based configuration provider (YAML)
//!
//! Supports user-level (~/.config/course-rag/config.yaml) and workspace-level
//! (.config/course-rag/config.yaml) config.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::error::ConfigResult;
use super::settings::RagConfig;

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/course-rag/config.yaml)
    User,
    /// Workspace-level config (.config/course-rag/config.yaml in workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use course_rag_core::config::FileConfigProvider;
///
/// let workspace = FileConfigProvider::workspace("/path/to/workspace");
/// let config = FileConfigProvider::resolve(&[&workspace, &FileConfigProvider::user()])?;
/// # Ok::<(), course_rag_core::config::ConfigError>(())
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    level: ConfigLevel,
    cache: RwLock<Option<RagConfig>>,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// Create a user-level config provider (~/.config/course-rag/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        let path = config_dir.join("course-rag").join("config.yaml");
        Self::new(path, ConfigLevel::User)
    }

    /// Create a workspace-level config provider (.config/course-rag/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("course-rag").join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the config level
    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> ConfigResult<RagConfig> {
        if !self.path.exists() {
            return Ok(RagConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        RagConfig::from_yaml(&content)
    }

    /// Save config to file
    pub fn save(&self, config: &RagConfig) -> ConfigResult<()> {
        config.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(config)?;
        fs::write(&self.path, content)?;

        *self.cache.write() = Some(config.clone());
        Ok(())
    }

    /// Get cached or load config
    pub fn get_config(&self) -> ConfigResult<RagConfig> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }

        self.reload()
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<RagConfig> {
        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }

    /// First existing file wins, then environment overrides are applied
    pub fn resolve(candidates: &[&FileConfigProvider]) -> ConfigResult<RagConfig> {
        let mut config = match candidates.iter().find(|c| c.exists()) {
            Some(found) => found.get_config()?,
            None => RagConfig::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"), ConfigLevel::User);

        assert!(!provider.exists());
        assert_eq!(provider.get_config().unwrap(), RagConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::workspace(dir.path());
        assert_eq!(provider.level(), ConfigLevel::Workspace);

        let mut config = RagConfig::default();
        config.orchestration.max_rounds = 4;
        config.provider.api_base = Some("http://localhost:8080".to_string());
        provider.save(&config).unwrap();

        assert!(provider.exists());
        let content = fs::read_to_string(provider.path()).unwrap();
        assert!(content.contains("max_rounds: 4"));

        let reloaded = provider.reload().unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_resolve_prefers_first_existing_file() {
        let workspace_dir = tempdir().unwrap();
        let user_dir = tempdir().unwrap();
        let workspace = FileConfigProvider::workspace(workspace_dir.path());
        let user = FileConfigProvider::new(user_dir.path().join("config.yaml"), ConfigLevel::User);

        fs::write(user.path(), "orchestration:\n  max_rounds: 5\n").unwrap();
        let config = FileConfigProvider::resolve(&[&workspace, &user]).unwrap();
        assert_eq!(config.orchestration.max_rounds, 5);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "provider: [not, a, map]").unwrap();

        let provider = FileConfigProvider::new(&path, ConfigLevel::User);
        assert!(matches!(provider.get_config(), Err(ConfigError::Yaml(_))));
    }
}
