//! Application state shared with the reader window

use std::path::PathBuf;

use crate::config::AppConfig;

/// Central shared state
#[derive(Debug, Clone, Default)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Where the configuration is saved, if anywhere
    pub config_path: Option<PathBuf>,
}

impl SharedAppState {
    /// Create a new shared state with the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Remember where configuration changes should be written
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Write the current configuration back to disk
    pub fn persist_config(&self) -> anyhow::Result<()> {
        match &self.config_path {
            Some(path) => crate::config::save_config(&self.config, path),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persist_without_path_is_noop() {
        let state = SharedAppState::new(AppConfig::default());
        assert!(state.persist_config().is_ok());
    }

    #[test]
    fn test_persist_writes_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut state = SharedAppState::new(AppConfig::default()).with_config_path(path.clone());
        state.config.reader.region_padding = 8.0;

        state.persist_config().unwrap();

        let loaded = crate::config::load_config(&path).unwrap();
        assert!((loaded.reader.region_padding - 8.0).abs() < 0.001);
    }
}
