//! Game configuration loader.

use std::path::Path;

use delve_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    ///
    /// # Returns
    ///
    /// Returns a GameConfig. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML source.
    pub fn parse(source: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(config.sight_range > 0, "sight_range must be at least 1");
        tracing::debug!(
            "loaded config: sight_range={}, action_numbering={}",
            config.sight_range,
            config.action_numbering
        );

        Ok(config)
    }
}
