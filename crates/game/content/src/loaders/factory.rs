//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use delve_core::{GameConfig, WorldState};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader};

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── maps/
///     ├── engine_room.ron
///     └── flooded_deck.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!("{} not found, using default config", path.display());
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a level from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str, config: &GameConfig) -> LoadResult<WorldState> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path, config)
    }

    /// Load the configuration, then the named level under it.
    pub fn load_level(&self, map_name: &str) -> LoadResult<(GameConfig, WorldState)> {
        let config = self.load_config()?;
        let world = self.load_map(map_name, &config)?;
        Ok((config, world))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
