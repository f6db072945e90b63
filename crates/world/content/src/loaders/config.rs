//! World configuration loader.

use std::path::Path;

use world_core::WorldConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for world configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing WorldConfig
    ///
    /// # Returns
    ///
    /// Returns a WorldConfig, with omitted fields at their defaults.
    pub fn load(path: &Path) -> LoadResult<WorldConfig> {
        let content = read_file(path)?;
        let config: WorldConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_config_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.toml");
        std::fs::write(&path, "default_move_duration_ms = 250\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.default_move_duration_ms, 250);
    }

    #[test]
    fn omitted_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.toml");
        std::fs::write(&path, "").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config, WorldConfig::new());
    }
}
