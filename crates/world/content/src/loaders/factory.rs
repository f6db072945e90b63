//! Content factory for loading world data from a directory.

use std::path::{Path, PathBuf};

use world_core::{BlockCatalog, WorldConfig};

use crate::loaders::{BlockSetLoader, ConfigLoader, LoadResult};

/// Content factory that loads all world content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── world.toml
/// └── blocks.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load world configuration from `world.toml`.
    pub fn load_config(&self) -> LoadResult<WorldConfig> {
        let path = self.data_dir.join("world.toml");
        ConfigLoader::load(&path)
    }

    /// Load the block catalog from `blocks.ron`.
    pub fn load_blocks(&self) -> LoadResult<BlockCatalog> {
        let path = self.data_dir.join("blocks.ron");
        BlockSetLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_resolves_data_dir_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn factory_loads_a_full_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("world.toml"), "default_move_duration_ms = 500\n").unwrap();
        std::fs::write(
            dir.path().join("blocks.ron"),
            r#"(blocks: [(name: "stone")])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().default_move_duration_ms, 500);
        assert!(factory.load_blocks().unwrap().lookup("stone").is_some());
    }
}
