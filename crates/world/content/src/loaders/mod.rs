//! Content loaders for reading world data from files.
//!
//! This module provides loaders that convert RON/TOML files into world-core
//! values: a [`world_core::BlockCatalog`] from a block set file and a
//! [`world_core::WorldConfig`] from a config file.

pub mod blocks;
pub mod config;
pub mod factory;

pub use blocks::{BlockSetLoader, builtin_catalog};
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
