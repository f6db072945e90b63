//! Block set loader.
//!
//! Loads block definitions from RON files into a [`BlockCatalog`]. The air
//! block is registered by the catalog itself and must not appear in data.

use std::path::Path;

use serde::{Deserialize, Serialize};
use world_core::{BlockCatalog, BlockDef, BlockFlags};

use crate::loaders::{LoadResult, read_file};

/// Block set structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlockSetData {
    blocks: Vec<BlockEntryData>,
}

/// One block definition as written in data files.
///
/// Flags are spelled out as booleans so data stays readable; omitted fields
/// fall back to a plain solid block.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlockEntryData {
    name: String,
    #[serde(default)]
    replaceable: bool,
    #[serde(default)]
    invisible: bool,
    #[serde(default)]
    placeholder: bool,
    #[serde(default)]
    indestructible: bool,
    #[serde(default = "default_durability")]
    durability: u32,
    #[serde(default)]
    template: Option<String>,
}

fn default_durability() -> u32 {
    BlockDef::DEFAULT_DURABILITY
}

fn into_def(entry: BlockEntryData) -> BlockDef {
    let mut flags = BlockFlags::empty();
    flags.set(BlockFlags::REPLACEABLE, entry.replaceable);
    flags.set(BlockFlags::INVISIBLE, entry.invisible);
    flags.set(BlockFlags::PLACEHOLDER, entry.placeholder);
    flags.set(BlockFlags::INDESTRUCTIBLE, entry.indestructible);

    let mut def = BlockDef::new(entry.name, flags).with_durability(entry.durability);
    if let Some(template) = entry.template {
        def = def.with_template(template);
    }
    def
}

/// Loader for block sets from RON files.
pub struct BlockSetLoader;

impl BlockSetLoader {
    /// Load a block catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a block set
    ///
    /// # Returns
    ///
    /// Returns a BlockCatalog with air plus every listed block registered.
    pub fn load(path: &Path) -> LoadResult<BlockCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a block catalog from RON source.
    pub fn parse(source: &str) -> LoadResult<BlockCatalog> {
        let data: BlockSetData = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse block set RON: {}", e))?;

        let mut catalog = BlockCatalog::new();
        for entry in data.blocks {
            let name = entry.name.clone();
            catalog
                .register(into_def(entry))
                .map_err(|e| anyhow::anyhow!("Failed to register block '{}': {}", name, e))?;
        }
        Ok(catalog)
    }
}

/// Loads the block set embedded in this crate.
pub fn builtin_catalog() -> LoadResult<BlockCatalog> {
    BlockSetLoader::parse(include_str!("../../data/blocks.ron"))
}
