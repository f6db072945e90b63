//! Block definitions and the per-world block catalog.

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;

use crate::config::WorldConfig;

/// Registry name of the always-present air block.
pub const AIR_BLOCK_NAME: &str = "air";

/// Registry name of the marker block reserved for in-flight relocations.
///
/// A cell holds this block iff it is the origin or destination of a move in
/// progress. The marker is deliberately not replaceable, so a second move
/// targeting a reserved cell fails ordinary destination validation.
pub const PLACEHOLDER_BLOCK_NAME: &str = "moving_block_placeholder";

/// Compact identifier for a registered block type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockId(pub u16);

impl BlockId {
    /// The empty cell. Always registered first.
    pub const AIR: Self = Self(0);

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

bitflags! {
    /// Behaviour switches carried by a block definition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct BlockFlags: u8 {
        /// Placement may overwrite this block without clearing it first.
        const REPLACEABLE    = 1 << 0;
        /// Not rendered; clients skip the cell entirely.
        const INVISIBLE      = 1 << 1;
        /// Marks a cell reserved by an in-flight relocation.
        const PLACEHOLDER    = 1 << 2;
        /// Damage never depletes this block.
        const INDESTRUCTIBLE = 1 << 3;
    }
}

/// A registered block type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockDef {
    /// Registry name, unique within a catalog.
    pub name: String,
    pub flags: BlockFlags,
    /// Damage the block absorbs before it is destroyed.
    /// Ignored when [`BlockFlags::INDESTRUCTIBLE`] is set.
    pub durability: u32,
    /// Entity template bound to cells holding this block.
    pub template: Option<String>,
}

impl BlockDef {
    pub const DEFAULT_DURABILITY: u32 = 10;

    pub fn new(name: impl Into<String>, flags: BlockFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            durability: Self::DEFAULT_DURABILITY,
            template: None,
        }
    }

    #[must_use]
    pub fn with_durability(mut self, durability: u32) -> Self {
        self.durability = durability;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn is_replaceable(&self) -> bool {
        self.flags.contains(BlockFlags::REPLACEABLE)
    }

    pub fn is_placeholder(&self) -> bool {
        self.flags.contains(BlockFlags::PLACEHOLDER)
    }

    pub fn is_indestructible(&self) -> bool {
        self.flags.contains(BlockFlags::INDESTRUCTIBLE)
    }
}

/// Errors raised while registering block definitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("block name {0:?} is already registered")]
    DuplicateName(String),

    #[error("catalog is full")]
    Exhausted,
}

/// Registry of block definitions, indexed by [`BlockId`].
///
/// Identifier 0 is always the air block; further ids are assigned in
/// registration order.
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    defs: Vec<BlockDef>,
    by_name: BTreeMap<String, BlockId>,
}

impl BlockCatalog {
    /// Creates a catalog holding only the air block.
    pub fn new() -> Self {
        let air = BlockDef::new(
            AIR_BLOCK_NAME,
            BlockFlags::REPLACEABLE | BlockFlags::INVISIBLE | BlockFlags::INDESTRUCTIBLE,
        )
        .with_durability(0);

        let mut by_name = BTreeMap::new();
        by_name.insert(air.name.clone(), BlockId::AIR);
        Self {
            defs: vec![air],
            by_name,
        }
    }

    /// Registers a new definition and returns its id.
    pub fn register(&mut self, def: BlockDef) -> Result<BlockId, CatalogError> {
        if self.by_name.contains_key(&def.name) {
            return Err(CatalogError::DuplicateName(def.name));
        }
        if self.defs.len() >= WorldConfig::MAX_BLOCK_DEFS {
            return Err(CatalogError::Exhausted);
        }

        let id = BlockId(self.defs.len() as u16);
        self.by_name.insert(def.name.clone(), id);
        self.defs.push(def);
        Ok(id)
    }

    /// Registers `def` unless a block with the same name already exists,
    /// returning the id either way.
    pub fn ensure(&mut self, def: BlockDef) -> Result<BlockId, CatalogError> {
        if let Some(&id) = self.by_name.get(&def.name) {
            return Ok(id);
        }
        self.register(def)
    }

    pub fn get(&self, id: BlockId) -> Option<&BlockDef> {
        self.defs.get(id.0 as usize)
    }

    pub fn lookup(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        (id.0 as usize) < self.defs.len()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockDef)> + '_ {
        self.defs
            .iter()
            .enumerate()
            .map(|(index, def)| (BlockId(index as u16), def))
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::new()
    }
}
