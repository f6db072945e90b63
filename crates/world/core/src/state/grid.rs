use std::collections::BTreeMap;

use crate::block::BlockId;

use super::{CellPos, EntityId};

/// Sparse block storage plus the cell-to-entity binding table.
///
/// Cells absent from the map hold air. Bindings are maintained lazily by
/// [`crate::world::World::block_entity_at`]; the grid itself only stores
/// them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellGrid {
    cells: BTreeMap<CellPos, BlockId>,
    bindings: BTreeMap<CellPos, EntityId>,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block currently stored at `pos`; air when unset.
    pub fn block_at(&self, pos: CellPos) -> BlockId {
        self.cells.get(&pos).copied().unwrap_or(BlockId::AIR)
    }

    /// Writes `block` at `pos`, returning the previous content.
    ///
    /// Air writes remove the entry so the map stays sparse.
    pub fn set_block(&mut self, pos: CellPos, block: BlockId) -> BlockId {
        let previous = if block.is_air() {
            self.cells.remove(&pos)
        } else {
            self.cells.insert(pos, block)
        };
        previous.unwrap_or(BlockId::AIR)
    }

    pub fn binding(&self, pos: CellPos) -> Option<EntityId> {
        self.bindings.get(&pos).copied()
    }

    pub fn bind(&mut self, pos: CellPos, entity: EntityId) {
        self.bindings.insert(pos, entity);
    }

    /// Clears the entity binding at `pos`, returning it if one was set.
    pub fn unbind(&mut self, pos: CellPos) -> Option<EntityId> {
        self.bindings.remove(&pos)
    }

    /// Iterates over every non-air cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (CellPos, BlockId)> + '_ {
        self.cells.iter().map(|(&pos, &block)| (pos, block))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_cells_hold_air() {
        let grid = CellGrid::new();
        assert_eq!(grid.block_at(CellPos::new(5, 5, 5)), BlockId::AIR);
        assert!(grid.is_empty());
    }

    #[test]
    fn set_block_returns_previous_content() {
        let mut grid = CellGrid::new();
        let pos = CellPos::ORIGIN;

        assert_eq!(grid.set_block(pos, BlockId(2)), BlockId::AIR);
        assert_eq!(grid.set_block(pos, BlockId(3)), BlockId(2));
        assert_eq!(grid.block_at(pos), BlockId(3));
    }

    #[test]
    fn writing_air_keeps_the_map_sparse() {
        let mut grid = CellGrid::new();
        let pos = CellPos::new(1, 2, 3);

        grid.set_block(pos, BlockId(2));
        assert_eq!(grid.set_block(pos, BlockId::AIR), BlockId(2));
        assert!(grid.is_empty());
    }

    #[test]
    fn bindings_track_independently_of_blocks() {
        let mut grid = CellGrid::new();
        let pos = CellPos::ORIGIN;

        assert_eq!(grid.binding(pos), None);
        grid.bind(pos, EntityId(7));
        assert_eq!(grid.binding(pos), Some(EntityId(7)));
        assert_eq!(grid.unbind(pos), Some(EntityId(7)));
        assert_eq!(grid.unbind(pos), None);
    }
}
