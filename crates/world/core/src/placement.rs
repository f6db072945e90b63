//! Placement batches: the only path that writes cell content.

use crate::block::BlockId;
use crate::state::{CellPos, EntityId};

/// A batched cell mutation submitted through the guarded placement path.
///
/// Assignments apply in order; a cell listed twice ends up holding the last
/// block named for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceBlocksRequest {
    /// Identity the mutation is attributed to. Guards use it to tell
    /// world-level orchestration apart from ordinary actors.
    pub issuer: EntityId,
    /// Target cells and the block each should hold after commit.
    pub assignments: Vec<(CellPos, BlockId)>,
}

impl PlaceBlocksRequest {
    pub fn new(issuer: EntityId) -> Self {
        Self {
            issuer,
            assignments: Vec::new(),
        }
    }

    /// Adds one cell assignment.
    #[must_use]
    pub fn assign(mut self, pos: CellPos, block: BlockId) -> Self {
        self.assignments.push((pos, block));
        self
    }

    pub fn single(issuer: EntityId, pos: CellPos, block: BlockId) -> Self {
        Self::new(issuer).assign(pos, block)
    }

    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.assignments.iter().map(|&(pos, _)| pos)
    }
}

/// One committed cell mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellChange {
    pub pos: CellPos,
    pub previous: BlockId,
    pub block: BlockId,
}

/// Receipt describing a committed placement batch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedBlocks {
    pub issuer: EntityId,
    pub changes: Vec<CellChange>,
}

/// Rejection reasons for a placement batch.
///
/// `Vetoed` deliberately carries no guard identity; rejected issuers learn
/// only that the mutation was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaceError {
    #[error("placement batch is empty")]
    EmptyBatch,

    #[error("placement batch has {len} cells, limit is {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("block {0} is not registered")]
    UnknownBlock(BlockId),

    #[error("placement was vetoed")]
    Vetoed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_assignments_in_order() {
        let request = PlaceBlocksRequest::new(EntityId(3))
            .assign(CellPos::new(0, 0, 0), BlockId(1))
            .assign(CellPos::new(1, 0, 0), BlockId(2));

        assert_eq!(request.issuer, EntityId(3));
        let cells: Vec<_> = request.cells().collect();
        assert_eq!(cells, [CellPos::new(0, 0, 0), CellPos::new(1, 0, 0)]);
    }

    #[test]
    fn single_builds_a_one_cell_batch() {
        let request = PlaceBlocksRequest::single(EntityId::WORLD, CellPos::ORIGIN, BlockId(4));
        assert_eq!(request.assignments, [(CellPos::ORIGIN, BlockId(4))]);
    }
}
