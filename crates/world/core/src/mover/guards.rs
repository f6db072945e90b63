//! Guards that protect move-reserved cells for the transitional window.

use crate::block::BlockId;
use crate::damage::{BlockDamage, DamageVerdict};
use crate::event::{DamageGuard, PlacementGuard, PlacementVerdict};
use crate::placement::PlaceBlocksRequest;
use crate::world::World;

/// Vetoes third-party placements that touch a cell reserved by a move.
///
/// Batches issued by the world authority pass untouched; everything the
/// mover itself writes goes through under that identity.
pub struct MovingBlockConflictGuard {
    placeholder: BlockId,
}

impl MovingBlockConflictGuard {
    pub fn new(placeholder: BlockId) -> Self {
        Self { placeholder }
    }
}

impl PlacementGuard for MovingBlockConflictGuard {
    fn name(&self) -> &'static str {
        "moving_block_conflict"
    }

    fn inspect(&self, world: &World, request: &PlaceBlocksRequest) -> PlacementVerdict {
        if request.issuer.is_world() {
            return PlacementVerdict::Accept;
        }
        for pos in request.cells() {
            // Short-circuits on the first reserved cell.
            if world.block_at(pos) == self.placeholder {
                return PlacementVerdict::Veto;
            }
        }
        PlacementVerdict::Accept
    }
}

/// Cancels damage aimed at a block occupying a move-reserved cell.
pub struct PlaceholderDamageGuard {
    placeholder: BlockId,
}

impl PlaceholderDamageGuard {
    pub fn new(placeholder: BlockId) -> Self {
        Self { placeholder }
    }
}

impl DamageGuard for PlaceholderDamageGuard {
    fn name(&self) -> &'static str {
        "moving_block_damage"
    }

    fn before_block_damage(&self, world: &World, damage: &BlockDamage) -> DamageVerdict {
        let anchored = world
            .entities()
            .record(damage.target)
            .and_then(|record| record.location);
        match anchored {
            Some(pos) if world.block_at(pos) == self.placeholder => DamageVerdict::Cancel,
            _ => DamageVerdict::Proceed,
        }
    }
}
