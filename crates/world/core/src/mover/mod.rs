//! Timed relocation of single blocks.
//!
//! A move does not teleport its block: for the configured duration both the
//! origin and destination cells hold a placeholder marker, and only when the
//! scheduled finalization fires does the destination receive the real block
//! and the origin become air. [`BlockMover`] orchestrates the whole arc; the
//! guards in this module keep third parties from mutating or damaging the
//! reserved cells while it runs.

mod guards;
mod materialize;
mod record;

pub use guards::{MovingBlockConflictGuard, PlaceholderDamageGuard};
pub use materialize::MaterializeHandler;
pub use record::MovingBlockRecord;

use std::sync::Arc;

use tracing::debug;

use crate::block::{BlockDef, BlockFlags, BlockId, CatalogError, PLACEHOLDER_BLOCK_NAME};
use crate::event::MoveTransition;
use crate::geometry::Direction;
use crate::placement::PlaceBlocksRequest;
use crate::state::{CellPos, EntityId};
use crate::world::World;

/// Action identifier for scheduled move finalizations.
///
/// The delayed-action channel is shared, so the handler re-checks this id
/// before acting.
pub const MATERIALIZE_ACTION_ID: &str = "mobile_blocks:materialize";

/// Orchestrates timed block relocations for one world.
///
/// Created by [`BlockMover::install`]; the handle itself is cheap to copy
/// and carries only the resolved placeholder block. All transition state
/// lives in the world.
#[derive(Clone, Copy, Debug)]
pub struct BlockMover {
    placeholder: BlockId,
}

impl BlockMover {
    /// Registers the mover's guards and completion handler on `world`.
    ///
    /// Resolves the placeholder block by name, registering a definition if
    /// content did not ship one.
    pub fn install(world: &mut World) -> Result<Self, CatalogError> {
        let placeholder = world.catalog_mut().ensure(placeholder_def())?;

        world
            .hub_mut()
            .register_placement_guard(Arc::new(MovingBlockConflictGuard::new(placeholder)));
        world
            .hub_mut()
            .register_damage_guard(Arc::new(PlaceholderDamageGuard::new(placeholder)));
        world
            .hub_mut()
            .register_delayed_handler(Arc::new(MaterializeHandler));

        Ok(Self { placeholder })
    }

    /// The marker block reserved cells hold during a move.
    pub fn placeholder(&self) -> BlockId {
        self.placeholder
    }

    /// Starts a timed move of the block at `origin` one cell along
    /// `direction`, finalizing after `duration_ms` of game time.
    ///
    /// Returns false when the destination cannot take the block or the
    /// reservation batch was vetoed. Neither case raises an error and the
    /// cells are left untouched. Every attempt, successful or not, delivers
    /// exactly one move-finished notification: to the transitional actor
    /// once the reservation is accepted, to the origin block entity before
    /// that.
    pub fn move_block(
        &self,
        world: &mut World,
        origin: CellPos,
        direction: Direction,
        duration_ms: u64,
    ) -> bool {
        let attempt = self.attempt_move(world, origin, direction, duration_ms);
        world.notify_move_finished(attempt.subject, attempt.success);
        if let Some(leftover) = attempt.rollback {
            world.entities_mut().destroy(leftover);
        }
        attempt.success
    }

    fn attempt_move(
        &self,
        world: &mut World,
        origin: CellPos,
        direction: Direction,
        duration_ms: u64,
    ) -> MoveAttempt {
        let destination = origin.step(direction);
        if !world.is_replaceable(destination) {
            let subject = world.block_entity_at(origin);
            return MoveAttempt::failed(subject, None);
        }

        let origin_entity = world.block_entity_at(origin);
        world.notify_before_block_moves(origin_entity);

        let carried = world.block_at(origin);
        let now = world.now();
        let template = world
            .entities()
            .record(origin_entity)
            .and_then(|record| record.template.clone());

        let moving = world.entities_mut().create_from_template(template.as_deref());
        let record = MovingBlockRecord {
            block: carried,
            from: origin,
            to: destination,
            started_at: now,
            ends_at: now + duration_ms,
        };
        if let Some(entry) = world.entities_mut().record_mut(moving) {
            entry.location = Some(origin);
            entry.moving_block = Some(record);
        }
        world.notify_move_transition(MoveTransition {
            starting: true,
            subject: origin_entity,
            into: moving,
        });

        let reservation = PlaceBlocksRequest::new(EntityId::WORLD)
            .assign(origin, self.placeholder)
            .assign(destination, self.placeholder);
        if let Err(error) = world.try_place_blocks(reservation) {
            debug!(
                target: "world::mover",
                from = %origin,
                to = %destination,
                %error,
                "move reservation was refused"
            );
            return MoveAttempt::failed(origin_entity, Some(moving));
        }

        world
            .schedule_mut()
            .schedule(moving, MATERIALIZE_ACTION_ID, record.ends_at);
        debug!(
            target: "world::mover",
            actor = %moving,
            from = %origin,
            to = %destination,
            ends_at = %record.ends_at,
            "block move started"
        );
        MoveAttempt::succeeded(moving)
    }
}

/// Outcome of one relocation attempt, separated from notification delivery
/// so every exit path reports exactly once and rolls back after reporting.
struct MoveAttempt {
    subject: EntityId,
    success: bool,
    rollback: Option<EntityId>,
}

impl MoveAttempt {
    fn failed(subject: EntityId, rollback: Option<EntityId>) -> Self {
        Self {
            subject,
            success: false,
            rollback,
        }
    }

    fn succeeded(subject: EntityId) -> Self {
        Self {
            subject,
            success: true,
            rollback: None,
        }
    }
}

fn placeholder_def() -> BlockDef {
    BlockDef::new(
        PLACEHOLDER_BLOCK_NAME,
        BlockFlags::INVISIBLE | BlockFlags::PLACEHOLDER | BlockFlags::INDESTRUCTIBLE,
    )
}
