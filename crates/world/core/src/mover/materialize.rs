//! Scheduled finalization of an in-flight block move.

use tracing::{debug, warn};

use crate::block::BlockId;
use crate::event::{DelayedActionHandler, MoveTransition};
use crate::placement::PlaceBlocksRequest;
use crate::schedule::DelayedAction;
use crate::state::EntityId;
use crate::world::World;

use super::MATERIALIZE_ACTION_ID;

/// Completes a move when its scheduled action fires: origin becomes air,
/// the destination receives the carried block, and the transitional actor
/// is retired.
pub struct MaterializeHandler;

impl DelayedActionHandler for MaterializeHandler {
    fn name(&self) -> &'static str {
        "materialize_block"
    }

    fn on_delayed_action(&self, world: &mut World, action: &DelayedAction) {
        if action.action_id != MATERIALIZE_ACTION_ID {
            return;
        }

        let moving = action.actor;
        let Some(record) = world
            .entities()
            .record(moving)
            .and_then(|record| record.moving_block)
        else {
            warn!(
                target: "world::mover",
                actor = %moving,
                "materialize fired for an actor without a move record"
            );
            return;
        };

        world.notify_before_block_moves(moving);

        let request = PlaceBlocksRequest::new(EntityId::WORLD)
            .assign(record.from, BlockId::AIR)
            .assign(record.to, record.block);
        if let Err(error) = world.try_place_blocks(request) {
            // Both cells were world-reserved for the whole window, so a veto
            // here is a misbehaving guard. The move still completes.
            warn!(
                target: "world::mover",
                actor = %moving,
                %error,
                "finalization batch was refused, completing anyway"
            );
        }

        let destination = world.block_entity_at(record.to);
        world.notify_move_transition(MoveTransition {
            starting: false,
            subject: moving,
            into: destination,
        });
        world.entities_mut().destroy(moving);
        world.notify_move_finished(destination, true);

        debug!(
            target: "world::mover",
            from = %record.from,
            to = %record.to,
            "block move finalized"
        );
    }
}
