//! Notification seams between the world and the systems observing it.
//!
//! Handlers are registered once on the [`EventHub`] and dispatched
//! synchronously by [`crate::world::World`] on the single simulation thread.
//! Before iterating a channel the world snapshots it (cloned `Arc` list), so
//! a handler may re-enter the world mutably, including starting another move
//! while a dispatch is in progress.

use std::sync::Arc;

use crate::damage::{BlockDamage, DamageVerdict};
use crate::placement::{PlaceBlocksRequest, PlacedBlocks};
use crate::schedule::DelayedAction;
use crate::state::EntityId;
use crate::world::World;

/// Outcome of a placement guard inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementVerdict {
    Accept,
    Veto,
}

/// Inspects placement batches before commit.
///
/// Guards run in priority order (lower first); the first veto rejects the
/// whole batch. Guards are pure functions of the world and the request and
/// must hold no mutable cross-call state.
pub trait PlacementGuard: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower values run first. Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn inspect(&self, world: &World, request: &PlaceBlocksRequest) -> PlacementVerdict;
}

/// Observes committed placement batches.
pub trait PlacementObserver: Send + Sync {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn on_blocks_placed(&self, world: &mut World, placed: &PlacedBlocks);
}

/// Inspects damage applications before any effect.
///
/// The first `Cancel` wins; the application is dropped with durability
/// untouched.
pub trait DamageGuard: Send + Sync {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn before_block_damage(&self, world: &World, damage: &BlockDamage) -> DamageVerdict;
}

/// Payload of the content-transition notification delivered when a moving
/// block hands its content to another entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveTransition {
    /// True when the move is starting (content leaves the origin block),
    /// false when it is finalizing (content lands in the destination block).
    pub starting: bool,
    /// Entity the notification is about: the origin block entity at start,
    /// the transitional actor at finalization.
    pub subject: EntityId,
    /// Entity receiving the content: the transitional actor at start, the
    /// destination block entity at finalization.
    pub into: EntityId,
}

/// Observes the lifecycle of block moves.
///
/// None of these notifications can veto the move; they exist so dependent
/// systems can migrate state alongside the block.
pub trait MoveListener: Send + Sync {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn on_before_block_moves(&self, _world: &mut World, _subject: EntityId) {}

    fn on_move_transition(&self, _world: &mut World, _transition: &MoveTransition) {}

    /// Delivered exactly once per move attempt, on every exit path.
    fn on_move_finished(&self, _world: &mut World, _subject: EntityId, _success: bool) {}
}

/// Receives delayed actions drained by [`crate::world::World::advance`].
///
/// The channel is shared; handlers match on [`DelayedAction::action_id`]
/// before acting.
pub trait DelayedActionHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn on_delayed_action(&self, world: &mut World, action: &DelayedAction);
}

/// Registration point for the world's notification channels.
///
/// Each channel keeps its handlers sorted by priority (stable for equal
/// values, so registration order breaks ties).
#[derive(Clone, Default)]
pub struct EventHub {
    placement_guards: Vec<Arc<dyn PlacementGuard>>,
    placement_observers: Vec<Arc<dyn PlacementObserver>>,
    damage_guards: Vec<Arc<dyn DamageGuard>>,
    move_listeners: Vec<Arc<dyn MoveListener>>,
    delayed_handlers: Vec<Arc<dyn DelayedActionHandler>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_placement_guard(&mut self, guard: Arc<dyn PlacementGuard>) {
        self.placement_guards.push(guard);
        self.placement_guards.sort_by_key(|g| g.priority());
    }

    pub fn register_placement_observer(&mut self, observer: Arc<dyn PlacementObserver>) {
        self.placement_observers.push(observer);
        self.placement_observers.sort_by_key(|o| o.priority());
    }

    pub fn register_damage_guard(&mut self, guard: Arc<dyn DamageGuard>) {
        self.damage_guards.push(guard);
        self.damage_guards.sort_by_key(|g| g.priority());
    }

    pub fn register_move_listener(&mut self, listener: Arc<dyn MoveListener>) {
        self.move_listeners.push(listener);
        self.move_listeners.sort_by_key(|l| l.priority());
    }

    pub fn register_delayed_handler(&mut self, handler: Arc<dyn DelayedActionHandler>) {
        self.delayed_handlers.push(handler);
        self.delayed_handlers.sort_by_key(|h| h.priority());
    }

    // Snapshot accessors used by World dispatch. Cloning the Arc lists keeps
    // the hub borrow out of the dispatch loop.

    pub(crate) fn placement_guards(&self) -> Vec<Arc<dyn PlacementGuard>> {
        self.placement_guards.clone()
    }

    pub(crate) fn placement_observers(&self) -> Vec<Arc<dyn PlacementObserver>> {
        self.placement_observers.clone()
    }

    pub(crate) fn damage_guards(&self) -> Vec<Arc<dyn DamageGuard>> {
        self.damage_guards.clone()
    }

    pub(crate) fn move_listeners(&self) -> Vec<Arc<dyn MoveListener>> {
        self.move_listeners.clone()
    }

    pub(crate) fn delayed_handlers(&self) -> Vec<Arc<dyn DelayedActionHandler>> {
        self.delayed_handlers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedGuard {
        name: &'static str,
        priority: i32,
    }

    impl PlacementGuard for NamedGuard {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn inspect(&self, _world: &World, _request: &PlaceBlocksRequest) -> PlacementVerdict {
            PlacementVerdict::Accept
        }
    }

    #[test]
    fn guards_sort_by_priority_with_stable_ties() {
        let mut hub = EventHub::new();
        hub.register_placement_guard(Arc::new(NamedGuard {
            name: "second",
            priority: 5,
        }));
        hub.register_placement_guard(Arc::new(NamedGuard {
            name: "first",
            priority: -5,
        }));
        hub.register_placement_guard(Arc::new(NamedGuard {
            name: "third",
            priority: 5,
        }));

        let names: Vec<_> = hub.placement_guards().iter().map(|g| g.name()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
