//! Events emitted during simulation for front-ends to observe.
//!
//! Consumers subscribe to [`WorldFeedEvent`] to react to world changes
//! without blocking the worker loop. [`FeedBridge`] adapts the core's
//! synchronous notification seams onto the broadcast feed.
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use world_core::{
    CellChange, CellPos, EntityId, MoveListener, MoveTransition, PlacedBlocks, PlacementObserver,
    TimeMs, World,
};

/// Events published on the runtime's outward feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldFeedEvent {
    /// A relocation passed validation and entered its transitional window.
    ///
    /// The reservation can still be refused; that case is reported by a
    /// following `MoveFinished` with `success: false`.
    MoveStarted {
        actor: EntityId,
        from: CellPos,
        to: CellPos,
        ends_at: TimeMs,
    },
    /// A move attempt or finalization reported its outcome.
    MoveFinished { subject: EntityId, success: bool },
    /// A placement batch committed.
    BlocksChanged {
        issuer: EntityId,
        changes: Vec<CellChange>,
    },
    /// A guard cancelled damage aimed at a block.
    DamageBlocked {
        target: EntityId,
        instigator: EntityId,
    },
    /// The simulated clock moved forward.
    TimeAdvanced { now: TimeMs },
}

/// Forwards core notifications onto the broadcast feed.
///
/// Registered as a move listener and placement observer when the runtime is
/// built. Sending is best-effort; a feed without subscribers is normal.
pub(crate) struct FeedBridge {
    feed: broadcast::Sender<WorldFeedEvent>,
}

impl FeedBridge {
    pub(crate) fn new(feed: broadcast::Sender<WorldFeedEvent>) -> Self {
        Self { feed }
    }

    fn publish(&self, event: WorldFeedEvent) {
        if self.feed.send(event).is_err() {
            trace!(target: "runtime::feed", "no subscribers on the world feed");
        }
    }
}

impl MoveListener for FeedBridge {
    fn name(&self) -> &'static str {
        "runtime_feed"
    }

    fn on_move_transition(&self, world: &mut World, transition: &MoveTransition) {
        if !transition.starting {
            return;
        }
        // The record is attached before the transition notification fires.
        let Some(record) = world
            .entities()
            .record(transition.into)
            .and_then(|entry| entry.moving_block)
        else {
            return;
        };
        self.publish(WorldFeedEvent::MoveStarted {
            actor: transition.into,
            from: record.from,
            to: record.to,
            ends_at: record.ends_at,
        });
    }

    fn on_move_finished(&self, _world: &mut World, subject: EntityId, success: bool) {
        self.publish(WorldFeedEvent::MoveFinished { subject, success });
    }
}

impl PlacementObserver for FeedBridge {
    fn name(&self) -> &'static str {
        "runtime_feed"
    }

    fn on_blocks_placed(&self, _world: &mut World, placed: &PlacedBlocks) {
        self.publish(WorldFeedEvent::BlocksChanged {
            issuer: placed.issuer,
            changes: placed.changes.clone(),
        });
    }
}
