//! Deterministic voxel-world simulation core.
//!
//! `world-core` owns the canonical world state (cells, entities, clock,
//! delayed actions) and the guarded mutation paths layered on top of it. The
//! centerpiece is [`mover::BlockMover`], which relocates a block over game
//! time while placement and damage guards keep the transitional cells safe
//! from interference. All cell mutation flows through
//! [`world::World::try_place_blocks`], and supporting crates depend on the
//! types re-exported here.
pub mod block;
pub mod config;
pub mod damage;
pub mod event;
pub mod geometry;
pub mod mover;
pub mod placement;
pub mod schedule;
pub mod state;
pub mod world;

pub use block::{
    AIR_BLOCK_NAME, BlockCatalog, BlockDef, BlockFlags, BlockId, CatalogError,
    PLACEHOLDER_BLOCK_NAME,
};
pub use config::WorldConfig;
pub use damage::{BlockDamage, DamageOutcome, DamageVerdict};
pub use event::{
    DamageGuard, DelayedActionHandler, EventHub, MoveListener, MoveTransition, PlacementGuard,
    PlacementObserver, PlacementVerdict,
};
pub use geometry::Direction;
pub use mover::{BlockMover, MATERIALIZE_ACTION_ID, MovingBlockRecord};
pub use placement::{CellChange, PlaceBlocksRequest, PlaceError, PlacedBlocks};
pub use schedule::{DelayedAction, DelaySchedule};
pub use state::{
    CellGrid, CellPos, EntityId, EntityRecord, EntityStore, GameClock, ResourceMeter, TimeMs,
};
pub use world::World;
