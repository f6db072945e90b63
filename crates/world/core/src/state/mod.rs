//! World state containers: identity, time, cells and entities.
mod common;
mod entity;
mod grid;

pub use common::{CellPos, EntityId, GameClock, ResourceMeter, TimeMs};
pub use entity::{EntityRecord, EntityStore};
pub use grid::CellGrid;
