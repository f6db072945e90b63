//! Async orchestration for the voxel-world simulation.
//!
//! This crate wires the deterministic [`world_core::World`] and its block
//! mover into a tokio-driven service. Consumers embed [`Runtime`] to spawn
//! the simulation worker, interact with the world through [`RuntimeHandle`],
//! and observe it through the broadcast feed.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`handle`] exposes the cloneable command façade
//! - [`events`] defines the outward feed and its core-side bridge
//! - [`error`] carries the unified error type
//! - the worker stays internal to the crate

pub mod error;
pub mod events;
pub mod handle;
pub mod runtime;

mod worker;

pub use error::{Result, RuntimeError};
pub use events::WorldFeedEvent;
pub use handle::RuntimeHandle;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use worker::CellSnapshot;
