//! Data-driven world content and loaders.
//!
//! This crate houses the built-in block set and provides loaders for RON/TOML
//! data files:
//! - Block definitions (data-driven via RON)
//! - World configuration (data-driven via TOML)
//!
//! Content is consumed while assembling a world and never appears in world
//! state; the simulation only ever sees the resulting catalog and config.
//!
//! All loaders use world-core types directly with serde for RON/TOML
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BlockSetLoader, ConfigLoader, ContentFactory, builtin_catalog};
