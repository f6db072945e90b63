//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the world.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use world_core::{BlockMover, World, WorldConfig};

use crate::error::{Result, RuntimeError};
use crate::events::{FeedBridge, WorldFeedEvent};
use crate::handle::RuntimeHandle;
use crate::worker::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// When set, the worker advances the simulated clock by this many
    /// milliseconds at the same wall-clock cadence. Unset keeps time fully
    /// command-driven.
    pub tick_ms: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_ms: None,
        }
    }
}

/// Main runtime that orchestrates the world simulation
///
/// Design: Runtime owns the worker and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to the outward event feed
    pub fn subscribe(&self) -> broadcast::Receiver<WorldFeedEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Drops this runtime's handle and waits for the worker to drain.
    /// Outstanding cloned handles keep the worker alive until they drop too.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world_config: WorldConfig,
    world: Option<World>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world_config: WorldConfig::default(),
            world: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration for the default-assembled world.
    ///
    /// Ignored when an explicit world is provided.
    pub fn world_config(mut self, config: WorldConfig) -> Self {
        self.world_config = config;
        self
    }

    /// Provide a prepared world instead of assembling one from the built-in
    /// block set.
    ///
    /// The mover is installed during build; pass a world without one.
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let mut world = match self.world {
            Some(world) => world,
            None => {
                let catalog = world_content::builtin_catalog()
                    .map_err(|e| RuntimeError::BuiltinContent(format!("{e:#}")))?;
                World::new(self.world_config, catalog)
            }
        };
        let mover = BlockMover::install(&mut world).map_err(RuntimeError::MoverInstall)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (feed_tx, _feed_rx) =
            broadcast::channel::<WorldFeedEvent>(self.config.event_buffer_size);

        // Bridge core notifications onto the outward feed.
        let bridge = Arc::new(FeedBridge::new(feed_tx.clone()));
        world.hub_mut().register_move_listener(bridge.clone());
        world.hub_mut().register_placement_observer(bridge);

        let handle = RuntimeHandle::new(command_tx, feed_tx.clone());

        let worker = SimulationWorker::new(world, mover, command_rx, feed_tx, self.config.tick_ms);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
