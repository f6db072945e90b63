//! Simulation worker that owns the authoritative [`world_core::World`].
//!
//! Receives commands from [`crate::handle::RuntimeHandle`], drives the world
//! and its block mover, and publishes [`WorldFeedEvent`] notifications.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use world_core::{
    BlockDamage, BlockId, BlockMover, CellPos, DamageOutcome, Direction, EntityId,
    PlaceBlocksRequest, TimeMs, World,
};

use crate::error::{Result, RuntimeError};
use crate::events::WorldFeedEvent;

/// Commands that can be sent to the simulation worker
pub(crate) enum Command {
    /// Start a timed block move.
    MoveBlock {
        origin: CellPos,
        direction: Direction,
        duration_ms: u64,
        reply: oneshot::Sender<bool>,
    },
    /// Place a block by registry name.
    PlaceBlock {
        issuer: EntityId,
        pos: CellPos,
        block_name: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Apply damage to the block at a cell.
    DamageBlock {
        instigator: EntityId,
        pos: CellPos,
        amount: u32,
        reply: oneshot::Sender<DamageOutcome>,
    },
    /// Query one cell (read-only).
    QueryCell {
        pos: CellPos,
        reply: oneshot::Sender<CellSnapshot>,
    },
    /// Advance the simulated clock.
    Advance {
        delta_ms: u64,
        reply: oneshot::Sender<TimeMs>,
    },
}

/// Read-only description of one cell at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub pos: CellPos,
    pub block: BlockId,
    pub block_name: String,
    /// Block entity bound to the cell, if one has been materialized.
    pub binding: Option<EntityId>,
    /// True while the cell is reserved by an in-flight move.
    pub reserved: bool,
}

/// Background task that processes world commands.
pub(crate) struct SimulationWorker {
    world: World,
    mover: BlockMover,
    command_rx: mpsc::Receiver<Command>,
    feed_tx: broadcast::Sender<WorldFeedEvent>,
    tick_ms: Option<u64>,
}

impl SimulationWorker {
    pub(crate) fn new(
        world: World,
        mover: BlockMover,
        command_rx: mpsc::Receiver<Command>,
        feed_tx: broadcast::Sender<WorldFeedEvent>,
        tick_ms: Option<u64>,
    ) -> Self {
        Self {
            world,
            mover,
            command_rx,
            feed_tx,
            tick_ms,
        }
    }

    /// Main worker loop. Returns when every command sender is gone.
    pub(crate) async fn run(mut self) {
        debug!(target: "runtime::worker", "simulation worker started");
        match self.tick_ms {
            Some(step_ms) => self.run_ticking(step_ms).await,
            None => self.run_stepped().await,
        }
        debug!(target: "runtime::worker", "simulation worker stopped");
    }

    /// Command-driven loop; the clock moves only via `Command::Advance`.
    async fn run_stepped(&mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
    }

    /// Wall-clock loop advancing the simulation by `step_ms` per tick.
    async fn run_ticking(&mut self, step_ms: u64) {
        let period = Duration::from_millis(step_ms);
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = ticker.tick() => {
                    self.advance_world(step_ms);
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::MoveBlock {
                origin,
                direction,
                duration_ms,
                reply,
            } => {
                let moved = self
                    .mover
                    .move_block(&mut self.world, origin, direction, duration_ms);
                let _ = reply.send(moved);
            }
            Command::PlaceBlock {
                issuer,
                pos,
                block_name,
                reply,
            } => {
                let _ = reply.send(self.place_block(issuer, pos, &block_name));
            }
            Command::DamageBlock {
                instigator,
                pos,
                amount,
                reply,
            } => {
                let _ = reply.send(self.damage_block(instigator, pos, amount));
            }
            Command::QueryCell { pos, reply } => {
                let _ = reply.send(self.snapshot_cell(pos));
            }
            Command::Advance { delta_ms, reply } => {
                let _ = reply.send(self.advance_world(delta_ms));
            }
        }
    }

    fn place_block(&mut self, issuer: EntityId, pos: CellPos, block_name: &str) -> Result<()> {
        let block = self
            .world
            .catalog()
            .lookup(block_name)
            .ok_or_else(|| RuntimeError::UnknownBlockName(block_name.to_string()))?;
        self.world
            .try_place_blocks(PlaceBlocksRequest::single(issuer, pos, block))?;
        Ok(())
    }

    fn damage_block(&mut self, instigator: EntityId, pos: CellPos, amount: u32) -> DamageOutcome {
        let target = self.world.block_entity_at(pos);
        let outcome = self
            .world
            .deal_block_damage(BlockDamage::new(instigator, target, amount));
        if outcome == DamageOutcome::Cancelled {
            let _ = self
                .feed_tx
                .send(WorldFeedEvent::DamageBlocked { target, instigator });
        }
        outcome
    }

    fn snapshot_cell(&self, pos: CellPos) -> CellSnapshot {
        let block = self.world.block_at(pos);
        let def = self.world.catalog().get(block);
        CellSnapshot {
            pos,
            block,
            block_name: def.map(|d| d.name.clone()).unwrap_or_default(),
            binding: self.world.grid().binding(pos),
            reserved: def.is_some_and(|d| d.is_placeholder()),
        }
    }

    fn advance_world(&mut self, delta_ms: u64) -> TimeMs {
        let now = self.world.advance(delta_ms);
        let _ = self.feed_tx.send(WorldFeedEvent::TimeAdvanced { now });
        now
    }
}
