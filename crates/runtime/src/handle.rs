//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! mutating the world or streaming feed events.
use tokio::sync::{broadcast, mpsc, oneshot};

use world_core::{CellPos, DamageOutcome, Direction, EntityId, TimeMs};

use crate::error::{Result, RuntimeError};
use crate::events::WorldFeedEvent;
use crate::worker::{CellSnapshot, Command};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    feed_tx: broadcast::Sender<WorldFeedEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        feed_tx: broadcast::Sender<WorldFeedEvent>,
    ) -> Self {
        Self {
            command_tx,
            feed_tx,
        }
    }

    /// Start a timed move of the block at `origin` one cell along
    /// `direction`, finalizing after `duration_ms` of simulated time.
    ///
    /// Resolves to true when the move was accepted and its cells reserved.
    pub async fn move_block(
        &self,
        origin: CellPos,
        direction: Direction,
        duration_ms: u64,
    ) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::MoveBlock {
                origin,
                direction,
                duration_ms,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Place a block by registry name, attributed to `issuer`.
    pub async fn place_block(
        &self,
        issuer: EntityId,
        pos: CellPos,
        block_name: impl Into<String>,
    ) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::PlaceBlock {
                issuer,
                pos,
                block_name: block_name.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Apply damage to the block at `pos`, attributed to `instigator`.
    pub async fn damage_block(
        &self,
        instigator: EntityId,
        pos: CellPos,
        amount: u32,
    ) -> Result<DamageOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::DamageBlock {
                instigator,
                pos,
                amount,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query one cell (read-only snapshot).
    pub async fn query_cell(&self, pos: CellPos) -> Result<CellSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryCell {
                pos,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance the simulated clock by `delta_ms`, firing any due
    /// finalizations, and return the new time.
    pub async fn advance(&self, delta_ms: u64) -> Result<TimeMs> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Advance {
                delta_ms,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to the outward event feed.
    pub fn subscribe(&self) -> broadcast::Receiver<WorldFeedEvent> {
        self.feed_tx.subscribe()
    }
}
