//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and world mutation so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use world_core::{CatalogError, PlaceError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("unknown block name {0:?}")]
    UnknownBlockName(String),

    #[error(transparent)]
    Placement(#[from] PlaceError),

    #[error("failed to load built-in content: {0}")]
    BuiltinContent(String),

    #[error("failed to install the block mover")]
    MoverInstall(#[source] CatalogError),
}
