use crate::block::BlockId;
use crate::state::{CellPos, TimeMs};

/// Transition state carried by the actor of an in-flight block move.
///
/// Attached when the move starts and never mutated afterwards; the record
/// is dropped with its actor when the move finalizes or rolls back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovingBlockRecord {
    /// Block type travelling from `from` to `to`.
    pub block: BlockId,
    pub from: CellPos,
    pub to: CellPos,
    pub started_at: TimeMs,
    pub ends_at: TimeMs,
}

impl MovingBlockRecord {
    pub fn duration_ms(&self) -> u64 {
        self.ends_at.0.saturating_sub(self.started_at.0)
    }

    /// Fraction of the transition elapsed at `now`, clamped to [0, 1].
    ///
    /// Feed consumers use this to interpolate the block between its cells.
    pub fn progress(&self, now: TimeMs) -> f32 {
        let duration = self.duration_ms();
        if duration == 0 {
            return 1.0;
        }
        let elapsed = now.0.saturating_sub(self.started_at.0);
        (elapsed as f32 / duration as f32).clamp(0.0, 1.0)
    }
}
