//! Block damage requests and outcomes.

use crate::state::EntityId;

/// A damage application aimed at the block entity anchored to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockDamage {
    /// Entity the damage is attributed to.
    pub instigator: EntityId,
    /// Target block entity.
    pub target: EntityId,
    pub amount: u32,
}

impl BlockDamage {
    pub fn new(instigator: EntityId, target: EntityId, amount: u32) -> Self {
        Self {
            instigator,
            target,
            amount,
        }
    }
}

/// Guard decision for a damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageVerdict {
    Proceed,
    Cancel,
}

/// Result of pushing damage through the guarded path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    /// A guard cancelled the application before any effect.
    Cancelled,
    /// The target does not take damage.
    Ignored,
    /// Damage reduced the target's durability.
    Absorbed { remaining: u32 },
    /// Durability reached zero and the block was removed.
    Destroyed,
}
