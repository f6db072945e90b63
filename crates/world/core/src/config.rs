/// World configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Transition duration applied when a move request does not carry one.
    pub default_move_duration_ms: u64,
}

impl WorldConfig {
    // ===== compile-time limits =====
    /// Maximum number of cells a single placement batch may touch.
    pub const MAX_CELLS_PER_BATCH: usize = 32;
    /// Maximum number of block definitions a catalog can hold.
    pub const MAX_BLOCK_DEFS: usize = 4096;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_DURATION_MS: u64 = 1_000;

    pub fn new() -> Self {
        Self {
            default_move_duration_ms: Self::DEFAULT_MOVE_DURATION_MS,
        }
    }

    pub fn with_move_duration(default_move_duration_ms: u64) -> Self {
        Self {
            default_move_duration_ms,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}
