//! Demo-specific configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Demo binary configuration.
///
/// The scripted scenario expects the content to define `stone` and `dirt`;
/// the built-in block set does.
#[derive(Clone, Debug, Default)]
pub struct DemoConfig {
    /// Directory holding `world.toml` and `blocks.ron`; built-in content
    /// when unset.
    pub data_dir: Option<PathBuf>,
    /// Move duration override; the world config default when unset.
    pub move_duration_ms: Option<u64>,
    /// Wall-clock tick step for the simulation worker; command-driven time
    /// when unset.
    pub tick_ms: Option<u64>,
}

impl DemoConfig {
    /// Construct demo configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MOVER_DATA_DIR` - Content directory (default: built-in block set)
    /// - `MOVER_MOVE_DURATION_MS` - Transition duration override
    /// - `MOVER_TICK_MS` - Wall-clock tick step for the simulation worker
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("MOVER_DATA_DIR").ok().map(PathBuf::from),
            move_duration_ms: read_env::<u64>("MOVER_MOVE_DURATION_MS"),
            tick_ms: read_env::<u64>("MOVER_TICK_MS"),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
