use std::fmt;

use crate::geometry::Direction;

/// Unique identifier for any entity tracked in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the world authority itself.
    ///
    /// Mutations issued under this identity come from world-level
    /// orchestration (block relocation, scheduled finalization) rather than
    /// from any in-world actor. Placement guards treat them as trusted.
    pub const WORLD: Self = Self(u32::MAX);

    /// Returns true if this identity is the world authority.
    #[inline]
    pub const fn is_world(self) -> bool {
        self.0 == Self::WORLD.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete cell position in world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellPos {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the adjacent cell one step along `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.delta();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl Default for CellPos {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Milliseconds of simulated game time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeMs(pub u64);

impl TimeMs {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for TimeMs {
    type Output = TimeMs;
    fn add(self, rhs: u64) -> TimeMs {
        TimeMs(self.0 + rhs)
    }
}

impl std::ops::Sub<u64> for TimeMs {
    type Output = TimeMs;
    fn sub(self, rhs: u64) -> TimeMs {
        TimeMs(self.0 - rhs)
    }
}

impl fmt::Display for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of simulated time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    now: TimeMs,
}

impl GameClock {
    pub fn now(&self) -> TimeMs {
        self.now
    }

    /// Advances the clock by `delta_ms` and returns the new time.
    pub fn advance(&mut self, delta_ms: u64) -> TimeMs {
        self.now = self.now + delta_ms;
        self.now
    }
}

/// Integer resource meter (durability, charge) tracked per entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Removes up to `amount`, returning the remaining value.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_applies_the_direction_delta() {
        let origin = CellPos::new(3, -1, 7);
        assert_eq!(origin.step(Direction::East), CellPos::new(4, -1, 7));
        assert_eq!(origin.step(Direction::Down), CellPos::new(3, -2, 7));
        assert_eq!(origin.step(Direction::North), CellPos::new(3, -1, 6));
    }

    #[test]
    fn clock_advances_monotonically() {
        let mut clock = GameClock::default();
        assert_eq!(clock.now(), TimeMs::ZERO);
        assert_eq!(clock.advance(250), TimeMs(250));
        assert_eq!(clock.advance(0), TimeMs(250));
        assert_eq!(clock.advance(750), TimeMs(1_000));
    }

    #[test]
    fn meter_depletes_to_zero_and_saturates() {
        let mut meter = ResourceMeter::full(10);
        assert_eq!(meter.deplete(4), 6);
        assert_eq!(meter.deplete(100), 0);
        assert!(meter.is_empty());
        assert_eq!(meter.maximum, 10);
    }
}
