//! Grid directions for single-cell block movement.

/// Axis-aligned unit directions in the block grid.
///
/// `East`/`West` run along +x/-x, `Up`/`Down` along +y/-y and
/// `South`/`North` along +z/-z.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    East,
    West,
    Up,
    Down,
    South,
    North,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
        Direction::South,
        Direction::North,
    ];

    /// Unit offset of this direction in (x, y, z) cell coordinates.
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::East => (1, 0, 0),
            Direction::West => (-1, 0, 0),
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
            Direction::South => (0, 0, 1),
            Direction::North => (0, 0, -1),
        }
    }

    /// Returns the direction pointing the opposite way.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::South => Direction::North,
            Direction::North => Direction::South,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_unit_offsets() {
        for direction in Direction::ALL {
            let (dx, dy, dz) = direction.delta();
            assert_eq!(dx.abs() + dy.abs() + dz.abs(), 1);
        }
    }

    #[test]
    fn opposite_negates_the_delta() {
        for direction in Direction::ALL {
            let (dx, dy, dz) = direction.delta();
            let (ox, oy, oz) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy, dz + oz), (0, 0, 0));
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("east".parse::<Direction>().unwrap(), Direction::East);
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert!("northeast".parse::<Direction>().is_err());
    }
}
