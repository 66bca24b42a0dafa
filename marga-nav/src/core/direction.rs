//! Compass directions on an 8-connected grid.

use serde::{Deserialize, Serialize};

/// One of the eight compass directions, or `Center` for "stay put".
///
/// North is +y, east is +x. Rotations step by 45°; `Center` rotates
/// to itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
    Center = 8,
}

impl Direction {
    /// The eight movement directions in clockwise order starting at north.
    pub const ADJACENT: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Number of distinct values including `Center`.
    pub const COUNT: usize = 9;

    /// Index in `0..9`, stable across releases (used in signatures).
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Inverse of [`ordinal`](Self::ordinal).
    #[inline]
    pub fn from_ordinal(ordinal: usize) -> Option<Direction> {
        match ordinal {
            0..=7 => Some(Self::ADJACENT[ordinal]),
            8 => Some(Direction::Center),
            _ => None,
        }
    }

    /// Unit offset `(dx, dy)`.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::Center => (0, 0),
        }
    }

    /// Direction for a unit offset, `None` if either component is outside `-1..=1`.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        let direction = match (dx, dy) {
            (0, 1) => Direction::North,
            (1, 1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, -1) => Direction::SouthEast,
            (0, -1) => Direction::South,
            (-1, -1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            (-1, 1) => Direction::NorthWest,
            (0, 0) => Direction::Center,
            _ => return None,
        };
        Some(direction)
    }

    /// Rotate 45° counter-clockwise.
    #[inline]
    pub fn rotate_left(self) -> Direction {
        match self {
            Direction::Center => Direction::Center,
            d => Self::ADJACENT[(d.ordinal() + 7) % 8],
        }
    }

    /// Rotate 45° clockwise.
    #[inline]
    pub fn rotate_right(self) -> Direction {
        match self {
            Direction::Center => Direction::Center,
            d => Self::ADJACENT[(d.ordinal() + 1) % 8],
        }
    }

    /// Opposite direction (`Center` stays `Center`).
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Center => Direction::Center,
            d => Self::ADJACENT[(d.ordinal() + 4) % 8],
        }
    }

    /// Number of 45° steps between two directions, in `0..=4`.
    ///
    /// Involving `Center` always yields 0 for `Center`/`Center` and 4 otherwise.
    pub fn rotation_steps(self, other: Direction) -> u32 {
        match (self, other) {
            (Direction::Center, Direction::Center) => 0,
            (Direction::Center, _) | (_, Direction::Center) => 4,
            (a, b) => {
                let diff = (a.ordinal() as i32 - b.ordinal() as i32).rem_euclid(8) as u32;
                diff.min(8 - diff)
            }
        }
    }

    /// True for the four diagonal directions.
    #[inline]
    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offset();
        dx != 0 && dy != 0
    }

    /// Short name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
            Direction::Center => "C",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the agent on which a followed wall is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    Left,
    #[default]
    Right,
}

impl WallSide {
    /// The other side.
    #[inline]
    pub fn flip(self) -> WallSide {
        match self {
            WallSide::Left => WallSide::Right,
            WallSide::Right => WallSide::Left,
        }
    }

    /// One-bit encoding used in signatures.
    #[inline]
    pub fn bit(self) -> u64 {
        match self {
            WallSide::Left => 0,
            WallSide::Right => 1,
        }
    }

    /// Rotate one step away from the wall.
    ///
    /// With the wall on the right the sweep turns left, and vice versa.
    #[inline]
    pub fn rotate_away(self, direction: Direction) -> Direction {
        match self {
            WallSide::Right => direction.rotate_left(),
            WallSide::Left => direction.rotate_right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_full_circle() {
        let mut d = Direction::North;
        for _ in 0..8 {
            d = d.rotate_left();
        }
        assert_eq!(d, Direction::North);

        assert_eq!(Direction::North.rotate_left(), Direction::NorthWest);
        assert_eq!(Direction::North.rotate_right(), Direction::NorthEast);
        assert_eq!(Direction::West.rotate_right(), Direction::NorthWest);
        assert_eq!(Direction::Center.rotate_left(), Direction::Center);
    }

    #[test]
    fn test_offset_round_trip() {
        for d in Direction::ADJACENT {
            let (dx, dy) = d.offset();
            assert_eq!(Direction::from_offset(dx, dy), Some(d));
            assert_eq!(Direction::from_ordinal(d.ordinal()), Some(d));
        }
        assert_eq!(Direction::from_offset(2, 0), None);
        assert_eq!(Direction::from_ordinal(9), None);
    }

    #[test]
    fn test_rotation_steps() {
        assert_eq!(Direction::East.rotation_steps(Direction::East), 0);
        assert_eq!(Direction::East.rotation_steps(Direction::NorthEast), 1);
        assert_eq!(Direction::East.rotation_steps(Direction::SouthEast), 1);
        assert_eq!(Direction::East.rotation_steps(Direction::West), 4);
        assert_eq!(Direction::North.rotation_steps(Direction::SouthWest), 3);
        assert_eq!(Direction::Center.rotation_steps(Direction::North), 4);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::NorthEast.opposite(), Direction::SouthWest);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert!(Direction::SouthWest.is_diagonal());
        assert!(!Direction::West.is_diagonal());
    }

    #[test]
    fn test_wall_side_rotation() {
        assert_eq!(WallSide::Right.rotate_away(Direction::East), Direction::NorthEast);
        assert_eq!(WallSide::Left.rotate_away(Direction::East), Direction::SouthEast);
        assert_eq!(WallSide::Right.flip(), WallSide::Left);
        assert_eq!(WallSide::default(), WallSide::Right);
    }
}
