//! Grid cell coordinates.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::Direction;

/// Integer grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cell {
    /// X coordinate (column index, grows east)
    pub x: i32,
    /// Y coordinate (row index, grows north)
    pub y: i32,
}

impl Cell {
    /// Create a new cell
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another cell
    #[inline]
    pub fn distance_squared(&self, other: &Cell) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Chebyshev distance (max of x and y distance) - number of king moves on an 8-connected grid
    #[inline]
    pub fn chebyshev_distance(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Neighbor in the given direction
    #[inline]
    pub fn step(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        *self + Cell::new(dx, dy)
    }

    /// Approximate compass direction toward another cell.
    ///
    /// Cardinal directions cover a ±22.5° cone: the direction is east/west
    /// when `|dx| >= 2.414 * |dy|`, north/south when `|dy| >= 2.414 * |dx|`,
    /// and diagonal otherwise. Returns `Center` for the same cell.
    pub fn direction_to(&self, other: &Cell) -> Direction {
        let dx = (other.x - self.x) as i64;
        let dy = (other.y - self.y) as i64;
        let (ax, ay) = (dx.abs(), dy.abs());

        // tan(67.5°) ≈ 2.414, kept in integer arithmetic
        if ax * 1000 >= ay * 2414 {
            match dx.signum() {
                1 => Direction::East,
                -1 => Direction::West,
                _ => Direction::Center,
            }
        } else if ay * 1000 >= ax * 2414 {
            if dy > 0 {
                Direction::North
            } else {
                Direction::South
            }
        } else {
            match (dx > 0, dy > 0) {
                (true, true) => Direction::NorthEast,
                (false, true) => Direction::NorthWest,
                (true, false) => Direction::SouthEast,
                (false, false) => Direction::SouthWest,
            }
        }
    }

    /// Is the other cell one of the 8 neighbors?
    #[inline]
    pub fn is_adjacent_to(&self, other: &Cell) -> bool {
        self != other && self.chebyshev_distance(other) == 1
    }

    /// Get the 8 neighbors in `Direction::ADJACENT` order
    #[inline]
    pub fn neighbors_8(&self) -> [Cell; 8] {
        Direction::ADJACENT.map(|d| self.step(d))
    }
}

impl Add for Cell {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Cell::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Cell {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Cell::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
