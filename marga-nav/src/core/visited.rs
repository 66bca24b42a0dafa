//! Visited-state tracking for loop detection.
//!
//! A [`Signature`] packs a local navigation configuration (cell, direction,
//! wall side) into a single `u64`. [`VisitedStateSet`] hashes those keys,
//! so a session only pays for the states it actually reaches.

use std::collections::HashSet;

use super::{Cell, Direction, WallSide};

/// Packed navigation configuration.
///
/// Layout (low to high): 1 bit wall side, 4 bits direction ordinal,
/// 16 bits y, 16 bits x. Cell marks use `Direction::Center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature(u64);

impl Signature {
    const SIDE_BITS: u32 = 1;
    const DIR_BITS: u32 = 4;
    const COORD_BITS: u32 = 16;
    const COORD_MASK: u64 = (1 << Self::COORD_BITS) - 1;

    /// Signature of a wall-following state.
    ///
    /// Coordinates are truncated to 16 bits; grids are far smaller.
    pub fn new(cell: Cell, direction: Direction, side: WallSide) -> Self {
        let x = (cell.x as u64) & Self::COORD_MASK;
        let y = (cell.y as u64) & Self::COORD_MASK;
        let packed = (((x << Self::COORD_BITS) | y) << (Self::DIR_BITS + Self::SIDE_BITS))
            | ((direction.ordinal() as u64) << Self::SIDE_BITS)
            | side.bit();
        Self(packed)
    }

    /// Signature marking a cell as visited.
    pub fn cell(cell: Cell) -> Self {
        Self::new(cell, Direction::Center, WallSide::Left)
    }

    /// Raw packed value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Unpack the cell.
    pub fn position(self) -> Cell {
        let coords = self.0 >> (Self::DIR_BITS + Self::SIDE_BITS);
        Cell::new(
            ((coords >> Self::COORD_BITS) & Self::COORD_MASK) as i32,
            (coords & Self::COORD_MASK) as i32,
        )
    }

    /// Unpack the direction.
    pub fn direction(self) -> Direction {
        let ordinal = ((self.0 >> Self::SIDE_BITS) & ((1 << Self::DIR_BITS) - 1)) as usize;
        Direction::from_ordinal(ordinal).unwrap_or(Direction::Center)
    }

    /// Unpack the wall side.
    pub fn side(self) -> WallSide {
        if self.0 & 1 == 1 {
            WallSide::Right
        } else {
            WallSide::Left
        }
    }

    /// True for signatures produced by [`Signature::cell`].
    pub fn is_cell_mark(self) -> bool {
        self.direction() == Direction::Center
    }
}

/// Set of [`Signature`]s seen during one navigation session.
///
/// Sized by what the session touches, not by the grid: memory and
/// [`clear`](Self::clear) scale with the number of stored signatures.
/// Signatures whose cell lies outside the `width x height` grid are never
/// stored; inserting one reports it as new.
#[derive(Clone, Debug)]
pub struct VisitedStateSet {
    width: i32,
    height: i32,
    states: HashSet<u64>,
}

impl VisitedStateSet {
    const STATES_PER_CELL: usize = Direction::COUNT * 2;

    /// Create an empty set for a grid of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            states: HashSet::new(),
        }
    }

    /// Grid width this set accepts cells for.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height this set accepts cells for.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Insert a signature.
    ///
    /// Returns `true` if it was not present. A `false` return is how
    /// callers detect a repeated configuration.
    pub fn insert(&mut self, signature: Signature) -> bool {
        if !self.on_grid(signature) {
            return true;
        }
        self.states.insert(signature.raw())
    }

    /// Check membership.
    pub fn contains(&self, signature: Signature) -> bool {
        self.on_grid(signature) && self.states.contains(&signature.raw())
    }

    /// Mark a cell as visited. Returns `true` on first visit.
    pub fn mark_cell(&mut self, cell: Cell) -> bool {
        self.insert(Signature::cell(cell))
    }

    /// Has this cell been marked?
    pub fn is_cell_visited(&self, cell: Cell) -> bool {
        self.contains(Signature::cell(cell))
    }

    /// Number of stored signatures.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Remove everything and release the storage.
    pub fn clear(&mut self) {
        self.states = HashSet::new();
    }

    /// Upper bound on distinct signatures for this grid.
    pub fn max_states(&self) -> usize {
        self.width as usize * self.height as usize * Self::STATES_PER_CELL
    }

    /// Approximate heap memory held by the set in bytes.
    pub fn memory_usage(&self) -> usize {
        self.states.capacity() * (std::mem::size_of::<u64>() + 1)
    }

    fn on_grid(&self, signature: Signature) -> bool {
        let cell = signature.position();
        cell.x < self.width && cell.y < self.height
    }
}
