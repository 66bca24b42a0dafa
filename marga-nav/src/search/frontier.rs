//! Weighted relaxation over a precomputed offset table.
//!
//! Offsets within the sensing radius are laid out once, sorted by distance
//! from the agent. Each search runs three Bellman-Ford style passes over
//! that order (outward, inward, outward) so path costs can bend around
//! obstacles, then scores the outer ring by progress per unit of cost.

use super::{LocalSearch, radius_from_squared, sensed_visitable};
use crate::agent::{GridAgent, can_step};
use crate::core::{Cell, Direction, VisitedStateSet};

const UNREACHABLE: u32 = 1_000_000;

/// Neighbor order used when building the table. Cardinals come first so
/// equal-cost paths keep the straightest first step.
const NEIGHBOR_ORDER: [Direction; 8] = [
    Direction::West,
    Direction::East,
    Direction::South,
    Direction::North,
    Direction::SouthWest,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::NorthEast,
];

#[derive(Clone, Debug)]
struct OffsetEntry {
    dx: i32,
    dy: i32,
    /// Neighbor indices strictly nearer the origin (origin excluded)
    nearer: Vec<usize>,
    /// Neighbor indices at least as far from the origin
    farther: Vec<usize>,
    /// Has a neighbor outside the radius
    outer_ring: bool,
}

impl OffsetEntry {
    #[inline]
    fn distance_squared(&self) -> i32 {
        self.dx * self.dx + self.dy * self.dy
    }

    #[inline]
    fn is_inner_ring(&self) -> bool {
        self.distance_squared() <= 2
    }
}

/// Frontier search scoring outer-ring cells by `(progress) / (path cost)`.
#[derive(Clone, Debug)]
pub struct FrontierRelaxation {
    entries: Vec<OffsetEntry>,
    fill_cost_base: u32,
    allow_fill: bool,
}

impl FrontierRelaxation {
    pub fn new(radius_squared: i32, fill_cost_base: i32, allow_fill: bool) -> Self {
        Self {
            entries: build_offset_table(radius_squared),
            fill_cost_base: fill_cost_base.max(1) as u32,
            allow_fill,
        }
    }

    /// Number of offsets in the table (origin excluded).
    pub fn table_len(&self) -> usize {
        self.entries.len()
    }

    /// Number of outer-ring offsets.
    pub fn outer_ring_len(&self) -> usize {
        self.entries.iter().filter(|e| e.outer_ring).count()
    }

    fn weight<A: GridAgent + ?Sized>(&self, agent: &A, cell: Cell, entry: &OffsetEntry) -> u32 {
        match agent.sense_passable(cell) {
            Some(true) => 1,
            _ => self.fill_cost_base + entry.dx.abs().max(entry.dy.abs()) as u32,
        }
    }
}

impl LocalSearch for FrontierRelaxation {
    fn best_direction<A: GridAgent + ?Sized>(
        &self,
        agent: &A,
        target: Cell,
        visited: &VisitedStateSet,
    ) -> Option<Direction> {
        let origin = agent.position();
        let n = self.entries.len();

        let mut visitable = vec![false; n];
        let mut weights = vec![UNREACHABLE; n];
        let mut inner_open = Vec::new();

        for (i, entry) in self.entries.iter().enumerate() {
            let cell = Cell::new(origin.x + entry.dx, origin.y + entry.dy);
            visitable[i] = if entry.is_inner_ring() {
                Direction::from_offset(entry.dx, entry.dy)
                    .is_some_and(|d| can_step(agent, d, self.allow_fill))
            } else {
                sensed_visitable(agent, cell, self.allow_fill)
            };
            if visitable[i] {
                weights[i] = self.weight(agent, cell, entry);
                if entry.is_inner_ring() {
                    inner_open.push(i);
                }
            }
        }

        // A single way out needs no scoring
        match inner_open.as_slice() {
            [] => return None,
            [only] => {
                let e = &self.entries[*only];
                return Direction::from_offset(e.dx, e.dy);
            }
            _ => {}
        }

        let mut cost = vec![UNREACHABLE; n];
        let mut step: Vec<Option<Direction>> = vec![None; n];

        for i in 0..n {
            if !visitable[i] {
                continue;
            }
            let entry = &self.entries[i];
            if entry.is_inner_ring() {
                cost[i] = weights[i];
                step[i] = Direction::from_offset(entry.dx, entry.dy);
            } else {
                relax(i, &entry.nearer, &mut cost, &mut step, weights[i]);
            }
        }
        for i in (0..n).rev() {
            if visitable[i] {
                relax(i, &self.entries[i].farther, &mut cost, &mut step, weights[i]);
            }
        }
        for i in 0..n {
            if visitable[i] {
                relax(i, &self.entries[i].nearer, &mut cost, &mut step, weights[i]);
            }
        }

        let current_d2 = origin.distance_squared(&target) as f64;
        let mut best = None;
        let mut best_score = 0.0;

        for (i, entry) in self.entries.iter().enumerate() {
            if !entry.outer_ring || cost[i] >= UNREACHABLE {
                continue;
            }
            let cell = Cell::new(origin.x + entry.dx, origin.y + entry.dy);
            if visited.is_cell_visited(cell) {
                continue;
            }
            let score = (current_d2 - cell.distance_squared(&target) as f64) / cost[i] as f64;
            if score > best_score {
                best_score = score;
                best = step[i];
            }
        }

        best
    }
}

/// Lower `cost[index]` through any cheaper neighbor, inheriting its first step.
fn relax(
    index: usize,
    neighbors: &[usize],
    cost: &mut [u32],
    step: &mut [Option<Direction>],
    weight: u32,
) {
    for &n in neighbors {
        let candidate = cost[n].saturating_add(weight);
        if candidate < cost[index] {
            cost[index] = candidate;
            step[index] = step[n];
        }
    }
}

/// Lay out every non-zero offset within `radius_squared`, nearest first.
fn build_offset_table(radius_squared: i32) -> Vec<OffsetEntry> {
    let radius = radius_from_squared(radius_squared);
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 > 0 && d2 <= radius_squared {
                offsets.push((dx, dy));
            }
        }
    }
    offsets.sort_by_key(|&(dx, dy)| (dx * dx + dy * dy, dy, dx));

    let index_of = |dx: i32, dy: i32| offsets.iter().position(|&o| o == (dx, dy));

    offsets
        .iter()
        .map(|&(dx, dy)| {
            let d2 = dx * dx + dy * dy;
            let mut entry = OffsetEntry {
                dx,
                dy,
                nearer: Vec::new(),
                farther: Vec::new(),
                outer_ring: false,
            };
            for direction in NEIGHBOR_ORDER {
                let (sx, sy) = direction.offset();
                let (nx, ny) = (dx + sx, dy + sy);
                let nd2 = nx * nx + ny * ny;
                if nd2 > radius_squared {
                    entry.outer_ring = true;
                } else if nd2 < d2 {
                    entry.nearer.extend(index_of(nx, ny));
                } else {
                    entry.farther.extend(index_of(nx, ny));
                }
            }
            entry
        })
        .collect()
}
