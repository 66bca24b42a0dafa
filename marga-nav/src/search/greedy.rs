//! Breadth-first greedy neighbor search.

use std::collections::VecDeque;

use super::{LocalSearch, radius_from_squared, sensed_visitable};
use crate::agent::{GridAgent, can_step};
use crate::core::{Cell, Direction, VisitedStateSet};

/// Reach every enterable cell within the sensing radius, then step toward
/// the unvisited one nearest the target.
///
/// The first ring is seeded in order of rotation away from the heading,
/// so a cell reachable through several first steps inherits the one most
/// aligned with the target.
#[derive(Clone, Debug)]
pub struct GreedyNeighbor {
    radius_squared: i32,
    radius: i32,
    allow_fill: bool,
}

impl GreedyNeighbor {
    pub fn new(radius_squared: i32, allow_fill: bool) -> Self {
        Self {
            radius_squared,
            radius: radius_from_squared(radius_squared),
            allow_fill,
        }
    }

    #[inline]
    fn side(&self) -> i32 {
        2 * self.radius + 1
    }

    /// Index into the local window, `None` outside the sensing radius.
    #[inline]
    fn window_index(&self, dx: i32, dy: i32) -> Option<usize> {
        if dx * dx + dy * dy > self.radius_squared {
            return None;
        }
        Some(((dy + self.radius) * self.side() + (dx + self.radius)) as usize)
    }
}

impl LocalSearch for GreedyNeighbor {
    fn best_direction<A: GridAgent + ?Sized>(
        &self,
        agent: &A,
        target: Cell,
        visited: &VisitedStateSet,
    ) -> Option<Direction> {
        let origin = agent.position();
        let heading = origin.direction_to(&target);
        let current_d2 = origin.distance_squared(&target);

        let side = self.side() as usize;
        let mut first_step: Vec<Option<Direction>> = vec![None; side * side];
        let mut reached: Vec<Cell> = Vec::new();
        let mut queue = VecDeque::new();

        let mut seeds = Direction::ADJACENT;
        seeds.sort_by_key(|d| d.rotation_steps(heading));

        for direction in seeds {
            let cell = origin.step(direction);
            let (dx, dy) = direction.offset();
            let Some(index) = self.window_index(dx, dy) else {
                continue;
            };
            if can_step(agent, direction, self.allow_fill) {
                first_step[index] = Some(direction);
                reached.push(cell);
                queue.push_back(cell);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let offset = cell - origin;
            let Some(inherited) = self
                .window_index(offset.x, offset.y)
                .and_then(|i| first_step[i])
            else {
                continue;
            };

            for next in cell.neighbors_8() {
                let offset = next - origin;
                if offset == Cell::default() {
                    continue;
                }
                let Some(index) = self.window_index(offset.x, offset.y) else {
                    continue;
                };
                if first_step[index].is_some() || !sensed_visitable(agent, next, self.allow_fill) {
                    continue;
                }
                first_step[index] = Some(inherited);
                reached.push(next);
                queue.push_back(next);
            }
        }

        reached
            .into_iter()
            .filter(|cell| !visited.is_cell_visited(*cell))
            .filter_map(|cell| {
                let d2 = cell.distance_squared(&target);
                if d2 >= current_d2 {
                    return None;
                }
                let offset = cell - origin;
                let index = self.window_index(offset.x, offset.y)?;
                let step = first_step[index]?;
                Some((d2, step.rotation_steps(heading), cell.x, cell.y, step))
            })
            .min_by_key(|&(d2, rotation, x, y, _)| (d2, rotation, x, y))
            .map(|(.., step)| step)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::MockAgent;
    use super::*;

    fn search() -> GreedyNeighbor {
        GreedyNeighbor::new(20, true)
    }

    #[test]
    fn test_open_terrain_heads_straight() {
        let agent = MockAgent::open(Cell::new(0, 0), 10, 10);
        let visited = VisitedStateSet::new(10, 10);

        let d = search().best_direction(&agent, Cell::new(5, 0), &visited);
        assert_eq!(d, Some(Direction::East));

        let d = search().best_direction(&agent, Cell::new(6, 6), &visited);
        assert_eq!(d, Some(Direction::NorthEast));
    }

    #[test]
    fn test_routes_around_single_block() {
        let agent = MockAgent::open(Cell::new(0, 0), 10, 10).with_blocked([Cell::new(1, 0)]);
        let visited = VisitedStateSet::new(10, 10);

        // (4, 0) is still reachable through the northeast cell
        let d = search().best_direction(&agent, Cell::new(5, 0), &visited);
        assert_eq!(d, Some(Direction::NorthEast));
    }

    #[test]
    fn test_none_when_walled_in() {
        let wall = (0..10).map(|y| Cell::new(2, y));
        let agent = MockAgent::open(Cell::new(1, 0), 10, 10).with_blocked(wall);
        let visited = VisitedStateSet::new(10, 10);

        // Every reachable cell is no closer to the target than the agent
        let d = search().best_direction(&agent, Cell::new(5, 0), &visited);
        assert_eq!(d, None);
    }

    #[test]
    fn test_skips_visited_cells() {
        let agent = MockAgent::open(Cell::new(0, 0), 10, 10);
        let mut visited = VisitedStateSet::new(10, 10);
        visited.mark_cell(Cell::new(1, 0));

        // Nearest candidate (4, 0) is unvisited; its first step is still east
        let d = search().best_direction(&agent, Cell::new(5, 0), &visited);
        assert_eq!(d, Some(Direction::East));

        // When the only improving cell is visited there is nothing to do
        let d = search().best_direction(&agent, Cell::new(1, 0), &visited);
        assert_eq!(d, None);
    }

    #[test]
    fn test_fill_gated_by_config() {
        let wall = (0..10).map(|y| Cell::new(1, y));
        let agent = MockAgent::open(Cell::new(0, 5), 10, 10).with_fillable(wall);
        let visited = VisitedStateSet::new(10, 10);

        let target = Cell::new(5, 5);
        assert_eq!(
            GreedyNeighbor::new(20, true).best_direction(&agent, target, &visited),
            Some(Direction::East)
        );
        assert_eq!(
            GreedyNeighbor::new(20, false).best_direction(&agent, target, &visited),
            None
        );
    }
}
