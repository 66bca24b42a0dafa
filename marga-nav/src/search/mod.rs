//! Short-horizon search over the locally sensed neighborhood.
//!
//! A [`LocalSearch`] proposes the first step of a short path that makes
//! progress toward the target, using only cells the agent can sense. It
//! never acts: the [`Navigator`](crate::Navigator) commits the step.
//!
//! Two strategies are available:
//! - [`GreedyNeighbor`]: breadth-first reachability, pick the reachable
//!   unvisited cell nearest the target.
//! - [`FrontierRelaxation`]: weighted relaxation over a precomputed offset
//!   table, pick the outer-ring cell with the best progress per cost.

mod frontier;
mod greedy;

pub use frontier::FrontierRelaxation;
pub use greedy::GreedyNeighbor;

use serde::Deserialize;

use crate::agent::GridAgent;
use crate::config::SearchConfig;
use crate::core::{Cell, Direction, VisitedStateSet};

/// Local search strategy.
pub trait LocalSearch {
    /// Direction of the first step toward the best local candidate.
    ///
    /// `None` means nothing within range improves on the current cell,
    /// which is the trigger for wall-following.
    fn best_direction<A: GridAgent + ?Sized>(
        &self,
        agent: &A,
        target: Cell,
        visited: &VisitedStateSet,
    ) -> Option<Direction>;
}

/// Strategy selector used in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    #[serde(alias = "greedy")]
    GreedyNeighbor,
    #[serde(alias = "frontier")]
    FrontierRelaxation,
}

impl SearchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::GreedyNeighbor => "greedy",
            SearchStrategy::FrontierRelaxation => "frontier",
        }
    }
}

/// Configured search, dispatching to the selected strategy.
#[derive(Clone, Debug)]
pub enum LocalSearcher {
    Greedy(GreedyNeighbor),
    Frontier(FrontierRelaxation),
}

impl LocalSearcher {
    /// Build the searcher described by `config`.
    pub fn new(config: &SearchConfig, allow_fill: bool) -> Self {
        match config.strategy {
            SearchStrategy::GreedyNeighbor => LocalSearcher::Greedy(GreedyNeighbor::new(
                config.sensing_radius_squared,
                allow_fill,
            )),
            SearchStrategy::FrontierRelaxation => {
                LocalSearcher::Frontier(FrontierRelaxation::new(
                    config.sensing_radius_squared,
                    config.fill_cost_base,
                    allow_fill,
                ))
            }
        }
    }

    pub fn strategy(&self) -> SearchStrategy {
        match self {
            LocalSearcher::Greedy(_) => SearchStrategy::GreedyNeighbor,
            LocalSearcher::Frontier(_) => SearchStrategy::FrontierRelaxation,
        }
    }
}

impl LocalSearch for LocalSearcher {
    fn best_direction<A: GridAgent + ?Sized>(
        &self,
        agent: &A,
        target: Cell,
        visited: &VisitedStateSet,
    ) -> Option<Direction> {
        match self {
            LocalSearcher::Greedy(search) => search.best_direction(agent, target, visited),
            LocalSearcher::Frontier(search) => search.best_direction(agent, target, visited),
        }
    }
}

/// Is a non-adjacent cell known to be enterable (possibly after a fill)?
///
/// Unsensed cells are treated as blocked.
fn sensed_visitable<A: GridAgent + ?Sized>(agent: &A, cell: Cell, allow_fill: bool) -> bool {
    if !agent.on_map(cell) || !agent.can_sense(cell) {
        return false;
    }
    match agent.sense_passable(cell) {
        Some(true) => true,
        Some(false) => allow_fill && agent.sense_fillable(cell),
        None => false,
    }
}

/// Largest `r` with `r * r <= radius_squared`.
fn radius_from_squared(radius_squared: i32) -> i32 {
    let mut r = 0;
    while (r + 1) * (r + 1) <= radius_squared {
        r += 1;
    }
    r
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Minimal in-memory agent for search unit tests.

    use super::*;

    /// Open grid with a set of blocked and fillable cells.
    pub struct MockAgent {
        pub position: Cell,
        pub width: i32,
        pub height: i32,
        pub sense_radius_squared: i32,
        pub blocked: Vec<Cell>,
        pub fillable: Vec<Cell>,
    }

    impl MockAgent {
        pub fn open(position: Cell, width: i32, height: i32) -> Self {
            Self {
                position,
                width,
                height,
                sense_radius_squared: 20,
                blocked: Vec::new(),
                fillable: Vec::new(),
            }
        }

        pub fn with_blocked(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
            self.blocked.extend(cells);
            self
        }

        pub fn with_fillable(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
            self.fillable.extend(cells);
            self
        }
    }

    impl GridAgent for MockAgent {
        fn position(&self) -> Cell {
            self.position
        }
        fn width(&self) -> i32 {
            self.width
        }
        fn height(&self) -> i32 {
            self.height
        }
        fn can_sense(&self, cell: Cell) -> bool {
            self.position.distance_squared(&cell) <= self.sense_radius_squared
        }
        fn sense_passable(&self, cell: Cell) -> Option<bool> {
            if !self.on_map(cell) || !self.can_sense(cell) {
                return None;
            }
            Some(!self.blocked.contains(&cell) && !self.fillable.contains(&cell))
        }
        fn sense_fillable(&self, cell: Cell) -> bool {
            self.fillable.contains(&cell)
        }
        fn is_movement_ready(&self) -> bool {
            true
        }
        fn can_move(&self, direction: Direction) -> bool {
            let cell = self.position.step(direction);
            direction != Direction::Center
                && self.on_map(cell)
                && self.sense_passable(cell) == Some(true)
        }
        fn move_agent(&mut self, direction: Direction) -> bool {
            if !self.can_move(direction) {
                return false;
            }
            self.position = self.position.step(direction);
            true
        }
        fn can_fill(&self, cell: Cell) -> bool {
            self.position.is_adjacent_to(&cell) && self.fillable.contains(&cell)
        }
        fn fill(&mut self, cell: Cell) -> bool {
            if !self.can_fill(cell) {
                return false;
            }
            self.fillable.retain(|c| *c != cell);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::MockAgent;
    use super::*;

    #[test]
    fn test_radius_from_squared() {
        assert_eq!(radius_from_squared(2), 1);
        assert_eq!(radius_from_squared(20), 4);
        assert_eq!(radius_from_squared(25), 5);
    }

    #[test]
    fn test_sensed_visitable() {
        let agent = MockAgent::open(Cell::new(0, 0), 10, 10)
            .with_blocked([Cell::new(2, 0)])
            .with_fillable([Cell::new(0, 2)]);

        assert!(sensed_visitable(&agent, Cell::new(2, 2), false));
        assert!(!sensed_visitable(&agent, Cell::new(2, 0), true));
        assert!(!sensed_visitable(&agent, Cell::new(0, 2), false));
        assert!(sensed_visitable(&agent, Cell::new(0, 2), true));
        // Out of sensing range
        assert!(!sensed_visitable(&agent, Cell::new(5, 5), true));
        // Off the grid
        assert!(!sensed_visitable(&agent, Cell::new(-1, 0), true));
    }

    #[test]
    fn test_searcher_follows_config() {
        let mut config = SearchConfig::default();
        assert_eq!(
            LocalSearcher::new(&config, true).strategy(),
            SearchStrategy::GreedyNeighbor
        );
        config.strategy = SearchStrategy::FrontierRelaxation;
        assert_eq!(
            LocalSearcher::new(&config, true).strategy(),
            SearchStrategy::FrontierRelaxation
        );
    }
}
