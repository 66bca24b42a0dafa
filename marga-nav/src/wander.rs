//! Random exploratory targets.
//!
//! When the host has nothing better to do, [`WanderPlanner`] hands out a
//! random on-grid target beyond sensing range and drives the navigator
//! toward it, picking a new one once the current target comes into view.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::agent::GridAgent;
use crate::core::Cell;
use crate::navigator::{NavOutcome, Navigator};

const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Region a wander target must stay inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WanderAnchor {
    pub center: Cell,
    pub max_distance_squared: i32,
}

impl WanderAnchor {
    /// Anchor covering half the larger grid dimension around `center`.
    pub fn half_map(center: Cell, width: i32, height: i32) -> Self {
        let half = width.max(height) / 2;
        Self {
            center,
            max_distance_squared: half * half,
        }
    }

    fn contains(&self, cell: Cell) -> bool {
        self.center.distance_squared(&cell) <= self.max_distance_squared
    }
}

/// Random target generator with an optional anchor region.
#[derive(Clone, Debug)]
pub struct WanderPlanner {
    rng: StdRng,
    target: Option<Cell>,
    anchor: Option<WanderAnchor>,
    max_attempts: u32,
}

impl WanderPlanner {
    /// Deterministic planner for a given seed.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Planner seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            target: None,
            anchor: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Limit how many candidates are drawn per call.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Constrain targets to the anchor region (or lift the constraint).
    pub fn set_anchor(&mut self, anchor: Option<WanderAnchor>) {
        self.anchor = anchor;
    }

    pub fn anchor(&self) -> Option<WanderAnchor> {
        self.anchor
    }

    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Forget the current target.
    pub fn clear(&mut self) {
        self.target = None;
    }

    fn acceptable<A: GridAgent + ?Sized>(&self, agent: &A, cell: Cell) -> bool {
        !agent.can_sense(cell) && self.anchor.is_none_or(|anchor| anchor.contains(cell))
    }

    /// Current target, regenerating it when missing, sensed, or outside
    /// the anchor region.
    ///
    /// Returns `None` if no acceptable cell turned up within the attempt
    /// budget; the next call tries again.
    pub fn next_target<A: GridAgent + ?Sized>(&mut self, agent: &A) -> Option<Cell> {
        if let Some(target) = self.target
            && self.acceptable(agent, target)
        {
            return Some(target);
        }

        self.target = None;
        let (width, height) = (agent.width(), agent.height());
        if width <= 0 || height <= 0 {
            return None;
        }

        for _ in 0..self.max_attempts {
            let candidate = Cell::new(
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            if self.acceptable(agent, candidate) {
                debug!("Wander target {}", candidate);
                self.target = Some(candidate);
                return Some(candidate);
            }
        }
        None
    }

    /// One wander cycle: pick a target and move toward it.
    ///
    /// Does nothing (and keeps the target) while movement is on cooldown.
    pub fn step<A: GridAgent + ?Sized>(
        &mut self,
        agent: &mut A,
        navigator: &mut Navigator,
    ) -> Option<NavOutcome> {
        if !agent.is_movement_ready() {
            return None;
        }
        let target = self.next_target(&*agent)?;
        Some(navigator.move_to(agent, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_support::MockAgent;

    #[test]
    fn test_target_outside_sensing_range() {
        let agent = MockAgent::open(Cell::new(10, 10), 40, 40);
        let mut planner = WanderPlanner::new(7);

        for _ in 0..20 {
            planner.clear();
            let target = planner.next_target(&agent).unwrap();
            assert!(agent.on_map(target));
            assert!(!agent.can_sense(target));
        }
    }

    #[test]
    fn test_target_is_sticky_until_sensed() {
        let mut agent = MockAgent::open(Cell::new(0, 0), 40, 40);
        let mut planner = WanderPlanner::new(3);

        let first = planner.next_target(&agent).unwrap();
        assert_eq!(planner.next_target(&agent), Some(first));

        agent.position = first;
        let second = planner.next_target(&agent).unwrap();
        assert_ne!(second, first);
    }

    #[test]
    fn test_same_seed_same_targets() {
        let agent = MockAgent::open(Cell::new(0, 0), 40, 40);
        let mut a = WanderPlanner::new(99);
        let mut b = WanderPlanner::new(99);
        assert_eq!(a.next_target(&agent), b.next_target(&agent));
    }

    #[test]
    fn test_entropy_seeded_planner() {
        let agent = MockAgent::open(Cell::new(0, 0), 40, 40);
        let mut planner = WanderPlanner::from_entropy();
        let target = planner.next_target(&agent).unwrap();
        assert!(agent.on_map(target));
        assert!(!agent.can_sense(target));
    }

    #[test]
    fn test_anchor_constrains_targets() {
        let agent = MockAgent::open(Cell::new(2, 2), 40, 40);
        let anchor = WanderAnchor::half_map(Cell::new(2, 2), 40, 40);
        assert_eq!(anchor.max_distance_squared, 400);

        let mut planner = WanderPlanner::new(11).with_max_attempts(1000);
        planner.set_anchor(Some(anchor));
        for _ in 0..20 {
            planner.clear();
            let target = planner.next_target(&agent).unwrap();
            assert!(Cell::new(2, 2).distance_squared(&target) <= 400);
        }
    }

    #[test]
    fn test_exhausted_attempts() {
        // Whole grid within sensing range: nothing is acceptable
        let agent = MockAgent::open(Cell::new(1, 1), 3, 3);
        let mut planner = WanderPlanner::new(5).with_max_attempts(10);
        assert_eq!(planner.next_target(&agent), None);
        assert_eq!(planner.target(), None);
    }

    #[test]
    fn test_step_moves_agent() {
        let mut agent = MockAgent::open(Cell::new(0, 0), 40, 40);
        let mut planner = WanderPlanner::new(1);
        let mut nav = Navigator::default();

        let outcome = planner.step(&mut agent, &mut nav);
        assert!(matches!(outcome, Some(NavOutcome::Committed(_))));
        assert_ne!(agent.position, Cell::new(0, 0));
    }
}
