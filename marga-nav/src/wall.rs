//! Bug-algorithm wall follower.
//!
//! Takes over when local search stalls. The follower keeps a tracked
//! obstacle cell on one side of the agent and sweeps away from it each
//! cycle, so the agent traces the obstacle boundary until the target is
//! in reach again.
//!
//! ## State
//!
//! - `Seeking`: no obstacle tracked; step straight at the target if
//!   possible, otherwise pick a side and start hugging.
//! - `Hugging`: obstacle tracked; sweep up to 8 directions away from it.
//!
//! Every cycle the `(cell, heading, side)` signature goes into the
//! session's visited set. A repeat means the agent is circling, and the
//! session restarts from `Seeking`.

use tracing::{debug, warn};

use crate::agent::{GridAgent, can_step};
use crate::core::{Cell, Direction, Signature, WallSide};
use crate::navigator::{NavStats, NavigationSession};

/// Observable phase of the wall follower.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallMode {
    /// No tracked obstacle
    Seeking,
    /// Following the tracked obstacle
    Hugging,
}

/// Wall-following state for one navigation session.
#[derive(Clone, Debug)]
pub struct WallFollower {
    side: WallSide,
    default_side: WallSide,
    tracked_obstacle: Option<Cell>,
    best_chebyshev: Option<i32>,
    allow_fill: bool,
}

impl WallFollower {
    pub fn new(default_side: WallSide, allow_fill: bool) -> Self {
        Self {
            side: default_side,
            default_side,
            tracked_obstacle: None,
            best_chebyshev: None,
            allow_fill,
        }
    }

    /// Side the tracked obstacle is kept on.
    pub fn side(&self) -> WallSide {
        self.side
    }

    /// Obstacle cell currently being followed.
    pub fn tracked_obstacle(&self) -> Option<Cell> {
        self.tracked_obstacle
    }

    /// Best Chebyshev distance to target seen by the follower this session.
    pub fn best_chebyshev(&self) -> Option<i32> {
        self.best_chebyshev
    }

    pub fn mode(&self) -> WallMode {
        if self.tracked_obstacle.is_some() {
            WallMode::Hugging
        } else {
            WallMode::Seeking
        }
    }

    /// Forget everything, including the progress record.
    pub fn reset(&mut self) {
        self.release();
        self.best_chebyshev = None;
    }

    /// Drop the tracked obstacle and return to the default side.
    fn release(&mut self) {
        self.side = self.default_side;
        self.tracked_obstacle = None;
    }

    /// Signature of the current configuration.
    fn signature(&self, position: Cell, target: Cell) -> Signature {
        let toward = self.tracked_obstacle.unwrap_or(target);
        Signature::new(position, position.direction_to(&toward), self.side)
    }

    /// Pick this cycle's direction, or `None` when no adjacent cell can be
    /// entered.
    ///
    /// Does not act on the agent; the caller commits the returned step.
    pub fn advance<A: GridAgent + ?Sized>(
        &mut self,
        agent: &A,
        target: Cell,
        session: &mut NavigationSession,
        stats: &mut NavStats,
    ) -> Option<Direction> {
        let position = agent.position();

        let has_options = Direction::ADJACENT
            .iter()
            .any(|&d| can_step(agent, d, self.allow_fill));
        if !has_options {
            warn!("Wall follower stuck at {}: no enterable neighbor", position);
            return None;
        }

        let chebyshev = position.chebyshev_distance(&target);
        if self.best_chebyshev.is_none_or(|best| chebyshev < best) {
            self.release();
            self.best_chebyshev = Some(chebyshev);
        }

        if let Some(obstacle) = self.tracked_obstacle
            && (obstacle == position || agent.sense_passable(obstacle) == Some(true))
        {
            debug!("Tracked obstacle {} cleared", obstacle);
            self.release();
        }

        if !session.visited_mut().insert(self.signature(position, target)) {
            warn!(
                "Cycle detected at {} (side {:?}), restarting session",
                position, self.side
            );
            stats.cycle_resets += 1;
            session.restart();
            self.release();
            self.best_chebyshev = Some(chebyshev);
            session.visited_mut().insert(self.signature(position, target));
        }

        if self.tracked_obstacle.is_none() {
            let forward = position.direction_to(&target);
            if can_step(agent, forward, self.allow_fill) {
                debug!("Wall follower seeking {} toward {}", forward, target);
                return Some(forward);
            }
            self.choose_side(agent, position, forward, target);
        }

        self.follow_wall(agent, position, true)
    }

    /// Choose which side to keep the blocking obstacle on.
    ///
    /// Scans rotations left and right of `forward` for the first on-map
    /// passable cell on each side. The side whose cell is nearer the target
    /// (Chebyshev) wins; on a tie the wall goes on the right only if the
    /// left cell is strictly closer to the agent.
    fn choose_side<A: GridAgent + ?Sized>(
        &mut self,
        agent: &A,
        position: Cell,
        forward: Direction,
        target: Cell,
    ) {
        let open = |d: Direction| {
            let cell = position.step(d);
            agent.on_map(cell) && agent.sense_passable(cell) == Some(true)
        };

        let mut left = forward.rotate_left();
        for _ in 0..8 {
            if open(left) {
                break;
            }
            left = left.rotate_left();
        }

        let mut right = forward.rotate_right();
        for _ in 0..8 {
            if open(right) {
                break;
            }
            right = right.rotate_right();
        }

        let left_cell = position.step(left);
        let right_cell = position.step(right);
        let left_distance = left_cell.chebyshev_distance(&target);
        let right_distance = right_cell.chebyshev_distance(&target);

        self.side = if left_distance < right_distance {
            WallSide::Right
        } else if right_distance < left_distance {
            WallSide::Left
        } else if position.distance_squared(&left_cell) < position.distance_squared(&right_cell) {
            WallSide::Right
        } else {
            WallSide::Left
        };

        let obstacle = match self.side {
            WallSide::Right => position.step(left.rotate_right()),
            WallSide::Left => position.step(right.rotate_left()),
        };
        debug!(
            "Wall follower hugging {} with wall on {:?}",
            obstacle, self.side
        );
        self.tracked_obstacle = Some(obstacle);
    }

    /// Sweep away from the tracked obstacle and return the first enterable
    /// direction.
    ///
    /// Hitting the grid edge flips the side once and restarts the sweep.
    /// Impassable cells passed on the way become the new tracked obstacle.
    /// Already-visited configurations are filtered by the signature check in
    /// [`advance`](Self::advance), not here.
    fn follow_wall<A: GridAgent + ?Sized>(
        &mut self,
        agent: &A,
        position: Cell,
        can_flip: bool,
    ) -> Option<Direction> {
        let obstacle = self.tracked_obstacle?;
        let mut direction = position.direction_to(&obstacle);
        if direction == Direction::Center {
            self.tracked_obstacle = None;
            return None;
        }

        for _ in 0..8 {
            direction = self.side.rotate_away(direction);
            if can_step(agent, direction, self.allow_fill) {
                debug!("Wall follower step {} (side {:?})", direction, self.side);
                return Some(direction);
            }

            let cell = position.step(direction);
            if !agent.on_map(cell) {
                if can_flip {
                    self.side = self.side.flip();
                    debug!("Grid edge at {}, flipping to {:?}", cell, self.side);
                    return self.follow_wall(agent, position, false);
                }
                continue;
            }

            if agent.sense_passable(cell) == Some(false) {
                self.tracked_obstacle = Some(cell);
            }
        }

        None
    }
}

impl Default for WallFollower {
    fn default() -> Self {
        Self::new(WallSide::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_support::MockAgent;

    fn session(target: Cell) -> NavigationSession {
        NavigationSession::new(target, 10, 10)
    }

    #[test]
    fn test_seeking_goes_straight() {
        let agent = MockAgent::open(Cell::new(0, 0), 10, 10);
        let target = Cell::new(5, 0);
        let mut follower = WallFollower::default();
        let mut session = session(target);
        let mut stats = NavStats::default();

        let d = follower.advance(&agent, target, &mut session, &mut stats);
        assert_eq!(d, Some(Direction::East));
        assert_eq!(follower.mode(), WallMode::Seeking);
        assert_eq!(follower.best_chebyshev(), Some(5));
    }

    #[test]
    fn test_blocked_forward_starts_hugging() {
        let wall = (0..9).map(|y| Cell::new(2, y));
        let agent = MockAgent::open(Cell::new(1, 0), 10, 10).with_blocked(wall);
        let target = Cell::new(5, 0);
        let mut follower = WallFollower::default();
        let mut session = session(target);
        let mut stats = NavStats::default();

        let d = follower.advance(&agent, target, &mut session, &mut stats);
        // Left scan finds (1, 1), nearer the target than (0, 0): wall on the right
        assert_eq!(follower.side(), WallSide::Right);
        assert_eq!(follower.mode(), WallMode::Hugging);
        assert_eq!(follower.tracked_obstacle(), Some(Cell::new(2, 1)));
        assert_eq!(d, Some(Direction::North));
    }

    #[test]
    fn test_stuck_when_enclosed() {
        let ring = Cell::new(5, 5).neighbors_8();
        let agent = MockAgent::open(Cell::new(5, 5), 10, 10).with_blocked(ring);
        let target = Cell::new(9, 9);
        let mut follower = WallFollower::default();
        let mut session = session(target);
        let mut stats = NavStats::default();

        assert_eq!(follower.advance(&agent, target, &mut session, &mut stats), None);
        assert!(session.visited().is_empty());
    }

    #[test]
    fn test_repeat_signature_restarts_session() {
        let wall = (0..9).map(|y| Cell::new(2, y));
        let agent = MockAgent::open(Cell::new(1, 0), 10, 10).with_blocked(wall);
        let target = Cell::new(5, 0);
        let mut follower = WallFollower::default();
        let mut session = session(target);
        let mut stats = NavStats::default();

        follower.advance(&agent, target, &mut session, &mut stats);
        // Agent did not move: the same configuration is seen again
        follower.advance(&agent, target, &mut session, &mut stats);
        assert_eq!(stats.cycle_resets, 0);

        let before = follower.signature(agent.position(), target);
        assert!(session.visited().contains(before));
        follower.advance(&agent, target, &mut session, &mut stats);
        assert_eq!(stats.cycle_resets, 1);
        assert_eq!(session.stagnation(), 0);
    }

    #[test]
    fn test_progress_releases_obstacle() {
        let mut follower = WallFollower::default();
        follower.tracked_obstacle = Some(Cell::new(3, 3));
        follower.side = WallSide::Left;
        follower.best_chebyshev = Some(6);

        let agent = MockAgent::open(Cell::new(0, 0), 10, 10);
        let target = Cell::new(5, 0);
        let mut session = session(target);
        let mut stats = NavStats::default();

        let d = follower.advance(&agent, target, &mut session, &mut stats);
        assert_eq!(d, Some(Direction::East));
        assert_eq!(follower.mode(), WallMode::Seeking);
        assert_eq!(follower.side(), WallSide::Right);
        assert_eq!(follower.best_chebyshev(), Some(5));
    }

    #[test]
    fn test_grid_edge_flips_side() {
        // Agent on the south edge with the wall on its left: the sweep
        // would turn south off the grid, so the side flips.
        let agent = MockAgent::open(Cell::new(3, 0), 10, 10)
            .with_blocked([Cell::new(4, 0), Cell::new(4, 1)]);
        let mut follower = WallFollower::new(WallSide::Left, false);
        follower.tracked_obstacle = Some(Cell::new(4, 0));

        let d = follower.follow_wall(&agent, agent.position(), true);
        assert_eq!(follower.side(), WallSide::Right);
        assert_eq!(d, Some(Direction::North));
    }
}
