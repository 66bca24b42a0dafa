//! Navigation controller.
//!
//! The [`Navigator`] is the per-agent entry point. Each decision cycle the
//! host calls [`Navigator::move_to`] once; the navigator:
//! 1. Starts a fresh session whenever the target changes
//! 2. Tracks stagnation (cycles without a new best squared distance)
//! 3. Asks the local search for a step while stagnation is low
//! 4. Falls back to the wall follower once local search has stalled
//!
//! At most one fill and one move are issued per call.

use tracing::{debug, info};

use crate::agent::{GridAgent, commit_step};
use crate::config::NavConfig;
use crate::core::{Cell, Direction, VisitedStateSet};
use crate::search::{LocalSearch, LocalSearcher};
use crate::wall::WallFollower;

/// Which component chose the committed direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavPhase {
    Search,
    WallFollow,
}

/// Action issued to the agent during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavAction {
    pub phase: NavPhase,
    pub direction: Direction,
    /// Cell filled before moving, if any
    pub filled: Option<Cell>,
    /// Whether the move went through
    pub moved: bool,
}

/// Result of one [`Navigator::move_to`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// Agent is on the target; nothing was done.
    Arrived,
    /// A fill and/or move was issued.
    Committed(NavAction),
    /// Nothing could be done this cycle; call again next cycle.
    NoProgress,
    /// Target lies outside the grid.
    InvalidTarget,
}

impl NavOutcome {
    pub fn is_arrived(&self) -> bool {
        matches!(self, NavOutcome::Arrived)
    }

    /// The committed action, if any.
    pub fn action(&self) -> Option<&NavAction> {
        match self {
            NavOutcome::Committed(action) => Some(action),
            _ => None,
        }
    }
}

/// Running counters across all sessions of a navigator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavStats {
    /// `move_to` calls that reached the decision logic
    pub cycles: u64,
    /// Local search invocations
    pub search_attempts: u64,
    /// Moves chosen by local search
    pub search_moves: u64,
    /// Moves chosen by the wall follower
    pub wall_moves: u64,
    /// Cells filled
    pub fills: u64,
    /// Session restarts caused by a repeated wall-following state
    pub cycle_resets: u64,
    /// Cycles that ended with no action
    pub no_progress: u64,
    /// Sessions started (first target included)
    pub target_changes: u64,
}

/// Per-target navigation state.
#[derive(Clone, Debug)]
pub struct NavigationSession {
    target: Cell,
    min_distance: Option<i32>,
    stagnation: u32,
    visited: VisitedStateSet,
}

impl NavigationSession {
    pub fn new(target: Cell, width: i32, height: i32) -> Self {
        Self {
            target,
            min_distance: None,
            stagnation: 0,
            visited: VisitedStateSet::new(width, height),
        }
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    /// Smallest squared distance to target reached so far.
    pub fn min_distance(&self) -> Option<i32> {
        self.min_distance
    }

    /// Consecutive cycles without a new minimum distance.
    pub fn stagnation(&self) -> u32 {
        self.stagnation
    }

    pub fn visited(&self) -> &VisitedStateSet {
        &self.visited
    }

    pub(crate) fn visited_mut(&mut self) -> &mut VisitedStateSet {
        &mut self.visited
    }

    /// Record this cycle's distance and update stagnation.
    fn observe(&mut self, distance_squared: i32) {
        if self.min_distance.is_none_or(|min| distance_squared < min) {
            self.min_distance = Some(distance_squared);
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }
    }

    /// Clear visited states and stagnation, keeping the target and the
    /// best distance reached.
    pub(crate) fn restart(&mut self) {
        self.visited.clear();
        self.stagnation = 0;
    }
}

/// Per-agent navigator.
#[derive(Clone, Debug)]
pub struct Navigator {
    config: NavConfig,
    search: LocalSearcher,
    wall: WallFollower,
    session: Option<NavigationSession>,
    stats: NavStats,
}

impl Navigator {
    /// Create a navigator. The config is assumed valid; see
    /// [`NavConfig::validate`].
    pub fn new(config: NavConfig) -> Self {
        let search = LocalSearcher::new(&config.search, config.allow_fill);
        let wall = WallFollower::new(config.default_wall_side, config.allow_fill);
        Self {
            config,
            search,
            wall,
            session: None,
            stats: NavStats::default(),
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Current session, `None` before the first call or after a reset.
    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    pub fn wall_state(&self) -> &WallFollower {
        &self.wall
    }

    pub fn stats(&self) -> &NavStats {
        &self.stats
    }

    /// Drop the session and wall-follower state.
    ///
    /// Statistics are kept.
    pub fn reset(&mut self) {
        self.session = None;
        self.wall.reset();
    }

    /// Run one decision cycle toward `target`.
    pub fn move_to<A: GridAgent + ?Sized>(&mut self, agent: &mut A, target: Cell) -> NavOutcome {
        let position = agent.position();
        if position == target {
            return NavOutcome::Arrived;
        }
        if !agent.on_map(target) {
            debug!("Rejecting off-grid target {}", target);
            return NavOutcome::InvalidTarget;
        }

        self.stats.cycles += 1;

        if self.session.as_ref().is_none_or(|s| s.target != target) {
            info!("New navigation target {} from {}", target, position);
            self.session = Some(NavigationSession::new(
                target,
                agent.width(),
                agent.height(),
            ));
            self.wall.reset();
            self.stats.target_changes += 1;
        }
        let Some(session) = self.session.as_mut() else {
            return NavOutcome::NoProgress;
        };

        session.visited.mark_cell(position);
        session.observe(position.distance_squared(&target));

        if session.stagnation < self.config.stagnation_threshold {
            self.stats.search_attempts += 1;
            match self.search.best_direction(&*agent, target, &session.visited) {
                Some(direction) => {
                    debug!("Search step {} from {}", direction, position);
                    return commit(
                        agent,
                        &mut self.stats,
                        self.config.allow_fill,
                        NavPhase::Search,
                        direction,
                    );
                }
                None => debug!("Search found no improving cell from {}", position),
            }
        }

        if !agent.is_movement_ready() {
            self.stats.no_progress += 1;
            return NavOutcome::NoProgress;
        }

        match self
            .wall
            .advance(&*agent, target, session, &mut self.stats)
        {
            Some(direction) => commit(
                agent,
                &mut self.stats,
                self.config.allow_fill,
                NavPhase::WallFollow,
                direction,
            ),
            None => {
                self.stats.no_progress += 1;
                NavOutcome::NoProgress
            }
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavConfig::default())
    }
}

/// Fill (if needed) then move, and account for it.
fn commit<A: GridAgent + ?Sized>(
    agent: &mut A,
    stats: &mut NavStats,
    allow_fill: bool,
    phase: NavPhase,
    direction: Direction,
) -> NavOutcome {
    let (filled, moved) = commit_step(agent, direction, allow_fill);

    if filled.is_some() {
        stats.fills += 1;
    }
    if moved {
        match phase {
            NavPhase::Search => stats.search_moves += 1,
            NavPhase::WallFollow => stats.wall_moves += 1,
        }
    }
    if filled.is_none() && !moved {
        stats.no_progress += 1;
        return NavOutcome::NoProgress;
    }

    if let Some(cell) = filled {
        debug!("Filled {} before stepping {}", cell, direction);
    }
    NavOutcome::Committed(NavAction {
        phase,
        direction,
        filled,
        moved,
    })
}
