//! # MargaNav: Local Grid Navigation
//!
//! Per-agent pathfinding for a unit moving on a 2D grid it can only see
//! locally, under a tight per-turn compute budget. Each turn the host calls
//! [`Navigator::move_to`] once and gets back at most one move (and at most
//! one fill of a fillable obstacle).
//!
//! ## Strategy
//!
//! - **Local search** ([`search`]): look at the sensed neighborhood and step
//!   toward the reachable cell that makes the most progress.
//! - **Wall following** ([`wall`]): once local search has stalled for a few
//!   turns, trace the boundary of the blocking obstacle (a bug algorithm)
//!   with loop detection over `(cell, heading, side)` signatures.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_nav::harness::GridWorld;
//! use marga_nav::{Cell, Navigator};
//!
//! let mut world = GridWorld::new(10, 10, Cell::new(0, 0));
//! let mut nav = Navigator::default();
//! let target = Cell::new(5, 0);
//!
//! while !nav.move_to(&mut world, target).is_arrived() {
//!     world.end_turn();
//! }
//! assert_eq!(world.agent(), target);
//! ```
//!
//! ## Coordinate Frame
//!
//! `x` grows east, `y` grows north. Directions are the eight compass
//! points plus `Center`.
//!
//! ## Architecture
//!
//! - [`core`]: cells, directions, visited-state signatures
//! - [`agent`]: the [`GridAgent`] trait hosts implement
//! - [`search`]: greedy and frontier-relaxation local search
//! - [`wall`]: wall follower
//! - [`navigator`]: session state and the per-turn controller
//! - [`wander`]: random exploration targets
//! - [`harness`]: grid world, TOML scenarios, runner

pub mod agent;
pub mod config;
pub mod core;
pub mod error;
pub mod harness;
pub mod navigator;
pub mod search;
pub mod wall;
pub mod wander;

pub use agent::GridAgent;
pub use config::{NavConfig, SearchConfig};
pub use crate::core::{Cell, Direction, Signature, VisitedStateSet, WallSide};
pub use error::{NavError, Result};
pub use navigator::{NavAction, NavOutcome, NavPhase, NavStats, NavigationSession, Navigator};
pub use search::{
    FrontierRelaxation, GreedyNeighbor, LocalSearch, LocalSearcher, SearchStrategy,
};
pub use wall::{WallFollower, WallMode};
pub use wander::{WanderAnchor, WanderPlanner};
