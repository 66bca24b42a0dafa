//! Simulation harness for scenario tests and the `marga-sim` binary
//!
//! Provides a small grid world that implements [`GridAgent`](crate::GridAgent),
//! TOML scenario files describing a map and world rules, and a runner that
//! drives a [`Navigator`](crate::Navigator) through it turn by turn.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marga_nav::harness::{load_scenario, run_scenario};
//!
//! let scenario = load_scenario(Path::new("scenarios/wall_gap.toml"))?;
//! let result = run_scenario(&scenario)?;
//! println!("reached: {} in {} turns", result.reached, result.cycles);
//! print!("{}", result.render());
//! ```

pub mod scenario;
pub mod world;

pub use scenario::{Scenario, ScenarioResult, load_scenario, run_scenario, run_world};
pub use world::{GridWorld, ParsedMap, Tile};
