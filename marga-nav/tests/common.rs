//! Test utilities for MargaNav integration tests.
//!
//! Helpers for building worlds, driving a navigator turn by turn and
//! loading the bundled scenario files.

#![allow(dead_code)]

use std::path::PathBuf;

use marga_nav::harness::{GridWorld, Scenario, load_scenario};
use marga_nav::{Cell, GridAgent, NavOutcome, Navigator};

/// Path to a scenario shipped in `scenarios/`.
pub fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/scenarios/{}.toml",
        env!("CARGO_MANIFEST_DIR"),
        name
    ))
}

/// Load a bundled scenario by name (without `.toml`).
pub fn load(name: &str) -> Scenario {
    load_scenario(&scenario_path(name))
        .unwrap_or_else(|e| panic!("Failed to load scenario {}: {}", name, e))
}

/// Parse an ASCII map that must contain both `A` and `T`.
pub fn world_from_ascii(map: &str) -> (GridWorld, Cell) {
    let parsed = GridWorld::from_ascii(map).expect("valid map");
    let target = parsed.target.expect("map has a target");
    (parsed.world, target)
}

/// One turn: call `move_to` if the agent may move, then end the turn.
pub fn turn(world: &mut GridWorld, nav: &mut Navigator, target: Cell) -> Option<NavOutcome> {
    let outcome = world
        .is_movement_ready()
        .then(|| nav.move_to(world, target));
    world.end_turn();
    outcome
}

/// Drive until arrival or `max_turns`; returns the visited cells, start included.
pub fn drive(
    world: &mut GridWorld,
    nav: &mut Navigator,
    target: Cell,
    max_turns: usize,
) -> Vec<Cell> {
    let mut path = vec![world.agent()];
    for _ in 0..max_turns {
        if world.agent() == target {
            break;
        }
        turn(world, nav, target);
        if path.last() != Some(&world.agent()) {
            path.push(world.agent());
        }
    }
    path
}

/// Ten-by-ten map with a wall at x = 2 (y = 0..=8) and a gap at the top.
pub const WALL_GAP: &str = "
    ..........
    ..#.......
    ..#.......
    ..#.......
    ..#.......
    ..#.......
    ..#.......
    ..#.......
    ..#.......
    A.#..T....
";
