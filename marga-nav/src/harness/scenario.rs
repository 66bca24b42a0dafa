//! TOML scenario files and the scenario runner.
//!
//! A scenario is an ASCII map plus world rules and an optional
//! `[navigation]` table:
//!
//! ```toml
//! name = "wall_gap"
//! max_cycles = 60
//! map = """
//! ..#...
//! A.#..T
//! """
//!
//! [navigation]
//! stagnation_threshold = 3
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::world::{GridWorld, ParsedMap};
use crate::agent::GridAgent;
use crate::config::NavConfig;
use crate::core::Cell;
use crate::error::{NavError, Result};
use crate::navigator::{NavOutcome, NavStats, Navigator};

/// Scenario definition loaded from TOML.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    /// Scenario name (used in logs and reports)
    pub name: String,
    /// ASCII map, first row northmost
    pub map: String,
    /// Turn limit
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u32,
    #[serde(default)]
    pub navigation: NavConfig,
    /// Whether the agent may fill water
    #[serde(default = "default_fill_enabled")]
    pub fill_enabled: bool,
    /// Turns to wait after each move
    #[serde(default)]
    pub movement_cooldown: u32,
    #[serde(default = "default_sensing_radius_squared")]
    pub sensing_radius_squared: i32,
}

fn default_max_cycles() -> u32 {
    500
}
fn default_fill_enabled() -> bool {
    true
}
fn default_sensing_radius_squared() -> i32 {
    20
}

impl Scenario {
    /// Parse and validate a scenario.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)
            .map_err(|e| NavError::Scenario(format!("Failed to parse scenario: {}", e)))?;
        scenario.navigation.validate()?;
        Ok(scenario)
    }

    /// Build the world and locate the target.
    pub fn build_world(&self) -> Result<(GridWorld, Cell)> {
        let ParsedMap { world, target } = GridWorld::from_ascii(&self.map)?;
        let Some(target) = target else {
            return Err(NavError::Scenario(format!(
                "scenario '{}' has no target 'T'",
                self.name
            )));
        };
        let world = world
            .with_sensing_radius_squared(self.sensing_radius_squared)
            .with_fill(self.fill_enabled)
            .with_movement_cooldown(self.movement_cooldown);
        Ok((world, target))
    }
}

/// Load a scenario from a TOML file.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)?;
    Scenario::from_toml_str(&content)
        .map_err(|e| NavError::Scenario(format!("{}: {}", path.display(), e)))
}

/// Outcome of a scenario run.
#[derive(Clone, Debug)]
pub struct ScenarioResult {
    pub name: String,
    /// Agent ended on the target
    pub reached: bool,
    /// Turns simulated
    pub cycles: u32,
    /// Agent cells, start included, one entry per move
    pub trajectory: Vec<Cell>,
    /// Cells filled, in order
    pub fills: Vec<Cell>,
    pub stats: NavStats,
    pub target: Cell,
    /// World after the last turn
    pub world: GridWorld,
}

impl ScenarioResult {
    /// Map with the trajectory drawn on it.
    pub fn render(&self) -> String {
        self.world
            .render(&self.trajectory, &self.fills, Some(self.target))
    }

    /// Number of moves made.
    pub fn moves(&self) -> usize {
        self.trajectory.len().saturating_sub(1)
    }
}

/// Run a scenario until the agent arrives or the turn limit is hit.
pub fn run_scenario(scenario: &Scenario) -> Result<ScenarioResult> {
    let (world, target) = scenario.build_world()?;
    let navigator = Navigator::new(scenario.navigation.clone());
    run_world(&scenario.name, world, target, navigator, scenario.max_cycles)
}

/// Drive `navigator` inside `world` for up to `max_cycles` turns.
pub fn run_world(
    name: &str,
    mut world: GridWorld,
    target: Cell,
    mut navigator: Navigator,
    max_cycles: u32,
) -> Result<ScenarioResult> {
    info!(
        "Running scenario '{}': {} -> {} ({} turns max)",
        name,
        world.agent(),
        target,
        max_cycles
    );

    let mut trajectory = vec![world.agent()];
    let mut fills = Vec::new();
    let mut reached = world.agent() == target;
    let mut cycles = 0;

    while !reached && cycles < max_cycles {
        cycles += 1;

        if world.is_movement_ready() {
            match navigator.move_to(&mut world, target) {
                NavOutcome::Arrived => reached = true,
                NavOutcome::Committed(action) => {
                    if let Some(cell) = action.filled {
                        fills.push(cell);
                    }
                    if action.moved {
                        trajectory.push(world.agent());
                    }
                }
                NavOutcome::NoProgress => debug!("Turn {}: no progress", cycles),
                NavOutcome::InvalidTarget => {
                    return Err(NavError::Scenario(format!(
                        "target {} is outside the map",
                        target
                    )));
                }
            }
        }

        world.end_turn();
        reached |= world.agent() == target;
    }

    if reached {
        info!("Scenario '{}' reached target in {} turns", name, cycles);
    } else {
        info!(
            "Scenario '{}' stopped after {} turns at {}",
            name,
            cycles,
            world.agent()
        );
    }

    Ok(ScenarioResult {
        name: name.to_string(),
        reached,
        cycles,
        trajectory,
        fills,
        stats: *navigator.stats(),
        target,
        world,
    })
}
