//! Loading configuration and scenarios from disk.

use std::fs;

use marga_nav::harness::{load_scenario, run_scenario};
use marga_nav::{NavConfig, NavError, SearchStrategy, WallSide};
use tempfile::tempdir;

#[test]
fn test_load_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("marga.toml");
    fs::write(
        &path,
        r#"
stagnation_threshold = 5
allow_fill = false
default_wall_side = "left"

[search]
strategy = "frontier_relaxation"
sensing_radius_squared = 13
"#,
    )
    .unwrap();

    let config = NavConfig::load(&path).unwrap();
    assert_eq!(config.stagnation_threshold, 5);
    assert!(!config.allow_fill);
    assert_eq!(config.default_wall_side, WallSide::Left);
    assert_eq!(config.search.strategy, SearchStrategy::FrontierRelaxation);
    assert_eq!(config.search.sensing_radius_squared, 13);
    assert_eq!(config.search.fill_cost_base, 2);
}

#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let err = NavConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(err, Err(NavError::Config(_))));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[search]\nsensing_radius_squared = 1\n").unwrap();

    assert!(matches!(NavConfig::load(&path), Err(NavError::Config(_))));
}

#[test]
fn test_load_and_run_scenario_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("detour.toml");
    fs::write(
        &path,
        r#"
name = "detour"
max_cycles = 30
map = """
.....
.###.
A...T
"""

[navigation]
stagnation_threshold = 2
"#,
    )
    .unwrap();

    let scenario = load_scenario(&path).unwrap();
    assert_eq!(scenario.name, "detour");
    assert_eq!(scenario.navigation.stagnation_threshold, 2);

    let result = run_scenario(&scenario).unwrap();
    assert!(result.reached, "\n{}", result.render());
}

#[test]
fn test_scenario_errors_name_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "name = \"broken\"\n").unwrap();

    match load_scenario(&path) {
        Err(NavError::Scenario(message)) => assert!(message.contains("broken.toml")),
        other => panic!("expected scenario error, got {:?}", other),
    }
}

#[test]
fn test_missing_scenario_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_scenario(&dir.path().join("absent.toml"));
    assert!(matches!(err, Err(NavError::Io(_))));
}
