//! marga-sim - scenario runner for MargaNav
//!
//! Runs a TOML scenario through the navigator and prints a summary, or
//! lets the agent wander on a map for a number of turns.
//!
//! Usage:
//!   marga-sim scenarios/wall_gap.toml --render
//!   marga-sim scenarios/wall_gap.toml --strategy frontier --max-cycles 200
//!   marga-sim --wander --width 40 --height 30 --seed 7 --turns 500
//!
//! Enable per-turn logging:
//!   RUST_LOG=marga_nav=debug marga-sim scenarios/open_field.toml

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use marga_nav::harness::{GridWorld, ScenarioResult, load_scenario, run_world};
use marga_nav::{
    Cell, GridAgent, NavConfig, NavError, NavOutcome, NavStats, Navigator, Result,
    SearchStrategy, WanderAnchor, WanderPlanner,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Greedy,
    Frontier,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => SearchStrategy::GreedyNeighbor,
            StrategyArg::Frontier => SearchStrategy::FrontierRelaxation,
        }
    }
}

/// Grid navigation simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario TOML file (optional in wander mode)
    scenario: Option<PathBuf>,

    /// Override the local search strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Override the scenario turn limit
    #[arg(long)]
    max_cycles: Option<u32>,

    /// Print the map with the agent's path
    #[arg(long)]
    render: bool,

    /// Wander to random targets instead of running to the scenario target
    #[arg(long)]
    wander: bool,

    /// Open map width when wandering without a scenario
    #[arg(long, default_value = "30")]
    width: i32,

    /// Open map height when wandering without a scenario
    #[arg(long, default_value = "30")]
    height: i32,

    /// Random seed for wander targets (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns to wander
    #[arg(long, default_value = "200")]
    turns: u32,

    /// Keep wander targets within half the map of the start
    #[arg(long)]
    anchored: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marga_nav=info")),
        )
        .init();

    let args = Args::parse();
    info!("marga-sim v{}", env!("CARGO_PKG_VERSION"));

    if args.wander {
        run_wander(&args)
    } else {
        run_target(&args)
    }
}

fn run_target(args: &Args) -> Result<()> {
    let Some(path) = &args.scenario else {
        return Err(NavError::Scenario(
            "a scenario file is required unless --wander is given".to_string(),
        ));
    };

    info!("Loading scenario from {:?}", path);
    let mut scenario = load_scenario(path)?;
    if let Some(strategy) = args.strategy {
        scenario.navigation.search.strategy = strategy.into();
    }
    if let Some(max_cycles) = args.max_cycles {
        scenario.max_cycles = max_cycles;
    }

    let (world, target) = scenario.build_world()?;
    let navigator = Navigator::new(scenario.navigation.clone());
    let result = run_world(&scenario.name, world, target, navigator, scenario.max_cycles)?;

    print_result(&result);
    if args.render {
        println!();
        print!("{}", result.render());
    }

    Ok(())
}

fn run_wander(args: &Args) -> Result<()> {
    let (mut world, mut config) = match &args.scenario {
        Some(path) => {
            info!("Loading scenario map from {:?}", path);
            let scenario = load_scenario(path)?;
            let (world, _) = scenario.build_world()?;
            (world, scenario.navigation)
        }
        None => {
            let start = Cell::new(args.width / 2, args.height / 2);
            (
                GridWorld::new(args.width, args.height, start),
                NavConfig::default(),
            )
        }
    };
    if let Some(strategy) = args.strategy {
        config.search.strategy = strategy.into();
    }

    let mut navigator = Navigator::new(config);
    let mut planner = match args.seed {
        Some(seed) => WanderPlanner::new(seed),
        None => WanderPlanner::from_entropy(),
    };
    if args.anchored {
        planner.set_anchor(Some(WanderAnchor::half_map(
            world.agent(),
            world.width(),
            world.height(),
        )));
    }

    let mut trajectory = vec![world.agent()];
    let mut targets = 0;
    let mut last_target = None;

    for _ in 0..args.turns {
        if let Some(NavOutcome::Committed(action)) = planner.step(&mut world, &mut navigator)
            && action.moved
        {
            trajectory.push(world.agent());
        }
        if planner.target() != last_target {
            last_target = planner.target();
            targets += 1;
        }
        world.end_turn();
    }

    let mut distinct = trajectory.clone();
    distinct.sort();
    distinct.dedup();

    match args.seed {
        Some(seed) => println!("Wander: {} turns, seed {}", world.turn(), seed),
        None => println!("Wander: {} turns, random seed", world.turn()),
    }
    println!("  targets:         {}", targets);
    println!("  moves:           {}", trajectory.len() - 1);
    println!("  distinct cells:  {}", distinct.len());
    println!("  final position:  {}", world.agent());
    print_stats(navigator.stats());

    if args.render {
        println!();
        print!("{}", world.render(&trajectory, &[], planner.target()));
    }
    Ok(())
}

fn print_result(result: &ScenarioResult) {
    println!("Scenario: {}", result.name);
    println!(
        "  result:          {}",
        if result.reached { "reached" } else { "not reached" }
    );
    println!("  turns:           {}", result.cycles);
    println!("  moves:           {}", result.moves());
    println!("  fills:           {}", result.fills.len());
    print_stats(&result.stats);
}

fn print_stats(stats: &NavStats) {
    println!("  search attempts: {}", stats.search_attempts);
    println!(
        "  moves by phase:  search {}, wall {}",
        stats.search_moves, stats.wall_moves
    );
    println!("  cycle resets:    {}", stats.cycle_resets);
    println!("  no progress:     {}", stats.no_progress);
}
