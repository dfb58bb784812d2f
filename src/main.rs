use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use road_paver::simulation::{
    builtin_levels, Episode, GridCoord, LevelDefinition, Outcome, Phase, ToggleOutcome,
};

#[derive(Parser)]
#[command(name = "road_paver")]
#[command(about = "Road puzzle simulation, driven headlessly from the terminal")]
struct Cli {
    /// Level index to play (0-based)
    #[arg(long, default_value = "0")]
    level: usize,

    /// JSON file holding an array of level definitions, replacing the
    /// built-in campaign
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Road tile to toggle before starting, as "x,y"; repeatable
    #[arg(long = "pave", value_name = "X,Y")]
    pave: Vec<String>,

    /// Print the map after every tick
    #[arg(long)]
    trace: bool,

    /// Wall-clock delay between ticks in milliseconds
    #[arg(long, default_value = "0")]
    delay_ms: u64,
}

fn parse_coord(raw: &str) -> Result<GridCoord> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("expected \"x,y\", got {:?}", raw))?;
    Ok(GridCoord::new(
        x.trim()
            .parse()
            .with_context(|| format!("bad x coordinate in {:?}", raw))?,
        y.trim()
            .parse()
            .with_context(|| format!("bad y coordinate in {:?}", raw))?,
    ))
}

fn load_levels(cli: &Cli) -> Result<Vec<LevelDefinition>> {
    match &cli.levels {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading level file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing level file {}", path.display()))
        }
        None => Ok(builtin_levels()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let levels = load_levels(&cli)?;
    let definition = levels
        .get(cli.level)
        .with_context(|| format!("no level {} (have {})", cli.level, levels.len()))?;

    let mut episode = Episode::load(definition).context("loading level")?;

    for raw in &cli.pave {
        let coord = parse_coord(raw)?;
        match episode.toggle_tile(coord)? {
            ToggleOutcome::Placed { tiles_used } => {
                println!("paved ({}, {}) [{} tiles used]", coord.x, coord.y, tiles_used)
            }
            ToggleOutcome::Removed { tiles_used } => {
                println!("cleared ({}, {}) [{} tiles used]", coord.x, coord.y, tiles_used)
            }
            ToggleOutcome::Rejected => {
                println!("toggle at ({}, {}) rejected", coord.x, coord.y)
            }
        }
    }

    println!();
    println!("Initial state:");
    episode.print_summary();
    episode.draw_map();
    println!();

    let plans = episode.start_simulation()?;
    for plan in &plans {
        if plan.is_routable() {
            println!("car {}: route of {} steps", plan.car.0, plan.path.len());
        } else {
            println!("car {}: NO ROUTE", plan.car.0);
        }
    }
    println!();

    let mut ticks = 0u32;
    while episode.phase() == Phase::Simulating {
        episode.tick();
        ticks += 1;
        if cli.trace {
            println!("--- after tick {} ---", ticks);
            episode.draw_map();
            println!();
        }
        if cli.delay_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(cli.delay_ms));
        }
    }

    println!("=== Final state (after {} ticks) ===", ticks);
    episode.print_summary();
    episode.draw_map();

    match episode.outcome() {
        Outcome::Success => {
            println!("SUCCESS");
            Ok(())
        }
        Outcome::Fail(reason) => {
            println!("FAIL: {:?}", reason);
            std::process::exit(1);
        }
        Outcome::InProgress => unreachable!("simulation loop exited while in progress"),
    }
}
