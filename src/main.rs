//! World Sim - Entry Point
//!
//! Builds the world from config and advances it on request, either for a
//! fixed number of ticks or interactively. Each tick's update can be echoed
//! to stdout as a JSON line for whatever transport sits downstream.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use world_sim::output::{read_snapshot, TickUpdate};
use world_sim::world::SpeciesCensus;
use world_sim::{Result, SimulationConfig, World};

/// Agent-based population simulation
#[derive(Parser, Debug)]
#[command(name = "world-sim")]
#[command(about = "Simulate humans, animals and insects on a wrapping grid")]
struct Args {
    /// TOML config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks and exit instead of prompting
    #[arg(long)]
    ticks: Option<u32>,

    /// Directory for snapshot files
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Do not write snapshot files
    #[arg(long, default_value_t = false)]
    no_snapshots: bool,

    /// Print every tick's update as a JSON line
    #[arg(long, default_value_t = false)]
    emit_json: bool,

    /// Print a census of a saved JSON snapshot and exit
    #[arg(long, value_name = "SNAPSHOT")]
    inspect: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("world_sim=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.inspect {
        let records = read_snapshot(path)?;
        let census = SpeciesCensus::tally(records.iter().map(|r| r.species));
        println!("{}: {}", path.display(), census);
        return Ok(());
    }

    let config = load_config(&args)?;
    let mut world = World::new(&config)?;

    // Downstream consumers see the founders before the first tick
    if args.emit_json {
        emit(&world.update())?;
    }

    match args.ticks {
        Some(n) => {
            for _ in 0..n {
                let outcome = world.advance();
                if args.emit_json {
                    emit(&outcome.update)?;
                }
            }
            println!("{} | {}", world.current_date(), world.census());
            Ok(())
        }
        None => interactive(&mut world, args.emit_json),
    }
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(dir) = &args.snapshot_dir {
        config.snapshots.directory = dir.clone();
    }
    if args.no_snapshots {
        config.snapshots.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

/// One update per line on stdout; snapshot failures are already logged by the world.
fn emit(update: &TickUpdate) -> Result<()> {
    println!("{}", update.to_json()?);
    Ok(())
}

fn interactive(world: &mut World, emit_json: bool) -> Result<()> {
    println!("\n=== WORLD SIM ===");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one year");
    println!("  run <n>         - Run n ticks");
    println!("  status / s      - Show population by species");
    println!("  quit / q        - Exit");
    println!();

    loop {
        display_status(world);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let outcome = world.advance();
            if emit_json {
                emit(&outcome.update)?;
            }
            println!(
                "Now {}: {} born, {} died.",
                outcome.summary.date, outcome.summary.births, outcome.summary.deaths
            );
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(world);
            continue;
        }

        if let Some(arg) = input.strip_prefix("run ") {
            match arg.trim().parse::<u32>() {
                Ok(n) => {
                    println!("Running {} ticks...", n);
                    for _ in 0..n {
                        let outcome = world.advance();
                        if emit_json {
                            emit(&outcome.update)?;
                        }
                    }
                    println!("Completed {} ticks. Now at {}.", n, world.current_date());
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, status, quit");
    }

    println!(
        "\nGoodbye! Final state: {} on {}.",
        world.census(),
        world.current_date()
    );
    Ok(())
}

fn display_status(world: &World) {
    println!();
    println!(
        "--- {} | Population: {} ---",
        world.current_date(),
        world.population()
    );
}

fn display_detailed_status(world: &World) {
    let census = world.census();
    let dims = world.dimensions();
    println!();
    println!("=== Status ({}) ===", world.current_date());
    println!("Grid: {}x{}, mortality: {:?}", dims.width, dims.height, world.mortality());
    println!("Humans:  {}", census.humans);
    println!("Animals: {}", census.animals);
    println!("Insects: {}", census.insects);

    let dead = world.agents().iter().filter(|a| a.is_dead()).count();
    if dead > 0 {
        println!("({} with health at or below zero)", dead);
    }
    println!();
}
