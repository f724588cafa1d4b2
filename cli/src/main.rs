//! # 2048 CLI
//!
//! Headless driver for the rules engine: run seeded simulations with a fixed
//! policy, or replay a scripted list of moves and print every board.

mod simulate;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use game2048_core::{Direction, Game, GameConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simulate::{Policy, SimulationPlan};

/// Seed used when neither the command line nor the config file names one.
const DEFAULT_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(name = "game2048")]
#[command(author, version, about = "Run 2048 simulations or replay scripted games")]
struct Args {
    /// TOML file with game settings (size, four_probability, seed)
    #[arg(long, global = true, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Board edge length
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Chance that a spawned tile is a 4
    #[arg(long, global = true)]
    four_probability: Option<f64>,

    /// Random seed for deterministic runs
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Log filter directive, e.g. "info" or "game2048_core=debug"
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play many episodes headlessly and print statistics
    Simulate(SimulateArgs),
    /// Apply a list of moves to a seeded game, printing each board
    Replay(ReplayArgs),
}

#[derive(ClapArgs, Debug)]
struct SimulateArgs {
    /// Number of episodes to run
    #[arg(short, long, default_value = "100")]
    episodes: u32,

    /// Maximum steps per episode (0 = unlimited)
    #[arg(short, long, default_value = "10000")]
    max_steps: u32,

    /// Move selection policy
    #[arg(short, long, value_enum, default_value = "random")]
    policy: Policy,

    /// Show board after each move
    #[arg(long)]
    verbose: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

#[derive(ClapArgs, Debug)]
struct ReplayArgs {
    /// Moves separated by commas or spaces: up, down, left, right or w, a, s, d
    #[arg(required = true, num_args = 1..)]
    moves: Vec<String>,

    /// Only print the final board
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// key=value lines
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = resolve_config(&args)?;
    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    tracing::info!(
        size = config.size,
        four_probability = config.four_probability,
        seed,
        "resolved config"
    );

    match &args.command {
        Command::Simulate(sim) => run_simulate(&config, seed, sim),
        Command::Replay(replay) => run_replay(&config, seed, replay),
    }
}

/// Config file values, overridden by any flag given on the command line.
fn resolve_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(p) = args.four_probability {
        config.four_probability = p;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config)
}

fn run_simulate(config: &GameConfig, seed: u64, args: &SimulateArgs) -> Result<()> {
    let plan = SimulationPlan {
        episodes: args.episodes,
        max_steps: args.max_steps,
        policy: args.policy,
        verbose: args.verbose,
    };
    let summary = simulate::run(config, seed, &plan)?;
    match args.format {
        Format::Text => print!("{}", summary),
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn run_replay(config: &GameConfig, seed: u64, args: &ReplayArgs) -> Result<()> {
    // Reject the whole script before touching the board.
    let moves = parse_moves(&args.moves)?;
    let config = GameConfig {
        seed: Some(seed),
        ..config.clone()
    };
    let mut game = Game::with_config(&config)?;

    if !args.quiet {
        print!("{}", game);
    }
    for direction in moves {
        if game.is_done() {
            break;
        }
        let result = game.step(direction)?;
        if !args.quiet {
            println!();
            if result.changed {
                println!("{}: +{} points", direction, result.points);
            } else {
                println!("{}: no change", direction);
            }
            print!("{}", game);
        }
    }

    if args.quiet {
        print!("{}", game);
    }
    println!("Moves: {}", game.moves_made());
    println!("Max Tile: {}", game.max_tile());
    if game.is_done() {
        println!("*** GAME OVER ***");
    }
    Ok(())
}

/// Split tokens on commas and whitespace and parse each as a direction.
fn parse_moves(tokens: &[String]) -> Result<Vec<Direction>> {
    tokens
        .iter()
        .flat_map(|token| token.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<Direction>().map_err(anyhow::Error::from))
        .collect()
}
