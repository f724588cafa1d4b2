//! Headless simulation: play many seeded episodes with a fixed policy and
//! report aggregate statistics.

use anyhow::Result;
use clap::ValueEnum;
use game2048_core::{Direction, Game, GameConfig};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Random valid moves
    Random,
    /// Cycle through moves: Left, Down, Right, Up
    Cycle,
}

/// Order tried by [`Policy::Cycle`].
const CYCLE_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub episodes: u32,
    /// Maximum steps per episode (0 = unlimited)
    pub max_steps: u32,
    pub policy: Policy,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub episodes: u32,
    pub policy: Policy,
    pub seed: u64,
    pub size: usize,
    pub max_steps: u32,
    pub avg_score: f64,
    pub median_score: f64,
    pub min_score: u64,
    pub max_score: u64,
    pub max_tile_overall: u32,
    /// Best tile reached per episode -> number of episodes.
    pub tile_distribution: BTreeMap<u32, u32>,
}

/// Play `plan.episodes` games. Episode `i` is seeded with `seed + i`; the
/// policy draws from its own generator so it never perturbs spawns.
pub fn run(config: &GameConfig, seed: u64, plan: &SimulationPlan) -> Result<Summary> {
    let mut policy_rng = SmallRng::seed_from_u64(seed.wrapping_add(1000));
    let mut scores = Vec::with_capacity(plan.episodes as usize);
    let mut max_tiles = Vec::with_capacity(plan.episodes as usize);

    for episode in 0..plan.episodes {
        let episode_config = GameConfig {
            seed: Some(seed.wrapping_add(u64::from(episode))),
            ..config.clone()
        };
        let mut game = Game::with_config(&episode_config)?;
        let mut steps = 0;
        let mut cycle = 0;

        while !game.is_done() && (plan.max_steps == 0 || steps < plan.max_steps) {
            let choice = match plan.policy {
                Policy::Random => select_random(&game, &mut policy_rng),
                Policy::Cycle => select_cycle(&game, &mut cycle),
            };
            let Some(direction) = choice else {
                break;
            };

            game.step(direction)?;
            steps += 1;

            if plan.verbose {
                println!("Episode {} Step {}: {}", episode + 1, steps, direction);
                print!("{}", game);
            }
        }

        tracing::info!(
            episode = episode + 1,
            score = game.score(),
            max_tile = game.max_tile(),
            steps,
            "episode finished"
        );
        if plan.verbose {
            println!(
                "Episode {}: Score={}, MaxTile={}, Steps={}",
                episode + 1,
                game.score(),
                game.max_tile(),
                steps
            );
        }

        scores.push(game.score());
        max_tiles.push(game.max_tile());
    }

    Ok(summarize(config, seed, plan, scores, &max_tiles))
}

fn summarize(
    config: &GameConfig,
    seed: u64,
    plan: &SimulationPlan,
    mut scores: Vec<u64>,
    max_tiles: &[u32],
) -> Summary {
    scores.sort_unstable();
    let n = scores.len();
    let avg_score = if n == 0 {
        0.0
    } else {
        scores.iter().map(|&s| s as f64).sum::<f64>() / n as f64
    };
    let median_score = match n {
        0 => 0.0,
        _ if n % 2 == 0 => (scores[n / 2 - 1] as f64 + scores[n / 2] as f64) / 2.0,
        _ => scores[n / 2] as f64,
    };

    let mut tile_distribution = BTreeMap::new();
    for &tile in max_tiles {
        *tile_distribution.entry(tile).or_insert(0u32) += 1;
    }

    Summary {
        episodes: plan.episodes,
        policy: plan.policy,
        seed,
        size: config.size,
        max_steps: plan.max_steps,
        avg_score,
        median_score,
        min_score: scores.first().copied().unwrap_or(0),
        max_score: scores.last().copied().unwrap_or(0),
        max_tile_overall: max_tiles.iter().copied().max().unwrap_or(0),
        tile_distribution,
    }
}

/// Select a random valid move.
fn select_random(game: &Game, rng: &mut SmallRng) -> Option<Direction> {
    let valid: Vec<Direction> = Direction::ALL
        .into_iter()
        .zip(game.legal_moves())
        .filter(|&(_, legal)| legal)
        .map(|(direction, _)| direction)
        .collect();
    valid.choose(rng).copied()
}

/// Select the next legal move in [`CYCLE_ORDER`], starting from `cycle`.
fn select_cycle(game: &Game, cycle: &mut usize) -> Option<Direction> {
    let legal = game.legal_moves();
    for _ in 0..CYCLE_ORDER.len() {
        let direction = CYCLE_ORDER[*cycle % CYCLE_ORDER.len()];
        *cycle += 1;
        if legal[direction as usize] {
            return Some(direction);
        }
    }
    None
}

/// Parseable `key=value` report.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Results ===")?;
        writeln!(f, "episodes={}", self.episodes)?;
        writeln!(f, "policy={:?}", self.policy)?;
        writeln!(f, "seed={}", self.seed)?;
        writeln!(f, "size={}", self.size)?;
        writeln!(f, "max_steps={}", self.max_steps)?;
        writeln!(f, "avg_score={:.2}", self.avg_score)?;
        writeln!(f, "median_score={:.2}", self.median_score)?;
        writeln!(f, "min_score={}", self.min_score)?;
        writeln!(f, "max_score={}", self.max_score)?;
        writeln!(f, "max_tile_overall={}", self.max_tile_overall)?;
        let distribution: Vec<String> = self
            .tile_distribution
            .iter()
            .map(|(tile, count)| format!("{}:{}", tile, count))
            .collect();
        writeln!(f, "tile_distribution={}", distribution.join(","))
    }
}
