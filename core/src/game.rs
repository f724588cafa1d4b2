//! Game session: a board, a score and the random source that feeds spawns.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::config::{GameConfig, SpawnConfig};
use crate::error::Result;
use crate::grid::{Grid, DEFAULT_SIZE};
use crate::moves::{apply_move, legal_moves, Direction};
use crate::spawn::{place_tile, spawn_tile_with};
use crate::terminal::is_terminal;

/// Result of executing a step (move) in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the board changed (and a new tile was spawned).
    pub changed: bool,
    /// Points earned from merges in this move.
    pub points: u64,
    /// Whether the game is over (no legal moves remaining).
    pub done: bool,
}

/// A 2048 game in progress.
///
/// The session owns its board by value and replaces it after every accepted
/// move. Spawns draw from a seeded `SmallRng`, so two sessions built from
/// the same config play out identically given the same moves.
#[derive(Clone)]
pub struct Game {
    grid: Grid,
    score: u64,
    moves: u32,
    done: bool,
    spawn: SpawnConfig,
    rng: SmallRng,
}

impl Game {
    /// Create a default 4×4 game with the given seed.
    ///
    /// The game starts with two random tiles (90% chance of 2, 10% chance of 4).
    pub fn new(seed: u64) -> Self {
        let spawn = SpawnConfig::default();
        let mut rng = SmallRng::seed_from_u64(seed);
        let empty = Grid::from_cells(DEFAULT_SIZE, vec![0; DEFAULT_SIZE * DEFAULT_SIZE]);
        let grid = opening_board(empty, &spawn, &mut rng);
        Game::from_parts(grid, spawn, rng)
    }

    /// Create a game from a validated configuration.
    pub fn with_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let (grid, _) = new_game_with(config.size, &config.spawn(), &mut rng)?;
        Ok(Game::from_parts(grid, config.spawn(), rng))
    }

    fn from_parts(grid: Grid, spawn: SpawnConfig, rng: SmallRng) -> Self {
        Game {
            done: is_terminal(&grid),
            grid,
            score: 0,
            moves: 0,
            spawn,
            rng,
        }
    }

    /// Reset the game to initial state with a new seed, keeping size and
    /// spawn settings.
    pub fn reset(&mut self, seed: u64) -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (grid, score) = new_game_with(self.grid.size(), &self.spawn, &mut rng)?;
        self.done = is_terminal(&grid);
        self.grid = grid;
        self.rng = rng;
        self.score = score;
        self.moves = 0;
        Ok(())
    }

    /// Execute a move in the given direction.
    ///
    /// Returns a `StepResult` containing:
    /// - `changed`: whether the board changed (a tile was spawned if true)
    /// - `points`: points earned from merges
    /// - `done`: whether the game is over
    ///
    /// If the move doesn't change the board, no tile is spawned.
    pub fn step(&mut self, direction: Direction) -> Result<StepResult> {
        if self.done {
            return Ok(StepResult {
                changed: false,
                points: 0,
                done: true,
            });
        }

        let outcome = apply_move(&self.grid, direction);
        if outcome.changed {
            self.grid = spawn_tile_with(&outcome.grid, &self.spawn, &mut self.rng)?;
            self.score += outcome.points;
            self.moves += 1;
        }
        self.done = is_terminal(&self.grid);

        tracing::debug!(
            %direction,
            points = outcome.points,
            changed = outcome.changed,
            score = self.score,
            "applied move"
        );
        if self.done {
            tracing::debug!(
                score = self.score,
                max_tile = self.max_tile(),
                moves = self.moves,
                "game over"
            );
        }

        Ok(StepResult {
            changed: outcome.changed,
            points: outcome.points,
            done: self.done,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Check if the game is over (no legal moves available).
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of accepted (board-changing) moves so far.
    pub fn moves_made(&self) -> u32 {
        self.moves
    }

    /// Legal directions as `[Up, Down, Left, Right]`.
    pub fn legal_moves(&self) -> [bool; 4] {
        legal_moves(&self.grid)
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    pub fn empty_count(&self) -> usize {
        self.grid.empty_count()
    }
}

/// Opening position: an empty `size`×`size` board with two spawned tiles,
/// and a score of zero.
///
/// ```
/// use game2048_core::new_game;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let (grid, score) = new_game(4, &mut SmallRng::seed_from_u64(1)).unwrap();
/// assert_eq!(grid.empty_count(), 14);
/// assert_eq!(score, 0);
/// ```
pub fn new_game<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<(Grid, u64)> {
    new_game_with(size, &SpawnConfig::default(), rng)
}

/// [`new_game`] with a configurable chance of a 4.
pub fn new_game_with<R: Rng + ?Sized>(
    size: usize,
    spawn: &SpawnConfig,
    rng: &mut R,
) -> Result<(Grid, u64)> {
    spawn.validate()?;
    let grid = opening_board(Grid::new(size)?, spawn, rng);
    Ok((grid, 0))
}

/// Two spawns on an empty board. A 1×1 board only has room for one.
fn opening_board<R: Rng + ?Sized>(empty: Grid, spawn: &SpawnConfig, rng: &mut R) -> Grid {
    let mut grid = empty;
    for _ in 0..2 {
        match place_tile(&grid, spawn, rng) {
            Some(next) => grid = next,
            None => break,
        }
    }
    grid
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("score", &self.score)
            .field("moves", &self.moves)
            .field("done", &self.done)
            .field("grid", &self.grid.to_rows())
            .finish()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "{}", self.grid)
    }
}
