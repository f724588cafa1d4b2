//! # 2048 Rules Engine
//!
//! Board representation, move resolution, tile spawning and game-over
//! detection for the 2048 sliding-tile puzzle, on square boards of any size.
//!
//! Every operation is a pure function over an immutable [`Grid`], except
//! spawning, which takes its random source as a parameter. [`Game`] wraps
//! the pieces into a seeded session for callers that want one.
//!
//! ## Example
//!
//! ```rust
//! use game2048_core::{apply_move, is_terminal, spawn_tile, Direction, Grid};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let grid = Grid::from_rows(vec![
//!     vec![2, 2, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//! ])
//! .unwrap();
//!
//! let outcome = apply_move(&grid, Direction::Left);
//! assert_eq!(outcome.points, 4);
//! if outcome.changed {
//!     let next = spawn_tile(&outcome.grid, &mut rng).unwrap();
//!     assert!(!is_terminal(&next));
//! }
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod line;
pub mod moves;
pub mod spawn;
pub mod terminal;
pub mod transform;

pub use config::{GameConfig, SpawnConfig};
pub use error::{Error, Result};
pub use game::{new_game, new_game_with, Game, StepResult};
pub use grid::{Grid, DEFAULT_SIZE};
pub use moves::{apply_move, legal_moves, Direction, MoveOutcome};
pub use spawn::{spawn_tile, spawn_tile_with};
pub use terminal::is_terminal;
pub use transform::{reverse_rows, transpose};
