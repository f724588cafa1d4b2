//! Move resolution in the four directions.
//!
//! Only the left shift is implemented directly. The other directions are
//! conjugates of it under the grid symmetries in [`crate::transform`]:
//!
//! - right = reverse rows, shift left, reverse rows
//! - up    = transpose, shift left, transpose
//! - down  = transpose, shift right, transpose

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::grid::Grid;
use crate::line::reduce_line;
use crate::terminal::is_terminal;
use crate::transform::{reverse_rows, transpose};

/// The four possible move directions in 2048.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// Every direction, in discriminant order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert a u8 to a Direction (0=Up, 1=Down, 2=Left, 3=Right).
    /// Returns None for invalid values.
    pub fn from_u8(value: u8) -> Option<Direction> {
        Direction::ALL.get(usize::from(value)).copied()
    }

    fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses `up`/`down`/`left`/`right` or a WASD key, ignoring case.
impl FromStr for Direction {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(Error::InvalidDirection(token.to_string())),
        }
    }
}

/// Everything produced by resolving one move, before any tile is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board after sliding and merging.
    pub grid: Grid,
    /// Sum of the tiles created by merges.
    pub points: u64,
    /// Whether any cell differs from the input board. A spawn should follow
    /// exactly when this is set.
    pub changed: bool,
    /// Whether the resulting board admits no further move, judged before any
    /// spawn. Always `false` when `changed` is set, since the move freed a
    /// cell; a session's game-over flag must be recomputed after spawning.
    pub terminal: bool,
}

/// Resolve a move on `grid` without spawning.
///
/// ```
/// use game2048_core::{apply_move, Direction, Grid};
///
/// let grid = Grid::from_rows(vec![vec![2, 2], vec![0, 0]]).unwrap();
/// let outcome = apply_move(&grid, Direction::Left);
/// assert_eq!(outcome.grid.to_rows(), vec![vec![4, 0], vec![0, 0]]);
/// assert_eq!(outcome.points, 4);
/// assert!(outcome.changed);
/// ```
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveOutcome {
    let (moved, points) = match direction {
        Direction::Left => shift_left(grid),
        Direction::Right => shift_right(grid),
        Direction::Up => {
            let (moved, points) = shift_left(&transpose(grid));
            (transpose(&moved), points)
        }
        Direction::Down => {
            let (moved, points) = shift_right(&transpose(grid));
            (transpose(&moved), points)
        }
    };

    let changed = moved != *grid;
    let terminal = is_terminal(&moved);
    tracing::trace!(%direction, points, changed, terminal, "resolved move");

    MoveOutcome {
        grid: moved,
        points,
        changed,
        terminal,
    }
}

/// Which directions would change `grid`, indexed like [`Direction::ALL`].
pub fn legal_moves(grid: &Grid) -> [bool; 4] {
    Direction::ALL.map(|direction| apply_move(grid, direction).changed)
}

fn shift_left(grid: &Grid) -> (Grid, u64) {
    let mut cells = Vec::with_capacity(grid.size() * grid.size());
    let mut points = 0;
    for row in grid.rows() {
        let (reduced, row_points) = reduce_line(row);
        cells.extend(reduced);
        points += row_points;
    }
    (Grid::from_cells(grid.size(), cells), points)
}

fn shift_right(grid: &Grid) -> (Grid, u64) {
    let (moved, points) = shift_left(&reverse_rows(grid));
    (reverse_rows(&moved), points)
}
