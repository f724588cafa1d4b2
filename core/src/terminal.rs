//! Game-over detection.

use crate::grid::Grid;
use crate::line::can_merge;
use crate::transform::transpose;

/// Whether no move can change `grid`.
///
/// A board is terminal when it has no empty cell and no two orthogonally
/// adjacent tiles can merge. Columns are checked by running the row test on
/// the transposed board.
pub fn is_terminal(grid: &Grid) -> bool {
    if grid.empty_count() > 0 {
        return false;
    }
    !has_adjacent_pair(grid) && !has_adjacent_pair(&transpose(grid))
}

fn has_adjacent_pair(grid: &Grid) -> bool {
    grid.rows()
        .any(|row| row.windows(2).any(|pair| can_merge(pair[0], pair[1])))
}
