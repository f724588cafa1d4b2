//! Grid symmetries used to express every direction as a left shift.
//!
//! Both transforms are involutions: applying one twice gives back the input.

use crate::grid::Grid;

/// Mirror each row in place; rows keep their position.
pub fn reverse_rows(grid: &Grid) -> Grid {
    let cells = grid
        .rows()
        .flat_map(|row| row.iter().rev().copied())
        .collect();
    Grid::from_cells(grid.size(), cells)
}

/// Swap rows and columns: cell (i, j) moves to (j, i).
pub fn transpose(grid: &Grid) -> Grid {
    let n = grid.size();
    let src = grid.cells();
    let cells = (0..n)
        .flat_map(|row| (0..n).map(move |col| src[col * n + row]))
        .collect();
    Grid::from_cells(n, cells)
}
