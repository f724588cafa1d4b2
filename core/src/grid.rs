//! Square board of tile values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Default board edge length.
pub const DEFAULT_SIZE: usize = 4;

/// An N×N board of tiles.
///
/// Cells are stored in row-major order. `0` is an empty cell; any other value
/// is a power of two. A `Grid` is never mutated after construction: every
/// engine operation hands back a fresh one, so two grids never alias.
///
/// Serializes as a list of rows (`[[2, 0], [0, 4]]`) and validates the shape
/// when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// An empty `size`×`size` grid.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidSize(size));
        }
        Ok(Grid {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Build a grid from nested rows, rejecting empty, ragged or non-square
    /// input and tiles that are not powers of two.
    ///
    /// ```
    /// use game2048_core::Grid;
    ///
    /// let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(grid.get(1, 1), Some(4));
    /// assert!(Grid::from_rows(vec![vec![2, 0], vec![0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(Error::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != size {
                return Err(Error::RaggedRow {
                    row,
                    expected: size,
                    found: line.len(),
                });
            }
            for (col, &value) in line.iter().enumerate() {
                if value != 0 && !value.is_power_of_two() {
                    return Err(Error::InvalidTile { row, col, value });
                }
            }
            cells.extend(line);
        }

        Ok(Grid { size, cells })
    }

    /// Assemble a grid from already-validated row-major cells.
    pub(crate) fn from_cells(size: usize, cells: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Grid { size, cells }
    }

    /// A copy of this grid with one cell replaced.
    pub(crate) fn with_tile(&self, row: usize, col: usize, value: u32) -> Self {
        let mut cells = self.cells.clone();
        cells[row * self.size + col] = value;
        Grid::from_cells(self.size, cells)
    }

    /// Edge length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at (`row`, `col`), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// The cells of row `index`.
    pub fn row(&self, index: usize) -> Option<&[u32]> {
        self.rows().nth(index)
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Nested-row copy of the board.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of every tile on the board. Moves never change it.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }
}

impl TryFrom<Vec<Vec<u32>>> for Grid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u32>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}", "------+".repeat(self.size));
        writeln!(f, "{}", border)?;
        for row in self.rows() {
            write!(f, "|")?;
            for &val in row {
                if val == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{:^6}|", val)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_is_empty() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.empty_count(), 16);
        assert_eq!(grid.max_tile(), 0);
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert_eq!(Grid::new(0), Err(Error::InvalidSize(0)));
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert_eq!(Grid::from_rows(vec![]), Err(Error::EmptyGrid));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(vec![vec![2, 0, 0], vec![0, 0], vec![0, 0, 0]]).unwrap_err();
        assert_eq!(
            err,
            Error::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        // 1×4 is a row vector, not a board
        let err = Grid::from_rows(vec![vec![2, 0, 0, 2]]).unwrap_err();
        assert!(matches!(err, Error::RaggedRow { row: 0, .. }));
    }

    #[test]
    fn test_from_rows_rejects_non_power_of_two() {
        let err = Grid::from_rows(vec![vec![2, 3], vec![0, 0]]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTile {
                row: 0,
                col: 1,
                value: 3
            }
        );
    }

    #[test]
    fn test_from_rows_round_trips_through_to_rows() {
        let rows = vec![vec![2, 0, 4], vec![0, 8, 0], vec![16, 0, 2]];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.to_rows(), rows);
        assert_eq!(grid.row(1), Some(&[0, 8, 0][..]));
        assert_eq!(grid.row(3), None);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_cells_row_major() {
        let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
        assert_eq!(grid.empty_cells(), vec![(0, 1), (1, 0)]);
        assert_eq!(grid.empty_count(), 2);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(2).unwrap();
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_max_tile_and_sum() {
        let grid = Grid::from_rows(vec![vec![2, 64], vec![8, 0]]).unwrap();
        assert_eq!(grid.max_tile(), 64);
        assert_eq!(grid.tile_sum(), 74);
    }

    #[test]
    fn test_with_tile_leaves_original_untouched() {
        let grid = Grid::new(2).unwrap();
        let next = grid.with_tile(1, 0, 2);
        assert_eq!(grid.get(1, 0), Some(0));
        assert_eq!(next.get(1, 0), Some(2));
    }

    // -------------------------------------------------------------------------
    // Formatting and serde
    // -------------------------------------------------------------------------

    #[test]
    fn test_display_format() {
        let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 1024]]).unwrap();
        let display = grid.to_string();
        assert!(display.starts_with("+------+------+\n"));
        assert!(display.contains("|  2   |      |"));
        assert!(display.contains(" 1024 "));
    }

    #[test]
    fn test_serde_uses_nested_rows() {
        let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, "[[2,0],[0,4]]");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_deserialize_rejects_ragged() {
        let result: std::result::Result<Grid, _> = serde_json::from_str("[[2,0],[0]]");
        assert!(result.is_err());
    }
}
