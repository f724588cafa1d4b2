//! Random tile placement.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SpawnConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Place a new tile on a uniformly chosen empty cell.
/// 90% chance of 2, 10% chance of 4.
///
/// Fails with [`Error::BoardFull`] when there is no empty cell; callers only
/// spawn after a move that changed the board, which always frees one.
pub fn spawn_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<Grid> {
    spawn_tile_with(grid, &SpawnConfig::default(), rng)
}

/// [`spawn_tile`] with a configurable chance of a 4.
pub fn spawn_tile_with<R: Rng + ?Sized>(
    grid: &Grid,
    config: &SpawnConfig,
    rng: &mut R,
) -> Result<Grid> {
    config.validate()?;
    place_tile(grid, config, rng).ok_or(Error::BoardFull)
}

/// Spawn with an already validated config; `None` on a full board.
pub(crate) fn place_tile<R: Rng + ?Sized>(
    grid: &Grid,
    config: &SpawnConfig,
    rng: &mut R,
) -> Option<Grid> {
    let empty_cells = grid.empty_cells();
    let &(row, col) = empty_cells.choose(rng)?;
    let value = if rng.gen_bool(config.four_probability) { 4 } else { 2 };

    tracing::debug!(row, col, value, "spawned tile");
    Some(grid.with_tile(row, col, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(12345)
    }

    #[test]
    fn test_spawn_fills_last_empty_cell() {
        let g = Grid::from_rows(vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 0, 4],
            vec![4, 2, 4, 2],
        ])
        .unwrap();
        let mut rng = rng();
        for _ in 0..50 {
            let spawned = spawn_tile(&g, &mut rng).unwrap();
            assert_eq!(spawned.empty_count(), 0);
            let value = spawned.get(2, 2).unwrap();
            assert!(value == 2 || value == 4);
        }
    }

    #[test]
    fn test_spawn_only_touches_one_empty_cell() {
        let g = Grid::from_rows(vec![vec![8, 0, 0], vec![0, 16, 0], vec![0, 0, 0]]).unwrap();
        let spawned = spawn_tile(&g, &mut rng()).unwrap();
        let diffs: Vec<usize> = (0..9)
            .filter(|&i| g.cells()[i] != spawned.cells()[i])
            .collect();
        assert_eq!(diffs.len(), 1);
        assert_eq!(g.cells()[diffs[0]], 0);
    }

    #[test]
    fn test_spawn_on_full_board_fails() {
        let g = Grid::from_rows(vec![vec![2, 4], vec![4, 2]]).unwrap();
        assert_eq!(spawn_tile(&g, &mut rng()), Err(Error::BoardFull));
    }

    #[test]
    fn test_spawn_rejects_bad_probability() {
        let g = Grid::new(4).unwrap();
        let config = SpawnConfig {
            four_probability: 2.0,
        };
        assert_eq!(
            spawn_tile_with(&g, &config, &mut rng()),
            Err(Error::InvalidProbability(2.0))
        );
    }

    #[test]
    fn test_spawn_is_deterministic_for_a_seed() {
        let g = Grid::new(4).unwrap();
        let a = spawn_tile(&g, &mut SmallRng::seed_from_u64(9)).unwrap();
        let b = spawn_tile(&g, &mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_forced_four() {
        let g = Grid::new(3).unwrap();
        let config = SpawnConfig {
            four_probability: 1.0,
        };
        let spawned = spawn_tile_with(&g, &config, &mut rng()).unwrap();
        assert_eq!(spawned.max_tile(), 4);
        assert_eq!(spawned.tile_sum(), 4);
    }

    #[test]
    fn test_value_and_cell_distribution() {
        let g = Grid::new(4).unwrap();
        let mut rng = rng();
        let trials = 16_000;
        let mut fours = 0;
        let mut per_cell = [0u32; 16];
        for _ in 0..trials {
            let spawned = spawn_tile(&g, &mut rng).unwrap();
            let (idx, &value) = spawned
                .cells()
                .iter()
                .enumerate()
                .find(|(_, &v)| v != 0)
                .unwrap();
            per_cell[idx] += 1;
            if value == 4 {
                fours += 1;
            }
        }

        let ratio = fours as f64 / trials as f64;
        assert!((0.08..0.12).contains(&ratio), "ratio of fours was {}", ratio);
        // 1000 expected per cell
        for count in per_cell {
            assert!((800..1200).contains(&count), "cell count was {}", count);
        }
    }
}
