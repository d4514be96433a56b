use rand::Rng;

use crate::generators::{random_neighbor, random_position};
use crate::maze::Grid;

/// Aldous-Broder: an unbiased random walk that carves into each cell the first
/// time it is entered. Stops once every cell has been visited.
pub fn aldous_broder<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    if grid.is_empty() {
        return grid;
    }

    let mut current = random_position(&grid, rng);
    grid[current].visited = true;
    let mut remaining = grid.len() - 1;

    while remaining > 0 {
        let Some(next) = random_neighbor(&grid, current, rng) else {
            break;
        };
        if !grid[next].visited {
            grid.clear_wall_between(current, next);
            grid[next].visited = true;
            remaining -= 1;
        }
        current = next;
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, test_support::assert_perfect};

    #[test]
    fn test_aldous_broder() {
        for seed in 0..5 {
            let grid = aldous_broder(8, 12, &mut get_rng(Some(seed)));
            assert_perfect(&grid);
            assert!(grid.positions().all(|p| grid[p].visited));
        }
    }
}
