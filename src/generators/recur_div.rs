use rand::Rng;

use crate::maze::{Direction, Grid, Position};
use crate::settings::Percent;

/// A rectangular sub-chamber still waiting to be divided.
#[derive(Debug, Clone, Copy)]
struct Chamber {
    top: usize,
    left: usize,
    height: usize,
    width: usize,
}

/// Recursive division: start open and keep bisecting chambers with a wall that
/// has a single passage, until a chamber is one cell thick.
///
/// `horizontal_bias` is the probability of a horizontal dividing wall. Pending
/// chambers live on an explicit stack.
pub fn recursive_division<R: Rng>(
    rows: usize,
    columns: usize,
    horizontal_bias: Percent,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(rows, columns, false);
    if grid.is_empty() {
        return grid;
    }
    grid.close_boundary();
    let horizontal_probability = horizontal_bias.probability();

    let mut chambers = vec![Chamber {
        top: 0,
        left: 0,
        height: rows,
        width: columns,
    }];

    while let Some(chamber) = chambers.pop() {
        let Chamber {
            top,
            left,
            height,
            width,
        } = chamber;
        if height < 2 || width < 2 {
            continue;
        }

        if rng.random_bool(horizontal_probability) {
            // Wall runs below row `wall_row`
            let wall_row = top + rng.random_range(0..height - 1);
            let gap = left + rng.random_range(0..width);
            for col in (left..left + width).filter(|&c| c != gap) {
                grid.set_wall(Position::new(wall_row, col), Direction::South, true);
            }
            let upper_height = wall_row - top + 1;
            chambers.push(Chamber {
                height: upper_height,
                ..chamber
            });
            chambers.push(Chamber {
                top: wall_row + 1,
                height: height - upper_height,
                ..chamber
            });
        } else {
            // Wall runs right of column `wall_col`
            let wall_col = left + rng.random_range(0..width - 1);
            let gap = top + rng.random_range(0..height);
            for row in (top..top + height).filter(|&r| r != gap) {
                grid.set_wall(Position::new(row, wall_col), Direction::East, true);
            }
            let left_width = wall_col - left + 1;
            chambers.push(Chamber {
                width: left_width,
                ..chamber
            });
            chambers.push(Chamber {
                left: wall_col + 1,
                width: width - left_width,
                ..chamber
            });
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, test_support::assert_perfect};

    #[test]
    fn test_recursive_division() {
        for seed in 0..5 {
            let grid = recursive_division(9, 14, Percent::HALF, &mut get_rng(Some(seed)));
            assert_perfect(&grid);
        }
    }

    #[test]
    fn test_single_row_stays_open() {
        let grid = recursive_division(1, 6, Percent::HALF, &mut get_rng(Some(0)));
        assert_eq!(grid.open_pairs(), 5);
        assert!(grid[Position::new(0, 0)].west);
        assert!(grid[Position::new(0, 5)].east);
    }

    #[test]
    fn test_full_bias_only_horizontal_walls() {
        let grid = recursive_division(6, 6, Percent::FULL, &mut get_rng(Some(4)));
        assert_perfect(&grid);
        // With only horizontal walls no interior east wall is ever raised
        for row in 0..6 {
            for col in 0..5 {
                assert!(!grid[Position::new(row, col)].east);
            }
        }
    }
}
