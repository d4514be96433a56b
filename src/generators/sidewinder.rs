use rand::Rng;

use crate::maze::{Direction, Grid, Position};
use crate::settings::Percent;

/// Sidewinder: each row is split into horizontal runs and every closed run
/// gets exactly one passage north.
///
/// The first row is a single run with no north exits. `horizontal_bias` is the
/// chance of extending the current run east, and `branching_probability` gates
/// whether closing a run carves its north exit; when the gate fails the run
/// keeps growing east instead. The last cell of a row always closes its run.
pub fn sidewinder<R: Rng>(
    rows: usize,
    columns: usize,
    horizontal_bias: Percent,
    branching_probability: Percent,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    let east_probability = horizontal_bias.probability();
    let branch_probability = branching_probability.probability();

    for row in 0..rows {
        let mut run_start = 0;
        for col in 0..columns {
            let pos = Position::new(row, col);
            grid[pos].visited = true;
            let at_east_edge = col + 1 == columns;

            if row == 0 {
                if !at_east_edge {
                    grid.clear_wall(pos, Direction::East);
                }
                continue;
            }

            let close_run = at_east_edge
                || (!rng.random_bool(east_probability) && rng.random_bool(branch_probability));
            if close_run {
                let exit_col = rng.random_range(run_start..=col);
                grid.clear_wall(Position::new(row, exit_col), Direction::North);
                run_start = col + 1;
            } else {
                grid.clear_wall(pos, Direction::East);
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, test_support::assert_perfect};

    #[test]
    fn test_first_row_is_one_corridor() {
        let grid = sidewinder(6, 7, Percent::HALF, Percent::FULL, &mut get_rng(Some(11)));
        assert_perfect(&grid);
        for col in 0..7 {
            let cell = grid[Position::new(0, col)];
            assert!(cell.north);
            assert_eq!(cell.east, col == 6);
        }
    }

    #[test]
    fn test_each_run_has_one_north_exit() {
        let grid = sidewinder(8, 8, Percent::new(30), Percent::FULL, &mut get_rng(Some(5)));
        for row in 1..8 {
            let mut exits_in_run = 0;
            for col in 0..8 {
                let cell = grid[Position::new(row, col)];
                if !cell.north {
                    exits_in_run += 1;
                }
                if cell.east {
                    assert_eq!(exits_in_run, 1, "row {row} col {col}");
                    exits_in_run = 0;
                }
            }
        }
    }

    #[test]
    fn test_no_branching_gives_long_runs() {
        let grid = sidewinder(5, 9, Percent::ZERO, Percent::ZERO, &mut get_rng(Some(2)));
        assert_perfect(&grid);
        // Only the row's last cell can close a run, so each row has one north exit
        for row in 1..5 {
            let exits = (0..9).filter(|&c| !grid[Position::new(row, c)].north).count();
            assert_eq!(exits, 1);
        }
    }
}
