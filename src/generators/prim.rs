use rand::Rng;

use crate::generators::random_position;
use crate::maze::{Direction, Grid, Position};
use crate::settings::Percent;

fn push_frontier_walls(grid: &Grid, cell: Position, frontier: &mut Vec<(Position, Direction)>) {
    frontier.extend(
        grid.neighbors(cell)
            .filter(|&(_, n)| !grid[n].visited)
            .map(|(d, _)| (cell, d)),
    );
}

/// Randomized Prim's algorithm over a set of frontier walls.
///
/// Each wall drawn from the frontier is processed with probability
/// `branching_probability` and discarded otherwise.
pub fn randomized_prim<R: Rng>(
    rows: usize,
    columns: usize,
    branching_probability: Percent,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    if grid.is_empty() {
        return grid;
    }
    let process_probability = branching_probability.probability();

    // Initialize the starting point
    let start = random_position(&grid, rng);
    grid[start].visited = true;

    let mut frontier = Vec::new();
    push_frontier_walls(&grid, start, &mut frontier);

    while !frontier.is_empty() {
        // Randomly select a wall from the frontier
        let idx = rng.random_range(0..frontier.len());
        let (cell, direction) = frontier.swap_remove(idx);
        if !rng.random_bool(process_probability) {
            continue;
        }
        let Some(next) = grid.step(cell, direction) else {
            continue;
        };
        if grid[next].visited {
            continue;
        }

        // Carve a passage between the cell and the frontier neighbor
        grid.clear_wall(cell, direction);
        grid[next].visited = true;
        push_frontier_walls(&grid, next, &mut frontier);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, test_support::assert_perfect};

    #[test]
    fn test_randomized_prim() {
        for seed in 0..5 {
            let grid = randomized_prim(7, 11, Percent::FULL, &mut get_rng(Some(seed)));
            assert_perfect(&grid);
        }
    }

    #[test]
    fn test_discarding_every_wall_carves_nothing() {
        let grid = randomized_prim(5, 5, Percent::ZERO, &mut get_rng(Some(0)));
        assert_eq!(grid.open_pairs(), 0);
    }

    #[test]
    fn test_partial_branching_keeps_tree_shape() {
        let grid = randomized_prim(10, 10, Percent::new(40), &mut get_rng(Some(9)));
        assert!(grid.wall_symmetry_holds());
        // Whatever got carved is still a tree over the visited cells
        let visited = grid.positions().filter(|&p| grid[p].visited).count();
        assert_eq!(grid.open_pairs(), visited - 1);
    }
}
