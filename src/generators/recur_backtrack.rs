use rand::{Rng, seq::IndexedRandom};

use crate::generators::{random_position, reduce_dead_ends};
use crate::maze::Grid;
use crate::settings::Percent;

/// Recursive backtracker, driven by an explicit stack.
///
/// Each unvisited neighbor survives into the candidate list with probability
/// `branching_probability`, so a cell can be abandoned while it still has
/// unvisited neighbors. Dead ends are reduced afterwards per `dead_end_density`.
pub fn recursive_backtrack<R: Rng>(
    rows: usize,
    columns: usize,
    branching_probability: Percent,
    dead_end_density: Percent,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    if grid.is_empty() {
        return grid;
    }
    let keep_probability = branching_probability.probability();

    // Initialize the starting point
    let start = random_position(&grid, rng);
    grid[start].visited = true;

    // The stack keeps the current path from the start cell
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let candidates = grid
            .neighbors(cell)
            .filter(|&(_, n)| !grid[n].visited)
            .map(|(_, n)| n)
            .filter(|_| rng.random_bool(keep_probability))
            .collect::<Vec<_>>();

        match candidates.choose(rng) {
            Some(&neighbor) => {
                grid.clear_wall_between(cell, neighbor);
                grid[neighbor].visited = true;
                // Carve the maze in that neighbor's direction
                stack.push(neighbor);
            }
            None => {
                stack.pop();
            }
        }
    }

    reduce_dead_ends(&mut grid, dead_end_density, rng);
    grid
}
