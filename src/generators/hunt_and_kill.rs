use rand::{Rng, seq::IndexedRandom};

use crate::generators::{random_position, reduce_dead_ends};
use crate::maze::{Grid, Position};
use crate::settings::Percent;

/// Scans row-major for the first unvisited cell next to the visited region and
/// joins it to a random visited neighbor.
fn hunt<R: Rng>(grid: &mut Grid, rng: &mut R) -> Option<Position> {
    for pos in grid.positions() {
        if grid[pos].visited {
            continue;
        }
        let visited_neighbors = grid
            .neighbors(pos)
            .filter(|&(_, n)| grid[n].visited)
            .map(|(_, n)| n)
            .collect::<Vec<_>>();
        if let Some(&neighbor) = visited_neighbors.choose(rng) {
            grid.clear_wall_between(pos, neighbor);
            grid[pos].visited = true;
            return Some(pos);
        }
    }
    None
}

/// Hunt-and-Kill: random walk through unvisited cells until stuck, then hunt
/// for a new starting point. Dead ends are reduced afterwards per `dead_end_density`.
pub fn hunt_and_kill<R: Rng>(
    rows: usize,
    columns: usize,
    dead_end_density: Percent,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    if grid.is_empty() {
        return grid;
    }

    let start = random_position(&grid, rng);
    grid[start].visited = true;
    let mut current = Some(start);

    while let Some(cell) = current {
        let unvisited = grid
            .neighbors(cell)
            .filter(|&(_, n)| !grid[n].visited)
            .map(|(_, n)| n)
            .collect::<Vec<_>>();
        current = match unvisited.choose(rng) {
            Some(&next) => {
                grid.clear_wall_between(cell, next);
                grid[next].visited = true;
                Some(next)
            }
            None => hunt(&mut grid, rng),
        };
    }

    reduce_dead_ends(&mut grid, dead_end_density, rng);
    grid
}
