use rand::Rng;

use crate::generators::{random_neighbor, random_position};
use crate::maze::{Grid, Position};

/// Wilson's algorithm: loop-erased random walks from cells outside the maze
/// until they hit it, producing a uniform spanning tree.
pub fn wilson<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    if grid.is_empty() {
        return grid;
    }

    let first = random_position(&grid, rng);
    grid[first].visited = true;

    let mut outside: Vec<Position> = grid.positions().filter(|&p| p != first).collect();
    // Index of each cell inside the walk in progress
    let mut walk_index: Vec<Option<usize>> = vec![None; grid.len()];

    while !outside.is_empty() {
        let idx = rng.random_range(0..outside.len());
        let start = outside[idx];
        if grid[start].visited {
            outside.swap_remove(idx);
            continue;
        }

        let mut walk = vec![start];
        walk_index[grid.index_of(start)] = Some(0);
        let mut current = start;
        while !grid[current].visited {
            let Some(next) = random_neighbor(&grid, current, rng) else {
                break;
            };
            match walk_index[grid.index_of(next)] {
                Some(loop_start) => {
                    // Erase the loop the walk just closed
                    for erased in walk.drain(loop_start + 1..) {
                        walk_index[grid.index_of(erased)] = None;
                    }
                }
                None => {
                    walk_index[grid.index_of(next)] = Some(walk.len());
                    walk.push(next);
                }
            }
            current = next;
        }

        for pair in walk.windows(2) {
            grid.clear_wall_between(pair[0], pair[1]);
        }
        for &cell in &walk {
            grid[cell].visited = true;
            walk_index[grid.index_of(cell)] = None;
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, test_support::assert_perfect};

    #[test]
    fn test_wilson() {
        for seed in 0..5 {
            let grid = wilson(9, 9, &mut get_rng(Some(seed)));
            assert_perfect(&grid);
        }
    }

    #[test]
    fn test_wilson_single_row() {
        let grid = wilson(1, 7, &mut get_rng(Some(8)));
        assert_perfect(&grid);
    }
}
