use rand::Rng;

use crate::maze::{Direction, Grid};
use crate::settings::Percent;

/// Binary Tree: every cell carves either north or east.
///
/// Row 0 is the northern edge, so the corridor forced to carve east is the
/// top row rather than the bottom one; a maze with the corridor along the
/// bottom is this one flipped vertically. Cells in the last column can only
/// carve north. `horizontal_bias` is the probability of choosing north when
/// both are possible.
pub fn binary_tree<R: Rng>(rows: usize, columns: usize, horizontal_bias: Percent, rng: &mut R) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    let north_probability = horizontal_bias.probability();

    for pos in grid.positions() {
        let can_go_north = grid.step(pos, Direction::North).is_some();
        let can_go_east = grid.step(pos, Direction::East).is_some();
        let direction = match (can_go_north, can_go_east) {
            (true, true) => {
                if rng.random_bool(north_probability) {
                    Direction::North
                } else {
                    Direction::East
                }
            }
            (true, false) => Direction::North,
            (false, true) => Direction::East,
            // Top-right corner has nowhere to go
            (false, false) => continue,
        };
        grid.clear_wall(pos, direction);
        grid[pos].visited = true;
    }
    grid
}
