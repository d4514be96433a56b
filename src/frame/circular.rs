//! Circular framing.
//!
//! Row `r` of the grid is ring `r` counted from the outer rim inward and
//! column `s` is sector `s`. North points outward, south toward the hub, and
//! east/west run around the circle, wrapping from the last sector to the first.

use rand::Rng;

use crate::error::{MazeError, Result};
use crate::generators::{Generator, generate_grid};
use crate::maze::{Direction, Grid, Position};
use crate::settings::MazeSettings;

/// Builds a circular maze with `requested_rings - 1` rings (the innermost is
/// left as an empty hub) and `sectors` sectors. Entrance and exit sit on the
/// outer ring at a quarter and three quarters of the way around.
pub fn circular_maze<R: Rng>(
    generator: Generator,
    requested_rings: usize,
    sectors: usize,
    settings: &MazeSettings,
    rng: &mut R,
) -> Result<Grid> {
    if requested_rings < 2 || sectors < 2 {
        return Err(MazeError::InvalidDimensions {
            rows: requested_rings,
            columns: sectors,
        });
    }
    let rings = requested_rings - 1;
    let mut grid = generate_grid(generator, rings, sectors, settings, rng);

    wrap_sectors(&mut grid);
    close_hub(&mut grid);

    let entrance = Position::new(0, sectors / 4);
    let exit = Position::new(0, sectors * 3 / 4);
    for pos in [entrance, exit] {
        grid[pos].set_wall(Direction::North, false);
    }
    grid[entrance].is_entrance = true;
    grid[exit].is_exit = true;
    tracing::debug!(
        "[frame] circular {} rings x {} sectors, entrance {} exit {}",
        rings,
        sectors,
        entrance,
        exit
    );
    Ok(grid)
}

/// Makes the last sector's east wall and the first sector's west wall the
/// same wall on every ring.
pub fn wrap_sectors(grid: &mut Grid) {
    let last = grid.columns() - 1;
    for ring in 0..grid.rows() {
        let present = grid[Position::new(ring, last)].east;
        grid[Position::new(ring, 0)].west = present;
    }
}

/// Keeps the innermost ring sealed off from the hub.
pub fn close_hub(grid: &mut Grid) {
    let innermost = grid.rows() - 1;
    for sector in 0..grid.columns() {
        grid[Position::new(innermost, sector)].south = true;
    }
}

/// Neighbors reachable through cleared walls in circular topology: ring in
/// and out, sectors wrapping modulo the sector count.
pub fn circular_neighbors(grid: &Grid, pos: Position) -> Vec<Position> {
    let sectors = grid.columns();
    let cell = grid[pos];
    let mut neighbors = Vec::with_capacity(4);
    if !cell.north && pos.row > 0 {
        neighbors.push(Position::new(pos.row - 1, pos.col));
    }
    if !cell.south && pos.row + 1 < grid.rows() {
        neighbors.push(Position::new(pos.row + 1, pos.col));
    }
    if !cell.east && sectors > 1 {
        neighbors.push(Position::new(pos.row, (pos.col + 1) % sectors));
    }
    if !cell.west && sectors > 1 {
        neighbors.push(Position::new(pos.row, (pos.col + sectors - 1) % sectors));
    }
    neighbors
}
