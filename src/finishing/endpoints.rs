use rand::{Rng, seq::IndexedRandom};

use crate::error::{MazeError, Result};
use crate::maze::{Direction, Grid, Position};
use crate::settings::EndpointPolicy;

/// How many times a side-based exit is redrawn when it lands on the entrance.
const MAX_EXIT_DRAWS: usize = 8;

/// A random cell on the boundary row or column facing `direction`.
pub fn boundary_position<R: Rng>(grid: &Grid, direction: Direction, rng: &mut R) -> Position {
    let last_row = grid.rows() - 1;
    let last_col = grid.columns() - 1;
    match direction {
        Direction::North => Position::new(0, rng.random_range(0..=last_col)),
        Direction::South => Position::new(last_row, rng.random_range(0..=last_col)),
        Direction::West => Position::new(rng.random_range(0..=last_row), 0),
        Direction::East => Position::new(rng.random_range(0..=last_row), last_col),
    }
}

/// The cell with the greatest Manhattan distance from `from`.
///
/// This is a geometric approximation: the cell is not necessarily the one
/// with the longest path through the maze.
pub fn farthest_position(grid: &Grid, from: Position) -> Position {
    grid.valid_positions()
        .max_by_key(|p| p.manhattan(from))
        .unwrap_or(from)
}

/// The boundary wall a cell opens: top row opens north, bottom row south,
/// otherwise the west or east column.
fn boundary_wall(grid: &Grid, pos: Position) -> Direction {
    if pos.row == 0 {
        Direction::North
    } else if pos.row + 1 == grid.rows() {
        Direction::South
    } else if pos.col == 0 {
        Direction::West
    } else {
        Direction::East
    }
}

fn resolve<R: Rng>(
    grid: &Grid,
    policy: EndpointPolicy,
    entrance: Option<Position>,
    rng: &mut R,
) -> Result<(Position, Direction)> {
    match policy {
        EndpointPolicy::Side(direction) => Ok((boundary_position(grid, direction, rng), direction)),
        EndpointPolicy::Random => {
            let direction = *Direction::ALL
                .choose(rng)
                .ok_or(MazeError::MissingEndpoint("entrance"))?;
            Ok((boundary_position(grid, direction, rng), direction))
        }
        EndpointPolicy::Farthest => {
            let from = entrance.ok_or(MazeError::InvalidParameter {
                name: "entrance",
                value: "farthest".to_string(),
            })?;
            let pos = farthest_position(grid, from);
            Ok((pos, boundary_wall(grid, pos)))
        }
    }
}

/// Picks the entrance and exit on a rectangular grid, opens their boundary
/// walls and flags them. Any previous entrance/exit flags are cleared.
pub fn place_endpoints<R: Rng>(
    grid: &mut Grid,
    entrance_policy: EndpointPolicy,
    exit_policy: EndpointPolicy,
    rng: &mut R,
) -> Result<(Position, Position)> {
    if grid.is_empty() {
        return Err(MazeError::MissingEndpoint("entrance"));
    }
    if entrance_policy == EndpointPolicy::Farthest {
        return Err(MazeError::InvalidParameter {
            name: "entrance",
            value: "farthest".to_string(),
        });
    }

    let (entrance, entrance_wall) = resolve(grid, entrance_policy, None, rng)?;
    let mut exit_choice = resolve(grid, exit_policy, Some(entrance), rng)?;
    let mut draws = 1;
    while exit_choice.0 == entrance && grid.len() > 1 {
        exit_choice = if draws < MAX_EXIT_DRAWS {
            resolve(grid, exit_policy, Some(entrance), rng)?
        } else {
            resolve(grid, EndpointPolicy::Farthest, Some(entrance), rng)?
        };
        draws += 1;
    }
    let (exit, exit_wall) = exit_choice;

    for pos in grid.positions() {
        grid[pos].is_entrance = false;
        grid[pos].is_exit = false;
    }
    grid.clear_wall(entrance, entrance_wall);
    grid.clear_wall(exit, exit_wall);
    grid[entrance].is_entrance = true;
    grid[exit].is_exit = true;
    tracing::debug!(
        "[finish] entrance {} ({}) exit {} ({})",
        entrance,
        entrance_wall,
        exit,
        exit_wall
    );
    Ok((entrance, exit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_side_policies_open_boundary_walls() {
        let mut rng = get_rng(Some(4));
        for (entrance_side, exit_side) in [
            (Direction::West, Direction::East),
            (Direction::North, Direction::South),
            (Direction::South, Direction::West),
        ] {
            let mut grid = Grid::new(6, 8, true);
            let (entrance, exit) = place_endpoints(
                &mut grid,
                EndpointPolicy::Side(entrance_side),
                EndpointPolicy::Side(exit_side),
                &mut rng,
            )
            .unwrap();
            assert!(!grid[entrance].has_wall(entrance_side));
            assert!(!grid[exit].has_wall(exit_side));
            assert_eq!(grid.entrance(), Some(entrance));
            assert_eq!(grid.exit(), Some(exit));
            assert_eq!(grid.positions().filter(|&p| grid[p].is_entrance).count(), 1);
            assert_eq!(grid.positions().filter(|&p| grid[p].is_exit).count(), 1);
        }
    }

    #[test]
    fn test_farthest_exit_uses_manhattan_distance() {
        let mut grid = Grid::new(5, 7, true);
        let mut rng = get_rng(Some(0));
        let (entrance, exit) = place_endpoints(
            &mut grid,
            EndpointPolicy::Side(Direction::North),
            EndpointPolicy::Farthest,
            &mut rng,
        )
        .unwrap();
        assert_eq!(entrance.row, 0);
        assert_eq!(exit.row, 4);
        let best = grid.positions().map(|p| p.manhattan(entrance)).max().unwrap();
        assert_eq!(exit.manhattan(entrance), best);
        assert!(!grid[exit].south);
    }

    #[test]
    fn test_farthest_entrance_rejected() {
        let mut grid = Grid::new(3, 3, true);
        let result = place_endpoints(
            &mut grid,
            EndpointPolicy::Farthest,
            EndpointPolicy::Random,
            &mut get_rng(Some(0)),
        );
        assert!(matches!(result, Err(MazeError::InvalidParameter { .. })));
    }

    #[test]
    fn test_exit_never_lands_on_entrance() {
        let mut rng = get_rng(Some(21));
        for _ in 0..50 {
            let mut grid = Grid::new(1, 2, true);
            let (entrance, exit) = place_endpoints(
                &mut grid,
                EndpointPolicy::Side(Direction::North),
                EndpointPolicy::Side(Direction::North),
                &mut rng,
            )
            .unwrap();
            assert_ne!(entrance, exit);
        }
    }
}
