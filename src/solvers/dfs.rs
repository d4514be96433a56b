use super::{Topology, passable_neighbors};
use crate::maze::{Grid, Position};

/// Depth-first search from `start` to `goal` over cleared walls, using an
/// explicit stack. Returns the path inclusive of both ends.
pub fn depth_first_path(
    grid: &Grid,
    start: Position,
    goal: Position,
    topology: Topology,
) -> Option<Vec<Position>> {
    if !grid.is_valid(start) {
        return None;
    }
    let mut visited = vec![false; grid.len()];
    visited[grid.index_of(start)] = true;

    // Each frame holds a cell and the neighbors it has yet to try
    let mut stack = vec![(start, passable_neighbors(grid, start, topology))];
    let mut path = vec![start];

    while let Some((cell, pending)) = stack.last_mut() {
        if *cell == goal {
            return Some(path);
        }
        match pending.pop() {
            Some(next) => {
                let idx = grid.index_of(next);
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;
                path.push(next);
                stack.push((next, passable_neighbors(grid, next, topology)));
            }
            None => {
                // Dead end: backtrack
                stack.pop();
                path.pop();
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_only_route_through_corridor() {
        // A serpentine 3x3: east along row 0, down, west along row 1, down, east along row 2
        let mut grid = Grid::new(3, 3, true);
        let route = [(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0), (2, 0), (2, 1), (2, 2)]
            .map(|(r, c)| Position::new(r, c));
        for pair in route.windows(2) {
            grid.clear_wall_between(pair[0], pair[1]);
        }
        let path = depth_first_path(&grid, route[0], route[8], Topology::Rectangular).unwrap();
        assert_eq!(path, route.to_vec());
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::new(2, 2, true);
        let p = Position::new(1, 1);
        assert_eq!(depth_first_path(&grid, p, p, Topology::Rectangular), Some(vec![p]));
    }

    #[test]
    fn test_circular_wraparound_is_used() {
        let mut grid = Grid::new(1, 5, true);
        grid.clear_wall_between(Position::new(0, 0), Position::new(0, 1));
        grid[Position::new(0, 4)].east = false;
        grid[Position::new(0, 0)].west = false;
        let path = depth_first_path(
            &grid,
            Position::new(0, 1),
            Position::new(0, 4),
            Topology::Circular,
        )
        .unwrap();
        assert_eq!(
            path,
            vec![Position::new(0, 1), Position::new(0, 0), Position::new(0, 4)]
        );
        assert!(
            depth_first_path(&grid, Position::new(0, 1), Position::new(0, 4), Topology::Rectangular)
                .is_none()
        );
    }
}
