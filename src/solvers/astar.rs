use std::{cmp::Reverse, collections::BinaryHeap};

use crate::maze::{Grid, Position};

/// Which moves the search may take between adjacent valid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Only through cleared walls.
    OpenOnly,
    /// Walls are ignored; used to find a path worth carving.
    ThroughWalls,
}

#[derive(Debug, PartialEq, Eq)]
struct TrackedCell {
    /// Coordinates of the cell in the maze
    coord: Position,
    /// Cost to reach this cell from the start
    traveling_cost: usize,
    /// Estimated cost to reach the goal from this cell
    heuristic_cost: usize,
}

impl Ord for TrackedCell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.traveling_cost + self.heuristic_cost, self.heuristic_cost, self.coord).cmp(&(
            other.traveling_cost + other.heuristic_cost,
            other.heuristic_cost,
            other.coord,
        ))
    }
}

impl PartialOrd for TrackedCell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// 4-directional A* with a Manhattan heuristic, restricted to valid cells.
/// Returns the path from `start` to `goal` inclusive.
pub fn find_path(grid: &Grid, start: Position, goal: Position, mode: PathMode) -> Option<Vec<Position>> {
    if !grid.is_valid(start) || !grid.is_valid(goal) {
        return None;
    }

    // Using Reverse to turn the max-heap into a min-heap
    let mut pq = BinaryHeap::new();
    pq.push(Reverse(TrackedCell {
        coord: start,
        traveling_cost: 0,
        heuristic_cost: start.manhattan(goal),
    }));
    let mut costs = vec![usize::MAX; grid.len()];
    costs[grid.index_of(start)] = 0;
    let mut parents: Vec<Option<Position>> = vec![None; grid.len()];

    while let Some(Reverse(current)) = pq.pop() {
        if current.coord == goal {
            // Backtrack through the parents to recover the path
            let mut path = vec![goal];
            let mut cursor = goal;
            while let Some(parent) = parents[grid.index_of(cursor)] {
                path.push(parent);
                cursor = parent;
            }
            path.reverse();
            return Some(path);
        }
        if current.traveling_cost > costs[grid.index_of(current.coord)] {
            // Stale queue entry
            continue;
        }

        let new_cost = current.traveling_cost + 1;
        let neighbors = grid
            .neighbors(current.coord)
            .filter(|&(d, n)| {
                grid.is_valid(n)
                    && (mode == PathMode::ThroughWalls || !grid[current.coord].has_wall(d))
            })
            .map(|(_, n)| n)
            .collect::<Vec<_>>();
        for next in neighbors {
            let idx = grid.index_of(next);
            if new_cost < costs[idx] {
                costs[idx] = new_cost;
                parents[idx] = Some(current.coord);
                pq.push(Reverse(TrackedCell {
                    coord: next,
                    traveling_cost: new_cost,
                    heuristic_cost: next.manhattan(goal),
                }));
            }
        }
    }

    None // No path found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, randomized_kruskal};

    #[test]
    fn test_through_walls_is_shortest() {
        let grid = Grid::new(5, 5, true);
        let path = find_path(&grid, Position::new(0, 0), Position::new(4, 4), PathMode::ThroughWalls).unwrap();
        assert_eq!(path.len(), 9);
        assert!(find_path(&grid, Position::new(0, 0), Position::new(4, 4), PathMode::OpenOnly).is_none());
    }

    #[test]
    fn test_open_only_follows_passages() {
        let grid = randomized_kruskal(8, 8, &mut get_rng(Some(5)));
        let path = find_path(&grid, Position::new(0, 0), Position::new(7, 7), PathMode::OpenOnly).unwrap();
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(7, 7)));
        assert!(path.windows(2).all(|w| !grid.is_wall_between(w[0], w[1])));
    }

    #[test]
    fn test_respects_mask() {
        let mut grid = Grid::new(1, 3, false);
        grid.set_mask(vec![true, false, true]);
        assert!(find_path(&grid, Position::new(0, 0), Position::new(0, 2), PathMode::ThroughWalls).is_none());
    }
}
