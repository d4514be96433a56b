pub mod animate;
pub mod astar;
mod dfs;

pub use animate::{AnimatedSearch, CancelToken, SearchOutcome, SearchState, SolveSession};
pub use dfs::depth_first_path;

use crate::error::{MazeError, Result};
use crate::frame::{Framing, circular::circular_neighbors};
use crate::maze::{Grid, Position};

/// How cells connect to their neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    #[default]
    Rectangular,
    /// East and west wrap around; north and south move between rings.
    Circular,
}

impl From<Framing> for Topology {
    fn from(framing: Framing) -> Self {
        match framing {
            Framing::Circular => Topology::Circular,
            _ => Topology::Rectangular,
        }
    }
}

/// Valid cells reachable from `pos` in one step through a cleared wall.
pub fn passable_neighbors(grid: &Grid, pos: Position, topology: Topology) -> Vec<Position> {
    match topology {
        Topology::Rectangular => grid.open_neighbors(pos).collect(),
        Topology::Circular => circular_neighbors(grid, pos)
            .into_iter()
            .filter(|&n| grid.is_valid(n))
            .collect(),
    }
}

/// Locates the entrance and exit cells of a finished grid.
pub fn endpoints(grid: &Grid) -> Result<(Position, Position)> {
    let entrance = grid.entrance().ok_or(MazeError::MissingEndpoint("entrance"))?;
    let exit = grid.exit().ok_or(MazeError::MissingEndpoint("exit"))?;
    Ok((entrance, exit))
}

/// Solves the maze in one pass and marks every cell of the path as part of
/// the solution. Walls are never touched.
pub fn solve_instant(grid: &mut Grid, topology: Topology) -> Result<Vec<Position>> {
    let (entrance, exit) = endpoints(grid)?;
    grid.clear_solution();
    let Some(path) = depth_first_path(grid, entrance, exit, topology) else {
        tracing::error!("[solve] no path from {} to {}", entrance, exit);
        return Err(MazeError::NoPath {
            from: entrance,
            to: exit,
        });
    };
    grid.mark_solution(&path);
    tracing::debug!("[solve] solution of {} cells", path.len());
    Ok(path)
}
