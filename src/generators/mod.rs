use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

mod aldous_broder;
mod binary_tree;
mod eller;
mod hunt_and_kill;
mod kruskal;
mod prim;
mod recur_backtrack;
mod recur_div;
mod sidewinder;
mod wilson;

pub use aldous_broder::aldous_broder;
pub use binary_tree::binary_tree;
pub use eller::eller;
pub use hunt_and_kill::hunt_and_kill;
pub use kruskal::randomized_kruskal;
pub use prim::randomized_prim;
pub use recur_backtrack::recursive_backtrack;
pub use recur_div::recursive_division;
pub use sidewinder::sidewinder;
pub use wilson::wilson;

use crate::frame::join_components;
use crate::maze::{Grid, Position};
use crate::settings::{MazeSettings, Percent};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    BinaryTree,
    Sidewinder,
    RecurBacktrack,
    Prim,
    RecurDiv,
    HuntAndKill,
    Eller,
    Kruskal,
    Wilson,
    AldousBroder,
}

impl Generator {
    pub const ALL: [Generator; 10] = [
        Generator::BinaryTree,
        Generator::Sidewinder,
        Generator::RecurBacktrack,
        Generator::Prim,
        Generator::RecurDiv,
        Generator::HuntAndKill,
        Generator::Eller,
        Generator::Kruskal,
        Generator::Wilson,
        Generator::AldousBroder,
    ];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Sidewinder => write!(f, "Sidewinder"),
            Generator::RecurBacktrack => write!(f, "Recursive Backtracker"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::RecurDiv => write!(f, "Recursive Division"),
            Generator::HuntAndKill => write!(f, "Hunt-and-Kill"),
            Generator::Eller => write!(f, "Eller's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Wilson => write!(f, "Wilson's Algorithm"),
            Generator::AldousBroder => write!(f, "Aldous-Broder"),
        }
    }
}

impl std::str::FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let generator = match s.to_ascii_lowercase().replace(['-', '_', ' ', '\''], "").as_str() {
            "binarytree" => Generator::BinaryTree,
            "sidewinder" => Generator::Sidewinder,
            "backtracker" | "recursivebacktracker" | "dfs" => Generator::RecurBacktrack,
            "prim" | "prims" => Generator::Prim,
            "division" | "recursivedivision" => Generator::RecurDiv,
            "huntandkill" => Generator::HuntAndKill,
            "eller" | "ellers" => Generator::Eller,
            "kruskal" | "kruskals" => Generator::Kruskal,
            "wilson" | "wilsons" => Generator::Wilson,
            "aldousbroder" => Generator::AldousBroder,
            _ => return Err(format!("unknown algorithm `{s}`")),
        };
        Ok(generator)
    }
}

/// Carves a fresh `rows` x `columns` grid with the selected algorithm.
/// Every cell's `visited` flag is reset afterwards.
pub fn generate_grid<R: Rng>(
    generator: Generator,
    rows: usize,
    columns: usize,
    settings: &MazeSettings,
    rng: &mut R,
) -> Grid {
    tracing::debug!("[generate] {} on {}x{}", generator, rows, columns);
    let mut grid = match generator {
        Generator::BinaryTree => binary_tree(rows, columns, settings.horizontal_bias, rng),
        Generator::Sidewinder => sidewinder(
            rows,
            columns,
            settings.horizontal_bias,
            settings.branching_probability,
            rng,
        ),
        Generator::RecurBacktrack => recursive_backtrack(
            rows,
            columns,
            settings.branching_probability,
            settings.dead_end_density,
            rng,
        ),
        Generator::Prim => randomized_prim(rows, columns, settings.branching_probability, rng),
        Generator::RecurDiv => recursive_division(rows, columns, settings.horizontal_bias, rng),
        Generator::HuntAndKill => hunt_and_kill(rows, columns, settings.dead_end_density, rng),
        Generator::Eller => eller(
            rows,
            columns,
            settings.horizontal_bias,
            settings.branching_probability,
            rng,
        ),
        Generator::Kruskal => randomized_kruskal(rows, columns, rng),
        Generator::Wilson => wilson(rows, columns, rng),
        Generator::AldousBroder => aldous_broder(rows, columns, rng),
    };
    // Low branching can strand whole regions; link them back in
    let joined = join_components(&mut grid, rng);
    if joined > 0 {
        tracing::debug!("[generate] {} left {} stranded regions", generator, joined);
    }
    grid.reset_visited();
    grid
}

fn random_position<R: Rng>(grid: &Grid, rng: &mut R) -> Position {
    Position::new(
        rng.random_range(0..grid.rows()),
        rng.random_range(0..grid.columns()),
    )
}

/// Picks a random in-bounds neighbor of `pos`, if it has any.
fn random_neighbor<R: Rng>(grid: &Grid, pos: Position, rng: &mut R) -> Option<Position> {
    let neighbors = grid.neighbors(pos).map(|(_, n)| n).collect::<Vec<_>>();
    neighbors.choose(rng).copied()
}

/// Converts dead ends (three walls standing) into corridors by opening one
/// more wall. Each dead end is kept with probability `dead_end_density`.
fn reduce_dead_ends<R: Rng>(grid: &mut Grid, dead_end_density: Percent, rng: &mut R) {
    let reopen = 1.0 - dead_end_density.probability();
    if reopen <= 0.0 {
        return;
    }
    for pos in grid.positions() {
        if grid[pos].wall_count() != 3 || !rng.random_bool(reopen) {
            continue;
        }
        let walled = grid
            .neighbors(pos)
            .filter(|&(d, _)| grid[pos].has_wall(d))
            .map(|(d, _)| d)
            .collect::<Vec<_>>();
        if let Some(&direction) = walled.choose(rng) {
            grid.clear_wall(pos, direction);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::maze::Grid;

    /// Asserts the grid is a spanning tree: consistent walls, connected, no cycles.
    pub fn assert_perfect(grid: &Grid) {
        assert!(grid.wall_symmetry_holds(), "wall symmetry violated");
        assert!(grid.is_fully_connected(), "grid is not connected");
        assert_eq!(
            grid.open_pairs(),
            grid.valid_count() - 1,
            "a spanning tree has exactly cells - 1 passages"
        );
    }
}
