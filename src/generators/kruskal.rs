use rand::{Rng, seq::SliceRandom};

use crate::maze::{Direction, Grid, Position, UnionFind};

/// Wall edge between two adjacent cells
#[derive(Clone, Copy)]
struct Edge {
    cell: Position,
    direction: Direction,
}

/// Randomized Kruskal's algorithm: process every interior wall in random order
/// and carve it when its two sides are not yet connected.
pub fn randomized_kruskal<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    if grid.is_empty() {
        return grid;
    }

    // Initialize Union-Find for all cells
    let mut uf = UnionFind::new(grid.len());

    // Collect all possible edges (walls between adjacent cells)
    let mut edges: Vec<Edge> = grid
        .positions()
        .flat_map(|cell| {
            [Direction::East, Direction::South]
                .into_iter()
                .map(move |direction| Edge { cell, direction })
        })
        .filter(|edge| grid.step(edge.cell, edge.direction).is_some())
        .collect();

    // Shuffle edges randomly
    edges.shuffle(rng);

    let mut carved = 0;
    for Edge { cell, direction } in edges {
        let Some(other) = grid.step(cell, direction) else {
            continue;
        };
        // If cells are not yet connected, remove the wall between them
        if uf.unite(grid.index_of(cell), grid.index_of(other)) {
            grid.clear_wall(cell, direction);
            grid[cell].visited = true;
            grid[other].visited = true;
            carved += 1;
        }
    }
    tracing::trace!("[generate] kruskal carved {} walls", carved);
    grid
}
