//! Fits a rectangular maze to circular, polygonal and text-shaped frames.

pub mod circular;
mod font;
pub mod polygon;
pub mod text;

use rand::{Rng, seq::SliceRandom};

use crate::maze::{Direction, Grid, Position, UnionFind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Framing {
    #[default]
    Square,
    Circular,
    Polygon,
    Text,
}

impl std::fmt::Display for Framing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Framing::Square => write!(f, "square"),
            Framing::Circular => write!(f, "circular"),
            Framing::Polygon => write!(f, "polygon"),
            Framing::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" | "rectangle" | "rectangular" => Ok(Framing::Square),
            "circle" | "circular" => Ok(Framing::Circular),
            "polygon" => Ok(Framing::Polygon),
            "text" => Ok(Framing::Text),
            _ => Err(format!("unknown framing `{s}`")),
        }
    }
}

/// Installs `mask` on the grid and turns every cell outside it into an
/// outside marker.
pub fn apply_mask(grid: &mut Grid, mask: Vec<bool>) {
    grid.set_mask(mask);
    for pos in grid.positions() {
        if !grid.is_valid(pos) {
            grid.null_out(pos);
        }
    }
}

/// Valid cells with at least one neighbor outside the shape or outside the rectangle.
pub fn edge_cells(grid: &Grid) -> Vec<Position> {
    grid.valid_positions()
        .filter(|&p| {
            Direction::ALL
                .into_iter()
                .any(|d| grid.step(p, d).is_none_or(|n| !grid.is_valid(n)))
        })
        .collect()
}

/// Joins every valid component to the rest by opening one wall between
/// adjacent valid cells of different components. Returns the number of
/// walls opened.
pub fn join_components<R: Rng>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut uf = UnionFind::new(grid.len());
    let mut candidates = Vec::new();
    for pos in grid.valid_positions().collect::<Vec<_>>() {
        for direction in [Direction::East, Direction::South] {
            let Some(next) = grid.step(pos, direction).filter(|&n| grid.is_valid(n)) else {
                continue;
            };
            if grid[pos].has_wall(direction) {
                candidates.push((pos, direction, next));
            } else {
                uf.unite(grid.index_of(pos), grid.index_of(next));
            }
        }
    }

    candidates.shuffle(rng);
    let mut opened = 0;
    for (pos, direction, next) in candidates {
        if uf.unite(grid.index_of(pos), grid.index_of(next)) {
            grid.clear_wall(pos, direction);
            opened += 1;
        }
    }
    if opened > 0 {
        tracing::debug!("[frame] joined stray components with {} passages", opened);
    }
    opened
}
