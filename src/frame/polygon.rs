//! Regular-polygon framing.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::{Rng, seq::IndexedRandom};

use crate::error::{MazeError, Result};
use crate::frame::edge_cells;
use crate::maze::{Direction, Grid, Position};
use crate::settings::EndpointPolicy;
use crate::solvers::astar::{PathMode, find_path};

/// A point in cell units: `x` grows with columns, `y` with rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn cell_center(pos: Position) -> Self {
        Point {
            x: pos.col as f64 + 0.5,
            y: pos.row as f64 + 0.5,
        }
    }
}

/// Vertices of a regular polygon centered in the grid, inscribed at 0.8 of
/// the smaller half-extent, first vertex at the top.
pub fn polygon_vertices(sides: usize, rows: usize, columns: usize) -> Vec<Point> {
    let cx = columns as f64 / 2.0;
    let cy = rows as f64 / 2.0;
    let radius = cx.min(cy) * 0.8;
    (0..sides)
        .map(|i| {
            let angle = -FRAC_PI_2 + TAU * i as f64 / sides as f64;
            Point {
                x: cx + radius * angle.cos(),
                y: cy + radius * angle.sin(),
            }
        })
        .collect()
}

/// Even-odd ray casting test.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let mut inside = false;
    let mut j = vertices.len().wrapping_sub(1);
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// One flag per cell, true when the cell center lies inside the polygon.
pub fn polygon_mask(sides: usize, rows: usize, columns: usize) -> Result<Vec<bool>> {
    if sides < 3 {
        return Err(MazeError::InvalidParameter {
            name: "sides",
            value: sides.to_string(),
        });
    }
    let vertices = polygon_vertices(sides, rows, columns);
    Ok((0..rows)
        .flat_map(|row| (0..columns).map(move |col| Position::new(row, col)))
        .map(|pos| point_in_polygon(Point::cell_center(pos), &vertices))
        .collect())
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (nx, ny) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    (nx * nx + ny * ny).sqrt()
}

/// Picks the wall to open on an edge cell: the open side (toward the outside)
/// best aligned with the outward normal of the nearest polygon side.
pub fn outward_direction(grid: &Grid, pos: Position, vertices: &[Point]) -> Option<Direction> {
    let center = Point {
        x: grid.columns() as f64 / 2.0,
        y: grid.rows() as f64 / 2.0,
    };
    let p = Point::cell_center(pos);
    let (a, b) = (0..vertices.len())
        .map(|i| (vertices[i], vertices[(i + 1) % vertices.len()]))
        .min_by(|&(a1, b1), &(a2, b2)| {
            distance_to_segment(p, a1, b1).total_cmp(&distance_to_segment(p, a2, b2))
        })?;
    let normal = ((a.x + b.x) / 2.0 - center.x, (a.y + b.y) / 2.0 - center.y);

    Direction::ALL
        .into_iter()
        .filter(|&d| grid.step(pos, d).is_none_or(|n| !grid.is_valid(n)))
        .max_by(|&d1, &d2| {
            let score = |d: Direction| {
                let (dr, dc) = d.offset();
                dc as f64 * normal.0 + dr as f64 * normal.1
            };
            score(d1).total_cmp(&score(d2))
        })
}

/// The edge cell lying farthest toward `direction`, ties broken at random.
fn extreme_edge_cell<R: Rng>(
    edges: &[Position],
    direction: Direction,
    rng: &mut R,
) -> Option<Position> {
    let key = |p: &Position| -> isize {
        match direction {
            Direction::North => -(p.row as isize),
            Direction::South => p.row as isize,
            Direction::West => -(p.col as isize),
            Direction::East => p.col as isize,
        }
    };
    let best = edges.iter().map(key).max()?;
    let candidates = edges
        .iter()
        .copied()
        .filter(|p| key(p) == best)
        .collect::<Vec<_>>();
    candidates.choose(rng).copied()
}

fn pick_edge_cell<R: Rng>(
    edges: &[Position],
    policy: EndpointPolicy,
    entrance: Option<Position>,
    rng: &mut R,
) -> Option<Position> {
    match policy {
        EndpointPolicy::Side(direction) => extreme_edge_cell(edges, direction, rng),
        EndpointPolicy::Random => {
            let direction = *Direction::ALL.choose(rng)?;
            extreme_edge_cell(edges, direction, rng)
        }
        EndpointPolicy::Farthest => {
            let from = entrance?;
            edges.iter().copied().max_by_key(|p| p.manhattan(from))
        }
    }
}

/// Chooses entrance and exit among the shape's edge cells, opens their
/// outward walls, then makes sure the exit is reachable from the entrance.
///
/// Returns whether a repair path had to be carved.
pub fn place_polygon_endpoints<R: Rng>(
    grid: &mut Grid,
    sides: usize,
    entrance_policy: EndpointPolicy,
    exit_policy: EndpointPolicy,
    rng: &mut R,
) -> Result<bool> {
    let vertices = polygon_vertices(sides, grid.rows(), grid.columns());
    let edges = edge_cells(grid);

    let entrance = pick_edge_cell(&edges, entrance_policy, None, rng)
        .ok_or(MazeError::MissingEndpoint("entrance"))?;
    let remaining = edges
        .iter()
        .copied()
        .filter(|&p| p != entrance)
        .collect::<Vec<_>>();
    let exit = pick_edge_cell(&remaining, exit_policy, Some(entrance), rng)
        .ok_or(MazeError::MissingEndpoint("exit"))?;

    for (pos, is_entrance) in [(entrance, true), (exit, false)] {
        if let Some(direction) = outward_direction(grid, pos, &vertices) {
            grid.clear_wall(pos, direction);
        }
        if is_entrance {
            grid[pos].is_entrance = true;
        } else {
            grid[pos].is_exit = true;
        }
    }
    tracing::debug!("[frame] polygon entrance {} exit {}", entrance, exit);

    ensure_connected(grid, entrance, exit)
}

/// Verifies that `exit` is reachable from `entrance` and, if not, carves every
/// wall along an A* path through valid cells. Returns whether carving happened.
pub fn ensure_connected(grid: &mut Grid, entrance: Position, exit: Position) -> Result<bool> {
    if grid.is_reachable(entrance, exit) {
        return Ok(false);
    }
    let path = find_path(grid, entrance, exit, PathMode::ThroughWalls).ok_or_else(|| {
        tracing::error!("[frame] valid region does not link {} and {}", entrance, exit);
        MazeError::NoPath {
            from: entrance,
            to: exit,
        }
    })?;
    for pair in path.windows(2) {
        grid.clear_wall_between(pair[0], pair[1]);
    }
    tracing::debug!("[frame] repaired connectivity with a {}-cell path", path.len());
    Ok(true)
}
