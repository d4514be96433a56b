use std::collections::BTreeMap;

use rand::{Rng, seq::SliceRandom};

use crate::maze::{Direction, Grid, Position};
use crate::settings::Percent;

/// Eller's algorithm: builds the maze one row at a time, tracking which cells
/// of the current row are already connected.
///
/// Adjacent cells of different sets merge with probability `horizontal_bias`
/// (always on the last row). Every set then opens at least one passage south so
/// it survives into the next row; each further member opens one with half of
/// `branching_probability`.
pub fn eller<R: Rng>(
    rows: usize,
    columns: usize,
    horizontal_bias: Percent,
    branching_probability: Percent,
    rng: &mut R,
) -> Grid {
    let mut grid = Grid::new(rows, columns, true);
    if grid.is_empty() {
        return grid;
    }
    let merge_probability = horizontal_bias.probability();
    let extra_down_probability = branching_probability.probability() / 2.0;

    let mut sets: Vec<usize> = (0..columns).collect();
    let mut next_set = columns;

    for row in 0..rows {
        let last_row = row + 1 == rows;

        for col in 0..columns - 1 {
            if sets[col] == sets[col + 1] {
                continue;
            }
            if last_row || rng.random_bool(merge_probability) {
                grid.clear_wall(Position::new(row, col), Direction::East);
                let (keep, merged) = (sets[col], sets[col + 1]);
                sets.iter_mut()
                    .filter(|s| **s == merged)
                    .for_each(|s| *s = keep);
            }
        }
        (0..columns).for_each(|col| grid[Position::new(row, col)].visited = true);

        if last_row {
            break;
        }

        // Group columns by set; BTreeMap keeps seeded runs reproducible
        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (col, &set) in sets.iter().enumerate() {
            members.entry(set).or_default().push(col);
        }

        let mut next_sets = vec![None; columns];
        for (set, mut cols) in members {
            cols.shuffle(rng);
            for (i, &col) in cols.iter().enumerate() {
                if i == 0 || rng.random_bool(extra_down_probability) {
                    grid.clear_wall(Position::new(row, col), Direction::South);
                    next_sets[col] = Some(set);
                }
            }
        }
        sets = next_sets
            .into_iter()
            .map(|set| {
                set.unwrap_or_else(|| {
                    next_set += 1;
                    next_set - 1
                })
            })
            .collect();
    }
    grid
}
