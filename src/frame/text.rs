//! Text framing: the maze is the shape of a rasterized string.

use std::collections::VecDeque;

use crate::error::{MazeError, Result};
use crate::frame::font::{GLYPH_ROWS, glyph, glyph_width};
use crate::frame::{Framing, apply_mask};
use crate::maze::{Direction, Grid, Position};

/// Blank cells kept around the text on every side.
const PADDING: usize = 1;

/// A boolean pixel raster of a string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMask {
    pub rows: usize,
    pub columns: usize,
    pub pixels: Vec<bool>,
}

impl TextMask {
    fn new(rows: usize, columns: usize) -> Self {
        TextMask {
            rows,
            columns,
            pixels: vec![false; rows * columns],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns && self.pixels[row * self.columns + col]
    }

    fn set(&mut self, row: usize, col: usize) {
        self.pixels[row * self.columns + col] = true;
    }

    pub fn is_blank(&self) -> bool {
        !self.pixels.iter().any(|&p| p)
    }

    /// 4-connected groups of ink pixels.
    fn components(&self) -> Vec<Vec<Position>> {
        let mut seen = vec![false; self.pixels.len()];
        let mut components = Vec::new();
        for start in 0..self.pixels.len() {
            if !self.pixels[start] || seen[start] {
                continue;
            }
            seen[start] = true;
            let mut queue = VecDeque::from([start]);
            let mut component = Vec::new();
            while let Some(idx) = queue.pop_front() {
                let (row, col) = (idx / self.columns, idx % self.columns);
                component.push(Position::new(row, col));
                let neighbors = [
                    (row.wrapping_sub(1), col),
                    (row + 1, col),
                    (row, col.wrapping_sub(1)),
                    (row, col + 1),
                ];
                for (r, c) in neighbors {
                    if self.get(r, c) && !seen[r * self.columns + c] {
                        seen[r * self.columns + c] = true;
                        queue.push_back(r * self.columns + c);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Links separate glyph pieces left to right with an L-shaped stroke so
    /// the whole string forms one shape.
    fn bridge_components(&mut self) {
        let mut components = self.components();
        components.sort_by_key(|c| c.iter().map(|p| p.col).min());
        for pair in components.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let mid = self.rows / 2;
            let Some(from) = left
                .iter()
                .max_by_key(|p| (p.col, std::cmp::Reverse(p.row.abs_diff(mid))))
            else {
                continue;
            };
            let Some(to) = right
                .iter()
                .min_by_key(|p| (p.col, p.row.abs_diff(from.row)))
            else {
                continue;
            };
            for col in from.col.min(to.col)..=from.col.max(to.col) {
                self.set(from.row, col);
            }
            for row in from.row.min(to.row)..=from.row.max(to.row) {
                self.set(row, to.col);
            }
        }
    }
}

/// Rasterizes `text` with the embedded font scaled to `glyph_height` cells.
/// Widths scale proportionally, strokes are thickened by one column and glyphs
/// are separated by a gap that grows with the scale.
pub fn rasterize_text(text: &str, glyph_height: usize) -> TextMask {
    let glyph_height = glyph_height.max(1);
    let gap = (glyph_height / GLYPH_ROWS).max(1);

    // Scale each glyph and embolden it into its own column strips
    let mut strips: Vec<Vec<Vec<bool>>> = Vec::new();
    for c in text.chars() {
        let rows = glyph(c);
        let width = glyph_width(rows);
        let scaled_width = (width * glyph_height).div_ceil(GLYPH_ROWS).max(1);
        let mut columns = vec![vec![false; glyph_height]; scaled_width + 1];
        for out_row in 0..glyph_height {
            let src_row = out_row * GLYPH_ROWS / glyph_height;
            let bytes = rows[src_row].as_bytes();
            let inked = (0..scaled_width).filter(|&c| bytes[c * width / scaled_width] == b'#');
            for out_col in inked {
                // Bold: ink spills one column to the right
                for column in &mut columns[out_col..=out_col + 1] {
                    column[out_row] = true;
                }
            }
        }
        strips.push(columns);
    }

    let text_width = strips.iter().map(Vec::len).sum::<usize>() + gap * strips.len().saturating_sub(1);
    let mut mask = TextMask::new(glyph_height + 2 * PADDING, text_width + 2 * PADDING);
    let mut x = PADDING;
    for columns in &strips {
        for (dx, column) in columns.iter().enumerate() {
            for (row, &ink) in column.iter().enumerate() {
                if ink {
                    mask.set(row + PADDING, x + dx);
                }
            }
        }
        x += columns.len() + gap;
    }

    mask.bridge_components();
    mask
}

/// Nearest ink row to mid-height in `col`, scanning outward.
fn nearest_ink_row(mask: &TextMask, col: usize) -> Option<usize> {
    let mid = mask.rows / 2;
    (0..mask.rows).find_map(|offset| {
        [mid.checked_sub(offset), Some(mid + offset)]
            .into_iter()
            .flatten()
            .find(|&row| mask.get(row, col))
    })
}

/// Builds the text-shaped grid: every wall between adjacent ink cells is
/// cleared, the entrance opens west on the first ink column and the exit opens
/// east on the last one.
pub fn text_maze(text: &str, glyph_height: usize) -> Result<Grid> {
    let mask = rasterize_text(text, glyph_height);
    if mask.is_blank() {
        return Err(MazeError::EmptyShape(Framing::Text));
    }

    let mut grid = Grid::new(mask.rows, mask.columns, true);
    apply_mask(&mut grid, mask.pixels.clone());
    for pos in grid.valid_positions().collect::<Vec<_>>() {
        for direction in [Direction::East, Direction::South] {
            if grid.step(pos, direction).is_some_and(|n| grid.is_valid(n)) {
                grid.clear_wall(pos, direction);
            }
        }
    }

    let ink_columns = (0..mask.columns)
        .filter(|&c| (0..mask.rows).any(|r| mask.get(r, c)))
        .collect::<Vec<_>>();
    let (Some(&first), Some(&last)) = (ink_columns.first(), ink_columns.last()) else {
        return Err(MazeError::EmptyShape(Framing::Text));
    };

    let entrance_row = nearest_ink_row(&mask, first).ok_or(MazeError::MissingEndpoint("entrance"))?;
    let exit_row = nearest_ink_row(&mask, last).ok_or(MazeError::MissingEndpoint("exit"))?;
    let entrance = Position::new(entrance_row, first);
    let exit = Position::new(exit_row, last);

    grid[entrance].set_wall(Direction::West, false);
    grid[entrance].is_entrance = true;
    grid[exit].set_wall(Direction::East, false);
    grid[exit].is_exit = true;
    tracing::debug!(
        "[frame] text {:?} on {}x{}, entrance {} exit {}",
        text,
        grid.rows(),
        grid.columns(),
        entrance,
        exit
    );
    Ok(grid)
}
