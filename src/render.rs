//! Terminal rendering of a grid as a block picture.
//!
//! Cell `(r, c)` is drawn at tile `(2r + 1, 2c + 1)`; the tiles between cells
//! show the walls, and every tile is two columns wide.

use std::{
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::{Direction, Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    /// Outside the playable shape.
    Outside,
    Entrance,
    Exit,
    Solution,
    /// Path currently held by an animated search.
    Trail,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "██".with(Color::White),
            Tile::Open => "  ".with(Color::Reset),
            Tile::Outside => "  ".with(Color::Reset),
            Tile::Entrance => "🟩".with(Color::Green),
            Tile::Exit => "🟥".with(Color::Red),
            Tile::Solution => "🟨".with(Color::Yellow),
            Tile::Trail => "* ".with(Color::Blue),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Lays out the grid as `(2 * rows + 1) x (2 * columns + 1)` tiles. `trail`
/// is drawn on top of any solution markers. Grids built through
/// [`generate`](crate::pipeline::generate) hold at most
/// [`MAX_CELLS`](crate::pipeline::MAX_CELLS) cells, which keeps the picture
/// size from overflowing.
pub fn tiles(grid: &Grid, trail: &[Position]) -> Vec<Vec<Tile>> {
    let height = 2 * grid.rows() + 1;
    let width = 2 * grid.columns() + 1;
    let mut tiles = vec![vec![Tile::Outside; width]; height];

    // Outside cells carry no walls, so either side of a gap can hold the wall
    let gap = |pos: Position, direction: Direction| -> Tile {
        let next = grid.step(pos, direction);
        if grid[pos].has_wall(direction) || next.is_some_and(|n| grid[n].has_wall(direction.opposite())) {
            Tile::Wall
        } else if grid.is_valid(pos) || next.is_some_and(|n| grid.is_valid(n)) {
            Tile::Open
        } else {
            Tile::Outside
        }
    };

    for pos in grid.positions() {
        let (y, x) = (2 * pos.row + 1, 2 * pos.col + 1);
        let cell = grid[pos];
        tiles[y][x] = if !grid.is_valid(pos) {
            Tile::Outside
        } else if cell.is_entrance {
            Tile::Entrance
        } else if cell.is_exit {
            Tile::Exit
        } else if cell.is_solution {
            Tile::Solution
        } else {
            Tile::Open
        };
        tiles[y][x + 1] = gap(pos, Direction::East);
        tiles[y + 1][x] = gap(pos, Direction::South);
        if pos.col == 0 {
            tiles[y][x - 1] = gap(pos, Direction::West);
        }
        if pos.row == 0 {
            tiles[y - 1][x] = gap(pos, Direction::North);
        }
    }

    // Solution strokes run through the open gap between consecutive cells
    let solution = grid
        .positions()
        .filter(|&p| grid[p].is_solution)
        .collect::<Vec<_>>();
    for pos in &solution {
        for direction in [Direction::East, Direction::South] {
            if let Some(next) = grid.step(*pos, direction)
                && grid[next].is_solution
                && !grid.is_wall_between(*pos, next)
            {
                tiles[pos.row + next.row + 1][pos.col + next.col + 1] = Tile::Solution;
            }
        }
    }
    for (i, pos) in trail.iter().enumerate() {
        let (y, x) = (2 * pos.row + 1, 2 * pos.col + 1);
        if !matches!(tiles[y][x], Tile::Entrance | Tile::Exit) {
            tiles[y][x] = Tile::Trail;
        }
        if let Some(next) = trail.get(i + 1)
            && pos.direction_to(*next).is_some()
        {
            tiles[pos.row + next.row + 1][pos.col + next.col + 1] = Tile::Trail;
        }
    }

    // A corner is solid when any wall meets it
    for y in (0..height).step_by(2) {
        for x in (0..width).step_by(2) {
            let around = [
                y.checked_sub(1).map(|y| (y, x)),
                Some((y + 1, x)),
                x.checked_sub(1).map(|x| (y, x)),
                Some((y, x + 1)),
            ]
            .into_iter()
            .flatten()
            .filter_map(|(ty, tx)| tiles.get(ty).and_then(|row| row.get(tx)).copied())
            .collect::<Vec<_>>();
            tiles[y][x] = if around.contains(&Tile::Wall) {
                Tile::Wall
            } else if around.iter().all(|&t| t == Tile::Outside) {
                Tile::Outside
            } else {
                Tile::Open
            };
        }
    }
    tiles
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
        }
    }

    /// Set a panic hook to restore terminal state on panic, even if the panic
    /// happens on the search thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = Renderer::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    pub fn setup_terminal(&mut self) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        Renderer::set_panic_hook();
        queue!(
            self.stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        self.stdout.flush()
    }

    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()
    }

    pub fn restore(&mut self) -> std::io::Result<()> {
        Renderer::restore_terminal(&mut self.stdout)
    }

    /// Whether the terminal can show the whole picture.
    pub fn fits_terminal(tiles: &[Vec<Tile>]) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let width = tiles.first().map_or(0, Vec::len);
        Ok(width * usize::from(Tile::WIDTH) <= usize::from(term_width) && tiles.len() < usize::from(term_height))
    }

    /// Redraws the picture from the top-left corner of a raw-mode screen,
    /// followed by a one-line status message.
    pub fn draw(&mut self, tiles: &[Vec<Tile>], status: &str) -> std::io::Result<()> {
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for row in tiles {
            for tile in row {
                self.stdout.queue(style::Print(tile))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        queue!(
            self.stdout,
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(status.with(Color::Blue).attribute(Attribute::Bold))
        )?;
        self.stdout.flush()
    }

    /// Prints the picture as plain lines to a cooked terminal.
    pub fn print(&mut self, tiles: &[Vec<Tile>]) -> std::io::Result<()> {
        for row in tiles {
            for tile in row {
                self.stdout.queue(style::Print(tile))?;
            }
            self.stdout.queue(style::Print("\n"))?;
        }
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_of_single_passage() {
        let mut grid = Grid::new(1, 2, true);
        grid.clear_wall_between(Position::new(0, 0), Position::new(0, 1));
        grid[Position::new(0, 0)].is_entrance = true;
        grid[Position::new(0, 0)].west = false;
        let tiles = tiles(&grid, &[]);
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0].len(), 5);
        assert_eq!(
            tiles[1],
            vec![Tile::Open, Tile::Entrance, Tile::Open, Tile::Open, Tile::Wall]
        );
        assert!(tiles[0].iter().all(|&t| t == Tile::Wall));
        assert!(tiles[2].iter().all(|&t| t == Tile::Wall));
    }

    #[test]
    fn test_solution_and_trail_markers() {
        let mut grid = Grid::new(2, 1, true);
        grid.clear_wall_between(Position::new(0, 0), Position::new(1, 0));
        grid.mark_solution(&[Position::new(0, 0), Position::new(1, 0)]);
        let solved = tiles(&grid, &[]);
        assert_eq!(solved[1][1], Tile::Solution);
        assert_eq!(solved[2][1], Tile::Solution);
        assert_eq!(solved[3][1], Tile::Solution);

        grid.clear_solution();
        let animated = tiles(&grid, &[Position::new(0, 0), Position::new(1, 0)]);
        assert_eq!(animated[2][1], Tile::Trail);
    }

    #[test]
    fn test_outside_cells_are_blank() {
        let mut grid = Grid::new(1, 3, true);
        grid.set_mask(vec![true, true, false]);
        grid.null_out(Position::new(0, 2));
        let tiles = tiles(&grid, &[]);
        assert_eq!(tiles[1][5], Tile::Outside);
        assert_eq!(tiles[1][6], Tile::Outside);
        assert_eq!(tiles[1][4], Tile::Wall);
    }

    #[test]
    fn test_tile_widths() {
        for tile in [
            Tile::Wall,
            Tile::Open,
            Tile::Outside,
            Tile::Entrance,
            Tile::Exit,
            Tile::Solution,
            Tile::Trail,
        ] {
            // Display asserts the width in debug builds
            assert!(!tile.to_string().is_empty());
        }
    }
}
