//! Request-to-maze orchestration.
//!
//! A request is validated up front, then the grid is carved, fitted to its
//! framing, mirrored and given an entrance and exit. A failed run never hands
//! back a partially built grid.

use rand::Rng;

use crate::error::{MazeError, Result};
use crate::finishing::{apply_symmetry, place_endpoints};
use crate::frame::{
    Framing, apply_mask, circular::circular_maze, join_components, polygon, text::text_maze,
};
use crate::generators::{Generator, generate_grid, get_rng};
use crate::maze::{Grid, Position};
use crate::settings::{FrameParams, MazeSettings, Symmetry};
use crate::solvers::{Topology, solve_instant};

/// Largest number of cells a request may ask for. Keeps the grid and its
/// `(2 * rows + 1) x (2 * columns + 1)` tile picture addressable.
pub const MAX_CELLS: usize = 1 << 22;

/// Everything needed to build one maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeRequest {
    pub framing: Framing,
    pub generator: Generator,
    pub settings: MazeSettings,
    pub frame: FrameParams,
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for MazeRequest {
    fn default() -> Self {
        MazeRequest {
            framing: Framing::Square,
            generator: Generator::RecurBacktrack,
            settings: MazeSettings::default(),
            frame: FrameParams::default(),
            seed: None,
        }
    }
}

impl MazeRequest {
    /// Rejects configurations that cannot produce a grid.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        let FrameParams { rows, columns, .. } = self.frame;
        match self.framing {
            Framing::Square | Framing::Polygon if rows == 0 || columns == 0 => {
                return Err(MazeError::InvalidDimensions { rows, columns });
            }
            Framing::Circular if rows < 2 || columns < 2 => {
                return Err(MazeError::InvalidDimensions { rows, columns });
            }
            Framing::Polygon if self.frame.sides < 3 => {
                return Err(MazeError::InvalidParameter {
                    name: "sides",
                    value: self.frame.sides.to_string(),
                });
            }
            Framing::Text if self.frame.glyph_height == 0 => {
                return Err(MazeError::InvalidParameter {
                    name: "glyph_height",
                    value: "0".to_string(),
                });
            }
            Framing::Text if self.frame.text.trim().is_empty() => {
                return Err(MazeError::EmptyShape(Framing::Text));
            }
            _ => {}
        }
        let cells = match self.framing {
            // Each glyph is roughly as wide as it is tall
            Framing::Text => self
                .frame
                .glyph_height
                .checked_mul(self.frame.glyph_height)
                .and_then(|area| area.checked_mul(self.frame.text.chars().count())),
            _ => rows.checked_mul(columns),
        };
        if cells.is_none_or(|cells| cells > MAX_CELLS) {
            return Err(match self.framing {
                Framing::Text => MazeError::InvalidParameter {
                    name: "glyph_height",
                    value: self.frame.glyph_height.to_string(),
                },
                _ => MazeError::InvalidDimensions { rows, columns },
            });
        }
        if matches!(self.framing, Framing::Circular | Framing::Text)
            && self.settings.symmetry != Symmetry::None
        {
            return Err(MazeError::UnsupportedCombination {
                framing: self.framing,
                option: format!("{:?} symmetry", self.settings.symmetry).to_lowercase(),
            });
        }
        Ok(())
    }
}

/// A finished maze and the display state of its solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    grid: Grid,
    framing: Framing,
    solution: Option<Vec<Position>>,
}

impl Maze {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn topology(&self) -> Topology {
        Topology::from(self.framing)
    }

    /// The solution path, if the maze has been solved.
    pub fn solution(&self) -> Option<&[Position]> {
        self.solution.as_deref()
    }

    pub fn is_solution_shown(&self) -> bool {
        self.solution.is_some()
    }

    /// Solves the maze and marks the path on the grid.
    pub fn show_solution(&mut self) -> Result<&[Position]> {
        let topology = self.topology();
        let path = match self.solution.take() {
            Some(path) => path,
            None => solve_instant(&mut self.grid, topology)?,
        };
        Ok(self.solution.insert(path).as_slice())
    }

    /// Removes the solution markers. Walls are left untouched.
    pub fn hide_solution(&mut self) {
        self.grid.clear_solution();
        self.solution = None;
    }

    /// Toggles the solution display and returns whether it is now shown.
    pub fn toggle_solution(&mut self) -> Result<bool> {
        if self.is_solution_shown() {
            self.hide_solution();
            Ok(false)
        } else {
            self.show_solution()?;
            Ok(true)
        }
    }
}

/// Builds a maze from `request`.
pub fn generate(request: &MazeRequest) -> Result<Maze> {
    request.validate()?;
    let mut rng = get_rng(request.seed);
    let grid = match request.framing {
        Framing::Square => square_maze(request, &mut rng),
        Framing::Polygon => polygon_maze(request, &mut rng)?,
        Framing::Circular => circular_maze(
            request.generator,
            request.frame.rows,
            request.frame.columns,
            &request.settings,
            &mut rng,
        )?,
        Framing::Text => text_maze(&request.frame.text, request.frame.glyph_height)?,
    };
    tracing::info!(
        "[pipeline] {} {} maze ({}x{}, {} playable cells)",
        request.framing,
        request.generator,
        grid.rows(),
        grid.columns(),
        grid.valid_count()
    );
    Ok(Maze {
        grid,
        framing: request.framing,
        solution: None,
    })
}

fn square_maze<R: Rng>(request: &MazeRequest, rng: &mut R) -> Grid {
    let settings = &request.settings;
    let grid = generate_grid(
        request.generator,
        request.frame.rows,
        request.frame.columns,
        settings,
        rng,
    );
    let mut grid = apply_symmetry(&grid, settings.symmetry);
    if let Err(e) = place_endpoints(&mut grid, settings.entrance, settings.exit, rng) {
        tracing::warn!("[pipeline] maze left without entrance and exit: {}", e);
    }
    grid
}

fn polygon_maze<R: Rng>(request: &MazeRequest, rng: &mut R) -> Result<Grid> {
    let FrameParams {
        rows,
        columns,
        sides,
        ..
    } = request.frame;
    let settings = &request.settings;

    let mask = polygon::polygon_mask(sides, rows, columns)?;
    if !mask.iter().any(|&inside| inside) {
        return Err(MazeError::EmptyShape(Framing::Polygon));
    }
    let mut grid = generate_grid(request.generator, rows, columns, settings, rng);
    apply_mask(&mut grid, mask);
    let mut grid = apply_symmetry(&grid, settings.symmetry);

    match polygon::place_polygon_endpoints(&mut grid, sides, settings.entrance, settings.exit, rng) {
        Ok(repaired) => {
            if repaired {
                tracing::debug!("[pipeline] polygon entrance and exit needed a repair path");
            }
        }
        Err(e @ MazeError::MissingEndpoint(_)) => {
            tracing::warn!("[pipeline] polygon maze left without entrance and exit: {}", e);
        }
        Err(e) => return Err(e),
    }
    join_components(&mut grid, rng);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;
    use crate::settings::EndpointPolicy;

    fn request(framing: Framing) -> MazeRequest {
        MazeRequest {
            framing,
            seed: Some(17),
            frame: FrameParams {
                rows: 12,
                columns: 12,
                text: "Hi".to_string(),
                ..FrameParams::default()
            },
            ..MazeRequest::default()
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut req = request(Framing::Square);
        req.frame.rows = 0;
        assert_eq!(
            generate(&req),
            Err(MazeError::InvalidDimensions {
                rows: 0,
                columns: 12
            })
        );
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let mut req = request(Framing::Square);
        req.frame.rows = usize::MAX / 2;
        req.frame.columns = 4;
        assert_eq!(
            generate(&req),
            Err(MazeError::InvalidDimensions {
                rows: usize::MAX / 2,
                columns: 4
            })
        );

        for framing in [Framing::Circular, Framing::Polygon] {
            let mut req = request(framing);
            req.frame.rows = MAX_CELLS;
            req.frame.columns = 2;
            assert!(matches!(
                generate(&req),
                Err(MazeError::InvalidDimensions { .. })
            ));
        }

        let mut req = request(Framing::Text);
        req.frame.glyph_height = usize::MAX / 4;
        assert!(matches!(
            generate(&req),
            Err(MazeError::InvalidParameter {
                name: "glyph_height",
                ..
            })
        ));
    }

    #[test]
    fn test_symmetry_not_supported_with_circular() {
        let mut req = request(Framing::Circular);
        req.settings.symmetry = Symmetry::Both;
        assert!(matches!(
            generate(&req),
            Err(MazeError::UnsupportedCombination {
                framing: Framing::Circular,
                ..
            })
        ));
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut req = request(Framing::Text);
        req.frame.text = "  ".to_string();
        assert_eq!(generate(&req), Err(MazeError::EmptyShape(Framing::Text)));
    }

    #[test]
    fn test_every_framing_produces_solvable_maze() {
        for framing in [Framing::Square, Framing::Circular, Framing::Polygon, Framing::Text] {
            let mut maze = generate(&request(framing)).unwrap();
            assert!(maze.grid().entrance().is_some(), "{framing}");
            assert!(maze.grid().exit().is_some(), "{framing}");
            let path = maze.show_solution().unwrap().to_vec();
            assert!(path.len() >= 2, "{framing}");
            assert!(maze.is_solution_shown());
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let req = request(Framing::Polygon);
        assert_eq!(generate(&req), generate(&req));
    }

    #[test]
    fn test_toggle_solution_leaves_walls() {
        let mut req = request(Framing::Square);
        req.settings.entrance = EndpointPolicy::Side(Direction::North);
        req.settings.exit = EndpointPolicy::Farthest;
        let mut maze = generate(&req).unwrap();
        let before = maze.grid().clone();
        assert_eq!(maze.toggle_solution(), Ok(true));
        assert!(maze.grid().positions().any(|p| maze.grid()[p].is_solution));
        assert_eq!(maze.toggle_solution(), Ok(false));
        assert_eq!(maze.grid(), &before);
        assert!(maze.solution().is_none());
    }
}
