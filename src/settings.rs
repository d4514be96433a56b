//! Generation and framing parameters.

use crate::error::{MazeError, Result};
use crate::maze::Direction;

/// A 0 to 100 percentage used for tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const HALF: Percent = Percent(50);
    pub const FULL: Percent = Percent(100);

    /// Builds a percentage, clamping anything above 100.
    pub fn new(value: u8) -> Self {
        Percent(value.min(100))
    }

    /// Builds a percentage, rejecting anything above 100.
    pub fn checked(name: &'static str, value: u32) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|&v| v <= 100)
            .map(Percent)
            .ok_or(MazeError::InvalidParameter {
                name,
                value: value.to_string(),
            })
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The percentage normalized to a probability in `[0, 1]`.
    pub fn probability(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::HALF
    }
}

/// Where to place the entrance or the exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointPolicy {
    Side(Direction),
    /// One of the four sides, uniformly.
    Random,
    /// The cell farthest from the entrance by Manhattan distance. Exit only.
    Farthest,
}

impl std::str::FromStr for EndpointPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let policy = match s.to_ascii_lowercase().as_str() {
            "north" | "top" => EndpointPolicy::Side(Direction::North),
            "south" | "bottom" => EndpointPolicy::Side(Direction::South),
            "east" | "right" => EndpointPolicy::Side(Direction::East),
            "west" | "left" => EndpointPolicy::Side(Direction::West),
            "random" => EndpointPolicy::Random,
            "farthest" => EndpointPolicy::Farthest,
            _ => return Err(format!("unknown position `{s}`")),
        };
        Ok(policy)
    }
}

/// Mirroring applied to the finished grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symmetry {
    #[default]
    None,
    /// Mirror across the horizontal midline (rows reversed).
    Horizontal,
    /// Mirror across the vertical midline (columns reversed).
    Vertical,
    Both,
}

impl std::str::FromStr for Symmetry {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Symmetry::None),
            "horizontal" => Ok(Symmetry::Horizontal),
            "vertical" => Ok(Symmetry::Vertical),
            "both" => Ok(Symmetry::Both),
            _ => Err(format!("unknown symmetry `{s}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MazeSettings {
    pub horizontal_bias: Percent,
    pub branching_probability: Percent,
    pub dead_end_density: Percent,
    pub entrance: EndpointPolicy,
    pub exit: EndpointPolicy,
    pub symmetry: Symmetry,
}

impl Default for MazeSettings {
    fn default() -> Self {
        MazeSettings {
            horizontal_bias: Percent::HALF,
            branching_probability: Percent::FULL,
            dead_end_density: Percent::FULL,
            entrance: EndpointPolicy::Side(Direction::West),
            exit: EndpointPolicy::Side(Direction::East),
            symmetry: Symmetry::None,
        }
    }
}

impl MazeSettings {
    pub fn validate(&self) -> Result<()> {
        if self.entrance == EndpointPolicy::Farthest {
            return Err(MazeError::InvalidParameter {
                name: "entrance",
                value: "farthest".to_string(),
            });
        }
        Ok(())
    }
}

/// Frame geometry: grid size plus framing-specific inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameParams {
    pub rows: usize,
    pub columns: usize,
    /// Rendering hint only; the engine works in cell units.
    pub cell_size: usize,
    /// Polygon framing.
    pub sides: usize,
    /// Text framing.
    pub text: String,
    /// Height in cells of each rasterized glyph.
    pub glyph_height: usize,
}

impl Default for FrameParams {
    fn default() -> Self {
        FrameParams {
            rows: 20,
            columns: 20,
            cell_size: 10,
            sides: 6,
            text: String::new(),
            glyph_height: 7,
        }
    }
}
