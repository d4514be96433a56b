use thiserror::Error;

use crate::frame::Framing;
use crate::maze::Position;

/// Failures reported by the generation pipeline and the solvers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MazeError {
    /// Rows or columns are zero, or too small for the selected framing.
    #[error("invalid maze dimensions {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    /// A tuning parameter is outside its accepted range.
    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// The framing cannot be combined with the requested option.
    #[error("{option} is not supported with {framing} framing")]
    UnsupportedCombination { framing: Framing, option: String },

    /// The framing mask left no playable cell.
    #[error("the {0} framing produced an empty shape")]
    EmptyShape(Framing),

    /// No entrance or exit could be located.
    #[error("no {0} cell found")]
    MissingEndpoint(&'static str),

    /// A search exhausted every reachable cell without meeting its goal.
    /// Only possible when an upstream connectivity invariant was broken.
    #[error("no path from {from} to {to}")]
    NoPath { from: Position, to: Position },
}

pub type Result<T> = std::result::Result<T, MazeError>;
