pub mod error;
pub mod finishing;
pub mod frame;
pub mod generators;
pub mod maze;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod solvers;

pub use error::{MazeError, Result};
pub use pipeline::{Maze, MazeRequest, generate};
