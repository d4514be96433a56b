//! Post-processing of an adapted grid: entrance/exit placement and mirroring.

mod endpoints;
mod symmetry;

pub use endpoints::{boundary_position, farthest_position, place_endpoints};
pub use symmetry::apply_symmetry;
