//! Move algebra
//!
//! Face turns and whole-cube reorientations over [`CubeState`](crate::cube::CubeState).

pub mod engine;
pub mod token;

pub use engine::{apply, apply_all, apply_token, quarter, reorient};
pub use token::{Move, MoveToken, Quarter, Reorientation, Turn};
