//! Collaborator traits
//!
//! These traits define the interface between the guidance logic and the
//! camera, the solving oracle and the user.

pub mod input;
pub mod sensor;
pub mod solver;

pub use input::{InputSource, NoInput};
pub use sensor::{Frame, FrameSource, SensorError};
pub use solver::{SolverError, SolverOracle, MAX_SOLUTION_TEXT};
