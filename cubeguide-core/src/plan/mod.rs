//! Solution planning
//!
//! Turns the oracle's move list into steps a person can perform in front of
//! the camera, and tracks progress through them.

pub mod solution;
pub mod steps;

pub use solution::{Advance, ParseError, Plan, Solution, MAX_SOLUTION_MOVES};
pub use steps::{plan_token, Step, Steps, MAX_STEPS_PER_TOKEN};
