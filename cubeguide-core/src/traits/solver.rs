//! Solving oracle trait

use heapless::String;
use thiserror::Error;

use crate::scan::FaceletString;

/// Room for the oracle's answer (32 tokens of up to two characters plus spaces)
pub const MAX_SOLUTION_TEXT: usize = 160;

/// Errors from the solving oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SolverError {
    /// The oracle ran and refused the cube (unsolvable or misread)
    #[error("solver rejected the cube")]
    Rejected,
    /// The oracle could not be reached
    #[error("solver unavailable")]
    Unavailable,
    /// The oracle answered with something that is not a move list
    #[error("solver returned a malformed solution")]
    MalformedSolution,
}

/// External solver: facelet string in, whitespace-separated moves out
///
/// Called once per completed scan. An empty answer means already solved.
pub trait SolverOracle {
    fn solve(&mut self, facelets: &FaceletString) -> Result<String<MAX_SOLUTION_TEXT>, SolverError>;
}
