//! External solving oracle
//!
//! Runs a configured program with the facelet string as its last argument
//! and reads the move list from its standard output.

use std::path::PathBuf;
use std::process::Command;

use log::{debug, warn};

use cubeguide_core::scan::FaceletString;
use cubeguide_core::traits::{SolverError, SolverOracle, MAX_SOLUTION_TEXT};

/// Oracle backed by a subprocess, e.g. a two-phase solver CLI
#[derive(Debug, Clone)]
pub struct CommandSolver {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandSolver {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SolverOracle for CommandSolver {
    fn solve(
        &mut self,
        facelets: &FaceletString,
    ) -> Result<heapless::String<MAX_SOLUTION_TEXT>, SolverError> {
        debug!("Running {} {:?} {}", self.program.display(), self.args, facelets);
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(facelets.as_str())
            .output()
            .map_err(|err| {
                warn!("cannot start solver {}: {}", self.program.display(), err);
                SolverError::Unavailable
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("solver exited with {}: {}", output.status, stderr.trim());
            return Err(SolverError::Rejected);
        }

        let stdout = std::str::from_utf8(&output.stdout).map_err(|_| {
            warn!("solver output is not UTF-8");
            SolverError::MalformedSolution
        })?;
        solution_text(stdout)
    }
}

/// Normalize the oracle's output to a single line of moves
fn solution_text(stdout: &str) -> Result<heapless::String<MAX_SOLUTION_TEXT>, SolverError> {
    let mut text = heapless::String::new();
    for word in stdout.split_whitespace() {
        if !text.is_empty() {
            text.push(' ').map_err(|_| SolverError::MalformedSolution)?;
        }
        text.push_str(word)
            .map_err(|_| SolverError::MalformedSolution)?;
    }
    Ok(text)
}
