//! Application errors

use std::path::PathBuf;

use cubeguide_core::plan::ParseError;
use cubeguide_core::scan::ScanError;
use cubeguide_core::traits::SolverError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the application before or outside a session
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures after a completed scan; the scan is restarted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("unusable solution: {0}")]
    Solution(#[from] ParseError),
}
