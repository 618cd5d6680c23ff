//! Scanning
//!
//! Stabilized acquisition of the six faces and conversion into the solver's
//! facelet string.

pub mod coordinator;
pub mod facelet;

pub use coordinator::{ScanCoordinator, ScanProgress, ScanResult};
pub use facelet::{build_facelet_string, ColorPositionMap, FaceletString, ScanError};
