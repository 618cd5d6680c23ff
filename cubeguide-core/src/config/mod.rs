//! Configuration types
//!
//! Calibration and session tuning, serde-derived behind the `serde` feature.

pub mod calibration;
pub mod types;

pub use calibration::{CalibrationEntry, CalibrationError, ColorCalibration};
pub use types::*;
