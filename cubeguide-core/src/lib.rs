//! Platform-agnostic core logic for the cube solving assistant
//!
//! This crate contains everything that does not depend on a camera,
//! a window system or the solving oracle:
//!
//! - Color classification of HSV samples against calibrated ranges
//! - The sticker model (face grids, slot positions, cube state)
//! - The move engine (18 face turns and 2 whole-cube reorientations)
//! - Scan coordination and facelet string generation
//! - The move-confirmation state machine
//! - Solution planning (oracle tokens to physically confirmable steps)
//! - Inactivity watchdog
//! - Collaborator traits (frame source, solving oracle, input)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod cube;
pub mod moves;
pub mod plan;
pub mod safety;
pub mod scan;
pub mod state;
pub mod traits;
