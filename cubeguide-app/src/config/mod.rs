//! Configuration loading and parsing
//!
//! Loads the color calibration and session tuning from a TOML file.

pub mod loader;

pub use loader::{load_config, ConfigError, LoadedConfig};
