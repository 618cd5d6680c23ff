//! Safety monitoring
//!
//! Optional inactivity timeout for pending moves.

pub mod monitor;

pub use monitor::{InactivityMonitor, WatchdogStatus};
