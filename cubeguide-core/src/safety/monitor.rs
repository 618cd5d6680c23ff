//! Inactivity watchdog
//!
//! Tracks time since the last visible progress on a pending move. Expiry is
//! only a signal; the session decides to cancel.

/// Watchdog status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogStatus {
    /// Within the timeout, or no timeout configured
    Ok,
    /// No progress for at least the timeout
    Expired,
}

/// Inactivity monitor for pending moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InactivityMonitor {
    /// `None` disables expiry
    timeout_ms: Option<u32>,
    /// Time since last progress (ms)
    idle_ms: u32,
}

impl InactivityMonitor {
    pub const fn new(timeout_ms: Option<u32>) -> Self {
        Self {
            timeout_ms,
            idle_ms: 0,
        }
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    pub fn update_time(&mut self, delta_ms: u32) {
        self.idle_ms = self.idle_ms.saturating_add(delta_ms);
    }

    /// Record visible progress
    pub fn progress(&mut self) {
        self.idle_ms = 0;
    }

    pub fn idle_ms(&self) -> u32 {
        self.idle_ms
    }

    pub fn check(&self) -> WatchdogStatus {
        match self.timeout_ms {
            Some(timeout) if self.idle_ms >= timeout => WatchdogStatus::Expired,
            _ => WatchdogStatus::Ok,
        }
    }
}
