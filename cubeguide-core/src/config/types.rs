//! Configuration type definitions
//!
//! Session tuning shared by the scan coordinator, the confirmation machine
//! and the watchdog. The host application loads these from TOML.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cube::CELLS_PER_FACE;

/// Largest confirmation window the machine can hold
pub const MAX_CONFIRM_WINDOW: usize = 8;

/// Largest scan stabilization window
pub const MAX_SCAN_WINDOW: usize = 16;

/// Default sampling grid center (x, y) in pixels
pub const DEFAULT_GRID_CENTER: (u16, u16) = (320, 240);

/// Default distance between neighbouring sample points in pixels
pub const DEFAULT_GRID_PITCH: u16 = 70;

/// Pixel coordinates of the nine sticker sample points, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingLayout {
    pub points: [(u16, u16); CELLS_PER_FACE],
}

impl SamplingLayout {
    /// Square 3×3 grid around `center`
    ///
    /// Coordinates saturate at the `u16` bounds.
    pub fn grid(center: (u16, u16), pitch: u16) -> Self {
        let mut points = [(0, 0); CELLS_PER_FACE];
        for (i, point) in points.iter_mut().enumerate() {
            let col = (i % 3) as u16;
            let row = (i / 3) as u16;
            *point = (
                center.0.saturating_add(col * pitch).saturating_sub(pitch),
                center.1.saturating_add(row * pitch).saturating_sub(pitch),
            );
        }
        Self { points }
    }

    /// Sample point of `cell`
    pub const fn point(&self, cell: usize) -> (u16, u16) {
        self.points[cell]
    }
}

impl Default for SamplingLayout {
    fn default() -> Self {
        Self::grid(DEFAULT_GRID_CENTER, DEFAULT_GRID_PITCH)
    }
}

/// Move confirmation tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfirmConfig {
    /// Detections kept in the sliding window
    pub window: u8,
    /// Consecutive matching detections required to confirm
    pub confirm_frames: u8,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            window: 5,
            confirm_frames: 3,
        }
    }
}

impl ConfirmConfig {
    /// Clamp into what the machine supports
    ///
    /// The window holds at least one frame and at most
    /// [`MAX_CONFIRM_WINDOW`]; `confirm_frames` lies in `1..=window`.
    pub fn normalized(self) -> Self {
        let window = self.window.clamp(1, MAX_CONFIRM_WINDOW as u8);
        Self {
            window,
            confirm_frames: self.confirm_frames.clamp(1, window),
        }
    }
}

/// Scan stabilization tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanConfig {
    /// Readings kept while holding a face steady
    pub window: u8,
    /// Identical trailing readings needed to capture a face
    pub stable_frames: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window: 10,
            stable_frames: 3,
        }
    }
}

impl ScanConfig {
    pub fn normalized(self) -> Self {
        let window = self.window.clamp(1, MAX_SCAN_WINDOW as u8);
        Self {
            window,
            stable_frames: self.stable_frames.clamp(1, window),
        }
    }
}

/// Everything a guidance session needs besides the calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub layout: SamplingLayout,
    pub confirm: ConfirmConfig,
    pub scan: ScanConfig,
    /// Cancel a pending move after this long without visible progress
    pub inactivity_timeout_ms: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_grid() {
        let layout = SamplingLayout::default();
        assert_eq!(layout.point(0), (250, 170));
        assert_eq!(layout.point(4), (320, 240));
        assert_eq!(layout.point(8), (390, 310));
        assert_eq!(layout.point(5), (390, 240));
    }

    #[test]
    fn test_grid_clamps_at_origin() {
        let layout = SamplingLayout::grid((10, 10), 20);
        assert_eq!(layout.point(0), (0, 0));
        assert_eq!(layout.point(8), (30, 30));
    }

    #[test]
    fn test_confirm_normalized() {
        let cfg = ConfirmConfig {
            window: 40,
            confirm_frames: 0,
        }
        .normalized();
        assert_eq!(cfg.window as usize, MAX_CONFIRM_WINDOW);
        assert_eq!(cfg.confirm_frames, 1);

        let cfg = ConfirmConfig {
            window: 2,
            confirm_frames: 3,
        }
        .normalized();
        assert_eq!(cfg.confirm_frames, 2);
        assert_eq!(ConfirmConfig::default().normalized(), ConfirmConfig::default());
    }

    #[test]
    fn test_scan_normalized() {
        assert_eq!(ScanConfig::default().normalized(), ScanConfig::default());
        let cfg = ScanConfig {
            window: 0,
            stable_frames: 5,
        }
        .normalized();
        assert_eq!(cfg.window, 1);
        assert_eq!(cfg.stable_frames, 1);
    }
}
