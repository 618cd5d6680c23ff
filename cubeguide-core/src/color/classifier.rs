//! HSV samples and range classification

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ColorCalibration;
use crate::cube::FaceLabel;

/// Largest hue value (hue uses a 180-step circle)
pub const HUE_MAX: u8 = 179;

/// One measured color
///
/// Serialized as a `[h, s, v]` triple so calibration files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "[u8; 3]", into = "[u8; 3]")
)]
pub struct Hsv {
    /// Hue, 0..=179
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl From<[u8; 3]> for Hsv {
    fn from([h, s, v]: [u8; 3]) -> Self {
        Self { h, s, v }
    }
}

impl From<Hsv> for [u8; 3] {
    fn from(hsv: Hsv) -> Self {
        [hsv.h, hsv.s, hsv.v]
    }
}

/// Inclusive HSV box, with hue allowed to wrap past 179
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl ColorRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// Whether the hue interval wraps through 0
    pub const fn wraps(&self) -> bool {
        self.lower.h > self.upper.h
    }

    /// Membership test
    ///
    /// A wrapping range (`lower.h > upper.h`) matches hue in
    /// `[lower.h, 179] ∪ [0, upper.h]`.
    pub fn contains(&self, sample: Hsv) -> bool {
        let hue_ok = if self.wraps() {
            sample.h >= self.lower.h || sample.h <= self.upper.h
        } else {
            (self.lower.h..=self.upper.h).contains(&sample.h)
        };

        hue_ok
            && (self.lower.s..=self.upper.s).contains(&sample.s)
            && (self.lower.v..=self.upper.v).contains(&sample.v)
    }

    /// Both hue bounds are on the 0..=179 circle
    pub const fn hue_in_range(&self) -> bool {
        self.lower.h <= HUE_MAX && self.upper.h <= HUE_MAX
    }
}

/// Classify one sample against the calibration
///
/// Ranges are checked in insertion order and the first match wins, so
/// overlapping ranges resolve to the earlier entry. `None` means unknown.
pub fn classify(sample: Hsv, calibration: &ColorCalibration) -> Option<FaceLabel> {
    calibration
        .iter()
        .find(|entry| entry.range.contains(sample))
        .map(|entry| entry.label)
}
