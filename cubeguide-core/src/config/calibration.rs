//! Color calibration table
//!
//! An ordered list of label ranges. Order matters: classification returns
//! the first entry whose range contains the sample.

use heapless::Vec;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::ColorRange;
use crate::cube::FaceLabel;

/// One label and its range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationEntry {
    pub label: FaceLabel,
    pub range: ColorRange,
}

/// Calibration problems detected while building a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    #[error("label {0} is calibrated more than once")]
    DuplicateLabel(FaceLabel),
    #[error("hue bound for label {0} is above 179")]
    HueOutOfRange(FaceLabel),
}

/// Calibrated ranges in insertion order, at most one per label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorCalibration {
    entries: Vec<CalibrationEntry, 6>,
}

impl ColorCalibration {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the range for `label`
    ///
    /// An existing entry is replaced in place and keeps its position.
    pub fn insert(&mut self, label: FaceLabel, range: ColorRange) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.label == label) {
            entry.range = range;
            return;
        }
        // one entry per label and six labels, so capacity is never exceeded
        let _ = self.entries.push(CalibrationEntry { label, range });
    }

    /// Append a new label, rejecting duplicates and out-of-circle hues
    pub fn try_insert(&mut self, label: FaceLabel, range: ColorRange) -> Result<(), CalibrationError> {
        if !range.hue_in_range() {
            return Err(CalibrationError::HueOutOfRange(label));
        }
        if self.get(label).is_some() {
            return Err(CalibrationError::DuplicateLabel(label));
        }
        self.insert(label, range);
        Ok(())
    }

    pub fn get(&self, label: FaceLabel) -> Option<&ColorRange> {
        self.entries.iter().find(|e| e.label == label).map(|e| &e.range)
    }

    /// Entries in classification order
    pub fn iter(&self) -> impl Iterator<Item = &CalibrationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels with no range, in canonical order
    pub fn missing_labels(&self) -> Vec<FaceLabel, 6> {
        FaceLabel::ALL
            .into_iter()
            .filter(|label| self.get(*label).is_none())
            .collect()
    }

    /// True when all six labels have a range
    pub fn is_complete(&self) -> bool {
        self.entries.len() == FaceLabel::ALL.len()
    }

    /// Check every stored range
    pub fn validate(&self) -> Result<(), CalibrationError> {
        match self.entries.iter().find(|e| !e.range.hue_in_range()) {
            Some(entry) => Err(CalibrationError::HueOutOfRange(entry.label)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsv;

    fn range(lo: u8, hi: u8) -> ColorRange {
        ColorRange::new(Hsv::new(lo, 0, 0), Hsv::new(hi, 255, 255))
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut cal = ColorCalibration::new();
        cal.insert(FaceLabel::Up, range(0, 10));
        cal.insert(FaceLabel::Down, range(20, 30));
        cal.insert(FaceLabel::Up, range(40, 50));

        let labels: std::vec::Vec<_> = cal.iter().map(|e| e.label).collect();
        assert_eq!(labels, [FaceLabel::Up, FaceLabel::Down]);
        assert_eq!(cal.get(FaceLabel::Up), Some(&range(40, 50)));
    }

    #[test]
    fn test_missing_labels() {
        let mut cal = ColorCalibration::new();
        assert_eq!(cal.missing_labels().len(), 6);
        cal.insert(FaceLabel::Right, range(0, 10));
        cal.insert(FaceLabel::Back, range(20, 30));
        assert_eq!(
            cal.missing_labels().as_slice(),
            [FaceLabel::Up, FaceLabel::Front, FaceLabel::Down, FaceLabel::Left]
        );
        assert!(!cal.is_complete());

        for label in FaceLabel::ALL {
            cal.insert(label, range(0, 10));
        }
        assert!(cal.is_complete());
        assert!(cal.missing_labels().is_empty());
    }

    #[test]
    fn test_try_insert_rejects() {
        let mut cal = ColorCalibration::new();
        assert_eq!(cal.try_insert(FaceLabel::Up, range(0, 10)), Ok(()));
        assert_eq!(
            cal.try_insert(FaceLabel::Up, range(0, 10)),
            Err(CalibrationError::DuplicateLabel(FaceLabel::Up))
        );
        assert_eq!(
            cal.try_insert(FaceLabel::Left, range(0, 200)),
            Err(CalibrationError::HueOutOfRange(FaceLabel::Left))
        );
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn test_validate_catches_bad_hue() {
        let mut cal = ColorCalibration::new();
        cal.insert(FaceLabel::Up, range(0, 10));
        assert!(cal.validate().is_ok());
        cal.insert(FaceLabel::Front, range(180, 10));
        assert_eq!(cal.validate(), Err(CalibrationError::HueOutOfRange(FaceLabel::Front)));
    }
}
