//! Face detection from a sensor frame
//!
//! Samples the nine layout points of a frame and classifies each one.

use thiserror::Error;

use crate::config::{ColorCalibration, SamplingLayout};
use crate::cube::{FaceGrid, FaceLabel, CELLS_PER_FACE};
use crate::traits::Frame;

use super::classifier::classify;

/// Why a frame did not yield a full face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetectError {
    /// A layout point lies outside the frame
    #[error("sample point for cell {cell} is outside the frame")]
    OutOfFrame { cell: u8 },
    /// A sample matched no calibrated range
    #[error("cell {cell} matched no calibrated color")]
    Unclassified { cell: u8 },
}

/// Classify every cell, or report the first cell that failed
pub fn detect_face<F: Frame + ?Sized>(
    frame: &F,
    layout: &SamplingLayout,
    calibration: &ColorCalibration,
) -> Result<FaceGrid, DetectError> {
    let mut cells = [FaceLabel::Up; CELLS_PER_FACE];
    for (cell, (x, y)) in layout.points.iter().copied().enumerate() {
        let cell_id = cell as u8;
        let sample = frame
            .sample_pixel(x, y)
            .ok_or(DetectError::OutOfFrame { cell: cell_id })?;
        cells[cell] =
            classify(sample, calibration).ok_or(DetectError::Unclassified { cell: cell_id })?;
    }
    Ok(FaceGrid::new(cells))
}

/// Best-effort per-cell reading for the overlay
///
/// Unlike [`detect_face`] this never fails: unreadable cells are `None`.
pub fn read_labels<F: Frame + ?Sized>(
    frame: &F,
    layout: &SamplingLayout,
    calibration: &ColorCalibration,
) -> [Option<FaceLabel>; CELLS_PER_FACE] {
    layout
        .points
        .map(|(x, y)| frame.sample_pixel(x, y).and_then(|s| classify(s, calibration)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorRange, Hsv};

    /// Frame with three vertical color stripes
    struct StripeFrame {
        width: u16,
        height: u16,
        hues: [u8; 3],
    }

    impl Frame for StripeFrame {
        fn sample_pixel(&self, x: u16, y: u16) -> Option<Hsv> {
            if x >= self.width || y >= self.height {
                return None;
            }
            let column = match x {
                0..=285 => 0,
                286..=355 => 1,
                _ => 2,
            };
            Some(Hsv::new(self.hues[column], 200, 200))
        }

        fn timestamp_ms(&self) -> u32 {
            0
        }
    }

    fn calibration() -> ColorCalibration {
        let mut cal = ColorCalibration::new();
        cal.insert(
            FaceLabel::Front,
            ColorRange::new(Hsv::new(50, 100, 100), Hsv::new(90, 255, 255)),
        );
        cal.insert(
            FaceLabel::Back,
            ColorRange::new(Hsv::new(95, 100, 100), Hsv::new(120, 255, 255)),
        );
        cal.insert(
            FaceLabel::Right,
            ColorRange::new(Hsv::new(170, 100, 100), Hsv::new(5, 255, 255)),
        );
        cal
    }

    fn frame(hues: [u8; 3]) -> StripeFrame {
        StripeFrame {
            width: 640,
            height: 480,
            hues,
        }
    }

    #[test]
    fn test_detects_columns() {
        let grid = detect_face(&frame([60, 100, 178]), &SamplingLayout::default(), &calibration())
            .unwrap();
        assert_eq!(grid, FaceGrid::from_letters("FBRFBRFBR").unwrap());
    }

    #[test]
    fn test_unclassified_cell() {
        let result = detect_face(&frame([60, 30, 178]), &SamplingLayout::default(), &calibration());
        assert_eq!(result, Err(DetectError::Unclassified { cell: 1 }));

        let labels = read_labels(&frame([60, 30, 178]), &SamplingLayout::default(), &calibration());
        assert_eq!(labels[0], Some(FaceLabel::Front));
        assert_eq!(labels[1], None);
        assert_eq!(labels[2], Some(FaceLabel::Right));
    }

    #[test]
    fn test_out_of_frame() {
        let small = StripeFrame {
            width: 300,
            height: 480,
            hues: [60, 60, 60],
        };
        let result = detect_face(&small, &SamplingLayout::default(), &calibration());
        assert_eq!(result, Err(DetectError::OutOfFrame { cell: 1 }));
    }
}
