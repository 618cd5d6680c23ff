//! Camera frame traits

use thiserror::Error;

use crate::color::Hsv;

/// Errors from the frame source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No frame this tick; the next call may succeed
    #[error("frame unavailable")]
    FrameUnavailable,
    /// The source is gone for good
    #[error("sensor disconnected")]
    Disconnected,
}

/// One captured image, already converted to HSV
pub trait Frame {
    /// Color at pixel `(x, y)`, or `None` outside the image
    fn sample_pixel(&self, x: u16, y: u16) -> Option<Hsv>;

    /// Capture time in milliseconds since the source started
    fn timestamp_ms(&self) -> u32;
}

/// Anything that produces frames, one per call
///
/// `next_frame` is the only blocking call in a session loop.
pub trait FrameSource {
    type Frame: Frame;

    fn next_frame(&mut self) -> Result<Self::Frame, SensorError>;

    /// Source time of the latest attempt, including ones that produced no frame
    ///
    /// Lets time keep passing while frames are dropped. `None` if the source
    /// keeps no clock.
    fn clock_ms(&self) -> Option<u32> {
        None
    }
}
