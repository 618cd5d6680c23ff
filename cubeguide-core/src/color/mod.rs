//! Color classification
//!
//! Maps HSV samples onto the six canonical face labels.

pub mod classifier;
pub mod detector;

pub use classifier::{classify, ColorRange, Hsv, HUE_MAX};
pub use detector::{detect_face, read_labels, DetectError};
