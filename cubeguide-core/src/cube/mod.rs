//! Sticker model
//!
//! Six fixed spatial slots, each holding a 3×3 grid of color labels.

pub mod face;
pub mod state;

pub use face::{
    rotate_face_ccw, rotate_face_cw, FaceGrid, FaceLabel, SlotPosition, CELLS_PER_FACE,
    CENTER_CELL,
};
pub use state::{CubeState, PartialCube, STICKER_COUNT};
