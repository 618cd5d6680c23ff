//! Face labels, slot positions and the 3×3 sticker grid

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of stickers on one face
pub const CELLS_PER_FACE: usize = 9;

/// Index of the center sticker (row-major, 0-based)
pub const CENTER_CELL: usize = 4;

/// Canonical color label of a sticker
///
/// Each label is named after the slot its center sits in on a solved,
/// canonically held cube. An unclassifiable sample is `None` wherever an
/// `Option<FaceLabel>` appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaceLabel {
    #[cfg_attr(feature = "serde", serde(rename = "U"))]
    Up,
    #[cfg_attr(feature = "serde", serde(rename = "R"))]
    Right,
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Front,
    #[cfg_attr(feature = "serde", serde(rename = "D"))]
    Down,
    #[cfg_attr(feature = "serde", serde(rename = "L"))]
    Left,
    #[cfg_attr(feature = "serde", serde(rename = "B"))]
    Back,
}

impl FaceLabel {
    /// All labels in canonical order (U, R, F, D, L, B)
    pub const ALL: [FaceLabel; 6] = [
        FaceLabel::Up,
        FaceLabel::Right,
        FaceLabel::Front,
        FaceLabel::Down,
        FaceLabel::Left,
        FaceLabel::Back,
    ];

    /// Position in `ALL`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter form
    pub const fn as_char(self) -> char {
        match self {
            FaceLabel::Up => 'U',
            FaceLabel::Right => 'R',
            FaceLabel::Front => 'F',
            FaceLabel::Down => 'D',
            FaceLabel::Left => 'L',
            FaceLabel::Back => 'B',
        }
    }

    /// Parse the single-letter form
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(FaceLabel::Up),
            'R' => Some(FaceLabel::Right),
            'F' => Some(FaceLabel::Front),
            'D' => Some(FaceLabel::Down),
            'L' => Some(FaceLabel::Left),
            'B' => Some(FaceLabel::Back),
            _ => None,
        }
    }
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Fixed spatial role relative to the sensor rig
///
/// A slot is not a color: it names "whatever face currently sits here".
/// Front is the slot facing the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotPosition {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

impl SlotPosition {
    /// Canonical order used by scanning and by the facelet string
    pub const ORDER: [SlotPosition; 6] = [
        SlotPosition::Up,
        SlotPosition::Right,
        SlotPosition::Front,
        SlotPosition::Down,
        SlotPosition::Left,
        SlotPosition::Back,
    ];

    /// Position in `ORDER`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter form
    pub const fn as_char(self) -> char {
        match self {
            SlotPosition::Up => 'U',
            SlotPosition::Right => 'R',
            SlotPosition::Front => 'F',
            SlotPosition::Down => 'D',
            SlotPosition::Left => 'L',
            SlotPosition::Back => 'B',
        }
    }

    /// Parse the single-letter form
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(SlotPosition::Up),
            'R' => Some(SlotPosition::Right),
            'F' => Some(SlotPosition::Front),
            'D' => Some(SlotPosition::Down),
            'L' => Some(SlotPosition::Left),
            'B' => Some(SlotPosition::Back),
            _ => None,
        }
    }

    /// Human-readable name for instructions
    pub const fn name(self) -> &'static str {
        match self {
            SlotPosition::Up => "Up",
            SlotPosition::Right => "Right",
            SlotPosition::Front => "Front",
            SlotPosition::Down => "Down",
            SlotPosition::Left => "Left",
            SlotPosition::Back => "Back",
        }
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// Source cell for each destination cell of a 90° rotation
const CW_SOURCE: [usize; CELLS_PER_FACE] = [6, 3, 0, 7, 4, 1, 8, 5, 2];
const CCW_SOURCE: [usize; CELLS_PER_FACE] = [2, 5, 8, 1, 4, 7, 0, 3, 6];

/// The nine stickers of one face, row-major from the top-left
///
/// Cell order is as seen by the sensor after mirroring about the vertical
/// axis. The length is part of the type, so no operation can change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceGrid([FaceLabel; CELLS_PER_FACE]);

impl FaceGrid {
    /// Create a grid from its cells
    pub const fn new(cells: [FaceLabel; CELLS_PER_FACE]) -> Self {
        Self(cells)
    }

    /// A grid with every cell set to `label`
    pub const fn uniform(label: FaceLabel) -> Self {
        Self([label; CELLS_PER_FACE])
    }

    /// Build from a slice; `None` unless it holds exactly nine labels
    pub fn from_slice(cells: &[FaceLabel]) -> Option<Self> {
        let cells: [FaceLabel; CELLS_PER_FACE] = cells.try_into().ok()?;
        Some(Self(cells))
    }

    /// Parse nine letters such as `"UUFUUFUUF"`
    pub fn from_letters(letters: &str) -> Option<Self> {
        let mut cells = [FaceLabel::Up; CELLS_PER_FACE];
        let mut count = 0;
        for c in letters.chars() {
            if count == CELLS_PER_FACE {
                return None;
            }
            cells[count] = FaceLabel::from_char(c)?;
            count += 1;
        }
        (count == CELLS_PER_FACE).then_some(Self(cells))
    }

    /// All cells
    pub const fn cells(&self) -> &[FaceLabel; CELLS_PER_FACE] {
        &self.0
    }

    /// Label at `cell` (0..8)
    pub const fn cell(&self, cell: usize) -> FaceLabel {
        self.0[cell]
    }

    /// Overwrite the label at `cell` (0..8)
    pub fn set_cell(&mut self, cell: usize, label: FaceLabel) {
        self.0[cell] = label;
    }

    /// The center sticker, which defines the face's color
    pub const fn center(&self) -> FaceLabel {
        self.0[CENTER_CELL]
    }

    /// Iterate cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = FaceLabel> + '_ {
        self.0.iter().copied()
    }

    /// This grid rotated 90° clockwise
    pub fn rotated_cw(&self) -> Self {
        Self(CW_SOURCE.map(|src| self.0[src]))
    }

    /// This grid rotated 90° counter-clockwise
    pub fn rotated_ccw(&self) -> Self {
        Self(CCW_SOURCE.map(|src| self.0[src]))
    }
}

impl fmt::Display for FaceGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in self.0 {
            write!(f, "{}", label.as_char())?;
        }
        Ok(())
    }
}

/// Rotate a face grid 90° clockwise
pub fn rotate_face_cw(grid: &FaceGrid) -> FaceGrid {
    grid.rotated_cw()
}

/// Rotate a face grid 90° counter-clockwise (inverse of [`rotate_face_cw`])
pub fn rotate_face_ccw(grid: &FaceGrid) -> FaceGrid {
    grid.rotated_ccw()
}
