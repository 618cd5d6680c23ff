//! Color/slot bijection and the solver's facelet string

use core::fmt;

use heapless::String;
use thiserror::Error;

use crate::cube::{FaceLabel, PartialCube, SlotPosition, STICKER_COUNT};

/// Scan-level failures; every one of them restarts the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// Two slots reported the same center color
    #[error("center color {color} seen on both {first} and {second}")]
    DuplicateCenterColor {
        color: FaceLabel,
        first: SlotPosition,
        second: SlotPosition,
    },
    /// Not every slot has been scanned
    #[error("only {scanned} of 6 faces scanned")]
    IncompleteScan { scanned: u8 },
    /// The generated string is not 54 letters over U,R,F,D,L,B
    #[error("facelet string has {len} characters, expected 54")]
    MalformedFaceletString { len: usize },
}

/// Which slot each center color sits in, and the reverse
///
/// Built once from the scanned centers and passed by value afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorPositionMap {
    slot_of: [SlotPosition; 6],
    color_of: [FaceLabel; 6],
}

impl ColorPositionMap {
    /// Build from the center label of each slot, given in `SlotPosition::ORDER`
    pub fn from_centers(centers: [FaceLabel; 6]) -> Result<Self, ScanError> {
        let mut slot_of: [Option<SlotPosition>; 6] = [None; 6];
        for (slot, color) in SlotPosition::ORDER.into_iter().zip(centers) {
            if let Some(first) = slot_of[color.index()] {
                return Err(ScanError::DuplicateCenterColor {
                    color,
                    first,
                    second: slot,
                });
            }
            slot_of[color.index()] = Some(slot);
        }

        // six slots and no duplicates means every color is present
        let mut resolved = [SlotPosition::Up; 6];
        for (dst, src) in resolved.iter_mut().zip(slot_of) {
            *dst = src.ok_or(ScanError::IncompleteScan { scanned: 6 })?;
        }
        Ok(Self {
            slot_of: resolved,
            color_of: centers,
        })
    }

    /// Map for a cube held in canonical orientation
    pub const fn identity() -> Self {
        Self {
            slot_of: SlotPosition::ORDER,
            color_of: FaceLabel::ALL,
        }
    }

    /// Slot whose center has `color`
    pub const fn slot_for(&self, color: FaceLabel) -> SlotPosition {
        self.slot_of[color.index()]
    }

    /// Center color of `slot`
    pub const fn color_at(&self, slot: SlotPosition) -> FaceLabel {
        self.color_of[slot.index()]
    }
}

/// Exactly 54 letters over U,R,F,D,L,B
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceletString(String<STICKER_COUNT>);

impl FaceletString {
    /// Validate an existing string
    pub fn parse(text: &str) -> Result<Self, ScanError> {
        let malformed = ScanError::MalformedFaceletString { len: text.len() };
        if text.len() != STICKER_COUNT || !text.chars().all(|c| SlotPosition::from_char(c).is_some()) {
            return Err(malformed);
        }
        let mut inner = String::new();
        inner.push_str(text).map_err(|_| malformed)?;
        Ok(Self(inner))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FaceletString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn a fully scanned cube into the color map and the solver input
///
/// For each slot in U,R,F,D,L,B order and each cell in row-major order, the
/// output holds the letter of the slot whose center has that cell's color.
pub fn build_facelet_string(
    partial: &PartialCube,
) -> Result<(ColorPositionMap, FaceletString), ScanError> {
    let incomplete = ScanError::IncompleteScan {
        scanned: partial.filled() as u8,
    };
    let mut centers = [FaceLabel::Up; 6];
    for (center, slot) in centers.iter_mut().zip(SlotPosition::ORDER) {
        *center = partial.get(slot).ok_or(incomplete)?.center();
    }
    let map = ColorPositionMap::from_centers(centers)?;

    let mut text: String<STICKER_COUNT> = String::new();
    for slot in SlotPosition::ORDER {
        let grid = partial.get(slot).ok_or(incomplete)?;
        for color in grid.iter() {
            text.push(map.slot_for(color).as_char())
                .map_err(|_| ScanError::MalformedFaceletString { len: text.len() + 1 })?;
        }
    }
    let facelets = FaceletString::parse(&text)?;
    Ok((map, facelets))
}
