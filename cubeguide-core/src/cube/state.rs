//! Full and partial cube sticker state

use core::fmt;

use super::face::{FaceGrid, FaceLabel, SlotPosition, CELLS_PER_FACE};

/// Total sticker count of a 3×3 cube
pub const STICKER_COUNT: usize = 6 * CELLS_PER_FACE;

/// Every slot populated with a face grid
///
/// Indexed by `SlotPosition::index()`. The value is small and `Copy`; the
/// move engine always returns a new state instead of editing one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CubeState {
    faces: [FaceGrid; 6],
}

impl CubeState {
    /// Build from grids in `SlotPosition::ORDER`
    pub const fn new(faces: [FaceGrid; 6]) -> Self {
        Self { faces }
    }

    /// Every cell of slot X carries label X
    pub const fn solved() -> Self {
        Self {
            faces: [
                FaceGrid::uniform(FaceLabel::Up),
                FaceGrid::uniform(FaceLabel::Right),
                FaceGrid::uniform(FaceLabel::Front),
                FaceGrid::uniform(FaceLabel::Down),
                FaceGrid::uniform(FaceLabel::Left),
                FaceGrid::uniform(FaceLabel::Back),
            ],
        }
    }

    /// Parse 54 letters in slot order U,R,F,D,L,B, each face row-major
    pub fn from_letters(letters: &str) -> Option<Self> {
        if letters.len() != STICKER_COUNT || !letters.is_ascii() {
            return None;
        }
        let mut faces = [FaceGrid::uniform(FaceLabel::Up); 6];
        for (slot, face) in faces.iter_mut().enumerate() {
            let start = slot * CELLS_PER_FACE;
            *face = FaceGrid::from_letters(&letters[start..start + CELLS_PER_FACE])?;
        }
        Some(Self { faces })
    }

    /// Grid currently in `slot`
    pub const fn face(&self, slot: SlotPosition) -> &FaceGrid {
        &self.faces[slot.index()]
    }

    /// Replace the grid in `slot`
    pub fn set_face(&mut self, slot: SlotPosition, grid: FaceGrid) {
        self.faces[slot.index()] = grid;
    }

    /// The grid facing the sensor
    pub const fn front(&self) -> &FaceGrid {
        self.face(SlotPosition::Front)
    }

    /// All grids in slot order
    pub const fn faces(&self) -> &[FaceGrid; 6] {
        &self.faces
    }

    /// How many stickers carry each label, indexed by `FaceLabel::index()`
    pub fn label_counts(&self) -> [u8; 6] {
        let mut counts = [0u8; 6];
        for label in self.faces.iter().flat_map(FaceGrid::iter) {
            counts[label.index()] += 1;
        }
        counts
    }

    /// Whether every face is a single color
    pub fn is_solved(&self) -> bool {
        self.faces.iter().all(|face| face.iter().all(|l| l == face.center()))
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in &self.faces {
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

/// A cube being scanned: some slots may still be empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PartialCube {
    faces: [Option<FaceGrid>; 6],
}

impl PartialCube {
    pub const fn new() -> Self {
        Self { faces: [None; 6] }
    }

    /// Store the grid observed for `slot`
    pub fn set(&mut self, slot: SlotPosition, grid: FaceGrid) {
        self.faces[slot.index()] = Some(grid);
    }

    pub const fn get(&self, slot: SlotPosition) -> Option<&FaceGrid> {
        self.faces[slot.index()].as_ref()
    }

    /// Number of populated slots
    pub fn filled(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == 6
    }

    /// Freeze into a full state, or `None` while any slot is missing
    pub fn into_state(self) -> Option<CubeState> {
        let mut faces = [FaceGrid::uniform(FaceLabel::Up); 6];
        for (dst, src) in faces.iter_mut().zip(self.faces) {
            *dst = src?;
        }
        Some(CubeState::new(faces))
    }

    /// Drop every scanned slot
    pub fn clear(&mut self) {
        self.faces = [None; 6];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn test_solved_letters() {
        let state = CubeState::solved();
        assert_eq!(state.to_string(), SOLVED);
        assert_eq!(CubeState::from_letters(SOLVED), Some(state));
        assert!(state.is_solved());
        assert_eq!(state.label_counts(), [9; 6]);
    }

    #[test]
    fn test_from_letters_rejects_bad_input() {
        assert!(CubeState::from_letters(&SOLVED[..53]).is_none());
        let mut bad = std::string::String::from(SOLVED);
        bad.replace_range(10..11, "X");
        assert!(CubeState::from_letters(&bad).is_none());
    }

    #[test]
    fn test_front_is_front_slot() {
        let state = CubeState::solved();
        assert_eq!(state.front().center(), FaceLabel::Front);
        assert_eq!(state.face(SlotPosition::Back).center(), FaceLabel::Back);
    }

    #[test]
    fn test_partial_cube_freezes_when_complete() {
        let mut partial = PartialCube::new();
        for slot in SlotPosition::ORDER.iter().take(5) {
            partial.set(*slot, *CubeState::solved().face(*slot));
        }
        assert_eq!(partial.filled(), 5);
        assert!(!partial.is_complete());
        assert!(partial.into_state().is_none());

        partial.set(SlotPosition::Back, FaceGrid::uniform(FaceLabel::Back));
        assert!(partial.is_complete());
        assert_eq!(partial.into_state(), Some(CubeState::solved()));

        partial.clear();
        assert_eq!(partial.filled(), 0);
    }
}
