//! Slot-by-slot scan with stabilization
//!
//! The person shows each slot's face in `SlotPosition::ORDER`. A face is
//! captured once the same reading arrives several frames in a row. After a
//! capture, readings with the captured center are ignored until the person
//! turns another face to the camera.

use heapless::Deque;

use crate::config::{ScanConfig, MAX_SCAN_WINDOW};
use crate::cube::{CubeState, FaceGrid, FaceLabel, PartialCube, SlotPosition};

use super::facelet::{build_facelet_string, ColorPositionMap, FaceletString, ScanError};

/// What one reading did to the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanProgress {
    /// No usable reading; the person should adjust the cube in the grid
    Adjusting,
    /// Reading accepted, `needed` more identical readings to capture
    Holding { needed: u8 },
    /// The face just captured is still in view
    TurnToNext,
    /// The face for this slot was stored
    Captured(SlotPosition),
    /// All six faces are stored
    Complete,
}

/// Everything a finished scan produces
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanResult {
    /// Observed colors per slot
    pub state: CubeState,
    pub map: ColorPositionMap,
    pub facelets: FaceletString,
}

/// Drives acquisition of the six faces
#[derive(Debug, Clone)]
pub struct ScanCoordinator {
    config: ScanConfig,
    partial: PartialCube,
    next: usize,
    window: Deque<FaceGrid, MAX_SCAN_WINDOW>,
    /// Center of the last captured face while it is still shown
    held: Option<FaceLabel>,
}

impl ScanCoordinator {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config: config.normalized(),
            partial: PartialCube::new(),
            next: 0,
            window: Deque::new(),
            held: None,
        }
    }

    /// Slot the person should show next, `None` once complete
    pub fn current_slot(&self) -> Option<SlotPosition> {
        SlotPosition::ORDER.get(self.next).copied()
    }

    /// Number of captured faces
    pub fn captured(&self) -> usize {
        self.next
    }

    pub fn partial(&self) -> &PartialCube {
        &self.partial
    }

    pub fn is_complete(&self) -> bool {
        self.next >= SlotPosition::ORDER.len()
    }

    /// Feed one detection
    pub fn observe(&mut self, reading: Option<FaceGrid>) -> ScanProgress {
        let Some(slot) = self.current_slot() else {
            return ScanProgress::Complete;
        };
        let Some(grid) = reading else {
            self.window.clear();
            return ScanProgress::Adjusting;
        };
        if self.held == Some(grid.center()) {
            return ScanProgress::TurnToNext;
        }
        self.held = None;

        if self.window.len() >= self.config.window as usize {
            self.window.pop_front();
        }
        // capacity is at least the normalized window
        let _ = self.window.push_back(grid);

        let stable = self.window.iter().rev().take_while(|g| **g == grid).count();
        let required = self.config.stable_frames as usize;
        if stable < required {
            return ScanProgress::Holding {
                needed: (required - stable) as u8,
            };
        }

        self.partial.set(slot, grid);
        self.next += 1;
        self.window.clear();
        self.held = Some(grid.center());
        if self.is_complete() {
            ScanProgress::Complete
        } else {
            ScanProgress::Captured(slot)
        }
    }

    /// Build the scan result; call once complete
    pub fn finish(&self) -> Result<ScanResult, ScanError> {
        let (map, facelets) = build_facelet_string(&self.partial)?;
        let state = self.partial.into_state().ok_or(ScanError::IncompleteScan {
            scanned: self.partial.filled() as u8,
        })?;
        Ok(ScanResult {
            state,
            map,
            facelets,
        })
    }

    /// Forget everything and start again from the first slot
    pub fn restart(&mut self) {
        self.partial.clear();
        self.next = 0;
        self.window.clear();
        self.held = None;
    }
}

impl Default for ScanCoordinator {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
