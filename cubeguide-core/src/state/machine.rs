//! State machine definition
//!
//! One `MoveConfirmation` watches one prescribed step. It never touches the
//! cube state; the caller commits the predicted state only after
//! `Feedback::Confirmed`.

use heapless::Deque;

use crate::config::{ConfirmConfig, MAX_CONFIRM_WINDOW};
use crate::cube::FaceGrid;

use super::events::{CancelReason, Event};

/// Confirmation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfirmState {
    /// No usable detection in the window
    #[default]
    Waiting,
    /// Detections are arriving but do not confirm yet
    Stabilizing,
    /// Expected face held long enough
    Confirmed,
    /// Abandoned; the pending move must not be applied
    Cancelled(CancelReason),
}

impl ConfirmState {
    /// Check if no further input can change this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConfirmState::Confirmed | ConfirmState::Cancelled(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use ConfirmState::*;
        use Event::*;

        match (self, event) {
            // Terminal states absorb everything
            (Confirmed, _) => Confirmed,
            (Cancelled(reason), _) => Cancelled(reason),

            (_, Abort(reason)) => Cancelled(reason),
            (_, TrackingLost) => Waiting,
            (_, FaceSeen) => Stabilizing,
            (_, TargetStable) => Confirmed,
        }
    }
}

/// What the caller should show after one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feedback {
    /// Detection failed, ask the person to re-center the cube
    TrackingLost,
    /// Something else is visible; keep going
    Progress,
    /// The cube still shows the pre-move face; point at the move
    Hint,
    /// Move done, commit the predicted state
    Confirmed,
    /// Move abandoned
    Cancelled(CancelReason),
    /// Input arrived after a terminal state
    Ignored,
}

/// Watches detections for one expected front face
#[derive(Debug, Clone)]
pub struct MoveConfirmation {
    expected_after: FaceGrid,
    before: FaceGrid,
    config: ConfirmConfig,
    window: Deque<FaceGrid, MAX_CONFIRM_WINDOW>,
    state: ConfirmState,
}

impl MoveConfirmation {
    /// Start watching for `expected_after`
    ///
    /// `before` is the front face prior to the move, used for hinting.
    pub fn new(expected_after: FaceGrid, before: FaceGrid, config: ConfirmConfig) -> Self {
        Self {
            expected_after,
            before,
            config: config.normalized(),
            window: Deque::new(),
            state: ConfirmState::Waiting,
        }
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn expected_after(&self) -> &FaceGrid {
        &self.expected_after
    }

    pub fn before(&self) -> &FaceGrid {
        &self.before
    }

    /// Number of detections currently held
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Feed one detection (`None` when the face could not be read)
    pub fn step(&mut self, detection: Option<FaceGrid>) -> Feedback {
        if self.state.is_terminal() {
            return Feedback::Ignored;
        }

        let Some(grid) = detection else {
            self.window.clear();
            self.state = self.state.transition(Event::TrackingLost);
            return Feedback::TrackingLost;
        };

        if self.window.len() >= self.config.window as usize {
            self.window.pop_front();
        }
        // capacity is at least the normalized window
        let _ = self.window.push_back(grid);

        if self.target_stable() {
            self.state = self.state.transition(Event::TargetStable);
            return Feedback::Confirmed;
        }

        self.state = self.state.transition(Event::FaceSeen);
        if grid == self.before {
            Feedback::Hint
        } else {
            Feedback::Progress
        }
    }

    /// Cancel unless already terminal
    pub fn abort(&mut self, reason: CancelReason) -> Feedback {
        if self.state.is_terminal() {
            return Feedback::Ignored;
        }
        self.state = self.state.transition(Event::Abort(reason));
        Feedback::Cancelled(reason)
    }

    fn target_stable(&self) -> bool {
        let required = self.config.confirm_frames as usize;
        self.window.len() >= required
            && self
                .window
                .iter()
                .rev()
                .take(required)
                .all(|g| *g == self.expected_after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::CubeState;
    use crate::moves::{apply, Move, MoveToken};

    fn r_move() -> (FaceGrid, FaceGrid) {
        let solved = CubeState::solved();
        let after = apply(&solved, Move::Token(MoveToken::parse("R").unwrap()));
        (*after.front(), *solved.front())
    }

    fn machine() -> (MoveConfirmation, FaceGrid, FaceGrid) {
        let (expected, before) = r_move();
        (
            MoveConfirmation::new(expected, before, ConfirmConfig::default()),
            expected,
            before,
        )
    }

    #[test]
    fn test_three_matches_confirm() {
        let (mut m, x, _) = machine();
        assert_eq!(m.step(Some(x)), Feedback::Progress);
        assert_eq!(m.state(), ConfirmState::Stabilizing);
        assert_eq!(m.step(Some(x)), Feedback::Progress);
        assert_eq!(m.step(Some(x)), Feedback::Confirmed);
        assert_eq!(m.state(), ConfirmState::Confirmed);
    }

    #[test]
    fn test_before_then_target_not_yet_confirmed() {
        let (mut m, x, before) = machine();
        assert_eq!(m.step(Some(before)), Feedback::Hint);
        assert_eq!(m.step(Some(before)), Feedback::Hint);
        assert_eq!(m.step(Some(x)), Feedback::Progress);
        assert_eq!(m.step(Some(x)), Feedback::Progress);
        assert_ne!(m.state(), ConfirmState::Confirmed);
        assert_eq!(m.step(Some(x)), Feedback::Confirmed);
    }

    #[test]
    fn test_none_empties_window() {
        let (mut m, x, _) = machine();
        m.step(Some(x));
        m.step(Some(x));
        assert_eq!(m.step(None), Feedback::TrackingLost);
        assert_eq!(m.window_len(), 0);
        assert_eq!(m.state(), ConfirmState::Waiting);
        m.step(Some(x));
        assert_eq!(m.step(Some(x)), Feedback::Progress);
    }

    #[test]
    fn test_interruption_resets_count() {
        let (mut m, x, _) = machine();
        let other = FaceGrid::uniform(crate::cube::FaceLabel::Down);
        m.step(Some(x));
        m.step(Some(x));
        assert_eq!(m.step(Some(other)), Feedback::Progress);
        m.step(Some(x));
        m.step(Some(x));
        assert_eq!(m.step(Some(x)), Feedback::Confirmed);
    }

    #[test]
    fn test_window_bounded() {
        let (mut m, _, before) = machine();
        for _ in 0..20 {
            m.step(Some(before));
        }
        assert_eq!(m.window_len(), 5);
    }

    #[test]
    fn test_abort_is_terminal() {
        let (mut m, x, _) = machine();
        m.step(Some(x));
        assert_eq!(
            m.abort(CancelReason::UserAbort),
            Feedback::Cancelled(CancelReason::UserAbort)
        );
        assert_eq!(m.state(), ConfirmState::Cancelled(CancelReason::UserAbort));
        assert_eq!(m.step(Some(x)), Feedback::Ignored);
        assert_eq!(m.step(Some(x)), Feedback::Ignored);
        assert_eq!(m.abort(CancelReason::Inactivity), Feedback::Ignored);
        assert_eq!(m.state(), ConfirmState::Cancelled(CancelReason::UserAbort));
    }

    #[test]
    fn test_confirmed_absorbs_input() {
        let (mut m, x, _) = machine();
        for _ in 0..3 {
            m.step(Some(x));
        }
        assert_eq!(m.step(None), Feedback::Ignored);
        assert_eq!(m.abort(CancelReason::SensorLost), Feedback::Ignored);
        assert_eq!(m.state(), ConfirmState::Confirmed);
    }

    #[test]
    fn test_single_frame_config() {
        let (expected, before) = r_move();
        let config = ConfirmConfig {
            window: 1,
            confirm_frames: 1,
        };
        let mut m = MoveConfirmation::new(expected, before, config);
        assert_eq!(m.step(Some(before)), Feedback::Hint);
        assert_eq!(m.step(Some(expected)), Feedback::Confirmed);
    }

    #[test]
    fn test_transition_table() {
        use ConfirmState::*;
        assert_eq!(Waiting.transition(Event::FaceSeen), Stabilizing);
        assert_eq!(Stabilizing.transition(Event::TrackingLost), Waiting);
        assert_eq!(Stabilizing.transition(Event::TargetStable), Confirmed);
        assert_eq!(
            Waiting.transition(Event::Abort(CancelReason::SensorLost)),
            Cancelled(CancelReason::SensorLost)
        );
        assert_eq!(Confirmed.transition(Event::TrackingLost), Confirmed);
    }
}
