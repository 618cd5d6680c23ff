//! Session controller
//!
//! The controller is the central loop that:
//! - Polls user input (abort, rescan)
//! - Fetches one frame per iteration and detects the front face
//! - Drives the scan coordinator, then the move confirmation of each step
//! - Commits the cube state once every step of a move is confirmed
//! - Keeps the overlay up to date

use log::{debug, info, trace, warn};

use cubeguide_core::color::{detect_face, read_labels};
use cubeguide_core::config::{ColorCalibration, ConfirmConfig, SessionConfig};
use cubeguide_core::cube::{CubeState, FaceGrid, SlotPosition};
use cubeguide_core::plan::{Advance, Plan, Solution, Step};
use cubeguide_core::safety::{InactivityMonitor, WatchdogStatus};
use cubeguide_core::scan::{ScanCoordinator, ScanProgress, ScanResult};
use cubeguide_core::state::{CancelReason, Feedback, MoveConfirmation};
use cubeguide_core::traits::{Frame, FrameSource, InputSource, SensorError, SolverOracle};
use cubeguide_display::{refresh, Overlay, OverlayBackend};
use cubeguide_protocol::InputEvent;

use crate::error::SessionError;
use crate::renderer::{
    render_aborted, render_error, render_move, render_scan, render_solved, CellLabels,
};

/// Where a session is, or how it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Scanning,
    Solving,
    Solved,
    Aborted,
}

/// Result of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub phase: SessionPhase,
    pub cancel_reason: Option<CancelReason>,
    /// State after the last fully confirmed move; `None` if the scan never finished
    pub committed: Option<CubeState>,
    pub moves_done: usize,
    pub moves_total: usize,
}

/// Walking the person through a solution
struct SolveSession {
    plan: Plan,
    /// State after the last fully confirmed token
    committed: CubeState,
    /// State after the last confirmed step
    working: CubeState,
    pending: MoveConfirmation,
    watchdog: InactivityMonitor,
    last_seen: Option<FaceGrid>,
}

enum Phase {
    Scanning,
    Solving(SolveSession),
    Done(SessionOutcome),
}

/// One guidance session over a camera, an oracle, an input and a renderer
pub struct Controller<S, O, I, B> {
    source: S,
    solver: O,
    input: I,
    backend: B,
    calibration: ColorCalibration,
    config: SessionConfig,
    scan: ScanCoordinator,
    phase: Phase,
    overlay: Overlay,
    /// Source time of the previous frame or skipped frame (ms)
    last_frame_ms: Option<u32>,
}

impl<S, O, I, B> Controller<S, O, I, B>
where
    S: FrameSource,
    O: SolverOracle,
    I: InputSource,
    B: OverlayBackend,
{
    pub fn new(
        source: S,
        solver: O,
        input: I,
        backend: B,
        calibration: ColorCalibration,
        config: SessionConfig,
    ) -> Self {
        Self {
            source,
            solver,
            input,
            backend,
            calibration,
            scan: ScanCoordinator::new(config.scan),
            config,
            phase: Phase::Scanning,
            overlay: Overlay::new(),
            last_frame_ms: None,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> SessionPhase {
        match &self.phase {
            Phase::Scanning => SessionPhase::Scanning,
            Phase::Solving(_) => SessionPhase::Solving,
            Phase::Done(outcome) => outcome.phase,
        }
    }

    #[cfg(test)]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[cfg(test)]
    pub fn solver(&self) -> &O {
        &self.solver
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run until the cube is solved or the session is cancelled
    pub fn run(&mut self) -> SessionOutcome {
        info!("Session started, show the {} face", self.slot_name());
        loop {
            if let Some(outcome) = self.tick() {
                info!(
                    "Session ended: {:?} after {}/{} moves",
                    outcome.phase, outcome.moves_done, outcome.moves_total
                );
                return outcome;
            }
        }
    }

    /// One loop iteration
    ///
    /// Returns the outcome once the session has ended.
    pub fn tick(&mut self) -> Option<SessionOutcome> {
        if let Phase::Done(outcome) = &self.phase {
            return Some(outcome.clone());
        }

        if let Some(event) = self.input.poll_input() {
            self.handle_input(event);
        }

        if !matches!(self.phase, Phase::Done(_)) {
            match self.source.next_frame() {
                Ok(frame) => self.process_frame(&frame),
                Err(SensorError::FrameUnavailable) => {
                    trace!("frame unavailable");
                    self.skip_frame();
                }
                Err(SensorError::Disconnected) => {
                    warn!("Camera disconnected");
                    self.cancel(CancelReason::SensorLost);
                }
            }
        }

        if let Err(err) = refresh(&mut self.backend, &mut self.overlay) {
            warn!("Overlay not presented: {}", err);
        }

        match &self.phase {
            Phase::Done(outcome) => Some(outcome.clone()),
            _ => None,
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        let scanning = matches!(self.phase, Phase::Scanning);
        match event {
            InputEvent::Abort => self.cancel(CancelReason::UserAbort),
            InputEvent::Rescan if scanning => {
                info!("Rescan requested");
                self.scan.restart();
            }
            InputEvent::Rescan => debug!("Rescan ignored while solving"),
        }
    }

    /// Time since the previous frame or skipped frame
    fn advance_clock(&mut self, now: u32) -> u32 {
        let delta_ms = self.last_frame_ms.map_or(0, |last| now.wrapping_sub(last));
        self.last_frame_ms = Some(now);
        delta_ms
    }

    /// A dropped frame still counts toward inactivity
    fn skip_frame(&mut self) {
        let Some(now) = self.source.clock_ms() else {
            return;
        };
        let delta_ms = self.advance_clock(now);
        let Phase::Solving(session) = &mut self.phase else {
            return;
        };
        session.watchdog.update_time(delta_ms);
        if session.watchdog.check() == WatchdogStatus::Expired {
            warn!("No frames for {} ms", session.watchdog.idle_ms());
            self.cancel(CancelReason::Inactivity);
        }
    }

    fn process_frame(&mut self, frame: &S::Frame) {
        let delta_ms = self.advance_clock(frame.timestamp_ms());

        let (detection, cells) = self.read(frame);
        match self.phase {
            Phase::Scanning => self.scan_step(detection, cells),
            Phase::Solving(_) => self.solve_step(detection, cells, delta_ms),
            Phase::Done(_) => {}
        }
    }

    /// Detect the front face, plus per-cell labels for the overlay
    fn read(&self, frame: &S::Frame) -> (Option<FaceGrid>, CellLabels) {
        match detect_face(frame, &self.config.layout, &self.calibration) {
            Ok(grid) => (Some(grid), core::array::from_fn(|i| Some(grid.cell(i)))),
            Err(err) => {
                trace!("no detection: {}", err);
                (None, read_labels(frame, &self.config.layout, &self.calibration))
            }
        }
    }

    fn slot_name(&self) -> &'static str {
        self.scan.current_slot().map_or("-", |slot| slot.name())
    }

    fn scan_step(&mut self, detection: Option<FaceGrid>, cells: CellLabels) {
        let Some(slot) = self.scan.current_slot() else {
            return;
        };
        let progress = self.scan.observe(detection);
        match progress {
            ScanProgress::Captured(done) => {
                info!("Captured {} face, show the {} face", done.name(), self.slot_name());
            }
            ScanProgress::Complete => info!("Captured {} face, scan complete", slot.name()),
            ScanProgress::Adjusting | ScanProgress::Holding { .. } | ScanProgress::TurnToNext => {}
        }

        render_scan(
            &mut self.overlay,
            self.scan.current_slot().unwrap_or(slot),
            progress,
            cells,
        );

        if progress == ScanProgress::Complete {
            if let Err(err) = self.solve_scan() {
                warn!("{}, restarting scan", err);
                self.scan.restart();
                render_error(&mut self.overlay, &format!("{err}, scan again"));
            }
        }
    }

    /// Ask the oracle once and start guiding
    fn solve_scan(&mut self) -> Result<(), SessionError> {
        let result = self.scan.finish()?;
        info!("Facelets: {}", result.facelets);
        for slot in SlotPosition::ORDER {
            debug!("  {} slot shows color {}", slot, result.map.color_at(slot));
        }

        let text = self.solver.solve(&result.facelets)?;
        let solution = Solution::parse(&text)?;
        info!("Solution ({} moves): {}", solution.len(), text);
        self.start_solving(result, solution);
        Ok(())
    }

    fn start_solving(&mut self, result: ScanResult, solution: Solution) {
        let plan = Plan::new(solution);
        let Some(step) = plan.current_step() else {
            info!("Cube is already solved");
            self.finish_solved(result.state, 0);
            return;
        };

        let pending = confirmation(&result.state, step, self.config.confirm);
        self.phase = Phase::Solving(SolveSession {
            plan,
            committed: result.state,
            working: result.state,
            pending,
            watchdog: InactivityMonitor::new(self.config.inactivity_timeout_ms),
            last_seen: None,
        });
    }

    fn solve_step(&mut self, detection: Option<FaceGrid>, cells: CellLabels, delta_ms: u32) {
        let Phase::Solving(session) = &mut self.phase else {
            return;
        };

        if detection.is_some() && detection != session.last_seen {
            session.watchdog.progress();
            session.last_seen = detection;
        }
        session.watchdog.update_time(delta_ms);

        let feedback = session.pending.step(detection);
        render_move(
            &mut self.overlay,
            &self.config.layout,
            &session.plan,
            feedback,
            cells,
        );

        if feedback != Feedback::Confirmed {
            if session.watchdog.check() == WatchdogStatus::Expired {
                warn!("No progress for {} ms", session.watchdog.idle_ms());
                self.cancel(CancelReason::Inactivity);
            }
            return;
        }

        let Some(step) = session.plan.current_step() else {
            return;
        };
        debug!("Step {} confirmed", step.as_move());
        session.working = step.apply(&session.working);

        match session.plan.advance() {
            Advance::Step => {}
            Advance::TokenDone => {
                session.committed = session.working;
                info!(
                    "Move {}/{} done",
                    session.plan.tokens_done(),
                    session.plan.solution().len()
                );
            }
            Advance::Finished => {
                let (state, moves) = (session.working, session.plan.solution().len());
                info!("Move {moves}/{moves} done");
                self.finish_solved(state, moves);
                return;
            }
        }

        if let Some(next) = session.plan.current_step() {
            session.pending = confirmation(&session.working, next, self.config.confirm);
            session.watchdog = InactivityMonitor::new(self.config.inactivity_timeout_ms);
        }
    }

    fn finish_solved(&mut self, state: CubeState, moves: usize) {
        if !state.is_solved() {
            warn!("Plan finished but the tracked state is not solved");
        }
        render_solved(&mut self.overlay, moves);
        self.phase = Phase::Done(SessionOutcome {
            phase: SessionPhase::Solved,
            cancel_reason: None,
            committed: Some(state),
            moves_done: moves,
            moves_total: moves,
        });
    }

    /// End the session; the committed state is kept as it is
    fn cancel(&mut self, reason: CancelReason) {
        let outcome = match &mut self.phase {
            Phase::Scanning => SessionOutcome {
                phase: SessionPhase::Aborted,
                cancel_reason: Some(reason),
                committed: None,
                moves_done: 0,
                moves_total: 0,
            },
            Phase::Solving(session) => {
                session.pending.abort(reason);
                SessionOutcome {
                    phase: SessionPhase::Aborted,
                    cancel_reason: Some(reason),
                    committed: Some(session.committed),
                    moves_done: session.plan.tokens_done(),
                    moves_total: session.plan.solution().len(),
                }
            }
            Phase::Done(_) => return,
        };
        info!("Session cancelled: {:?}", reason);
        render_aborted(&mut self.overlay, reason);
        self.phase = Phase::Done(outcome);
    }
}

/// Confirmation for `step` taken from `working`
fn confirmation(working: &CubeState, step: Step, config: ConfirmConfig) -> MoveConfirmation {
    let expected = step.apply(working);
    debug!("Next step {}: expecting front {}", step.as_move(), expected.front());
    MoveConfirmation::new(*expected.front(), *working.front(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use cubeguide_core::color::{ColorRange, Hsv};
    use cubeguide_core::config::SamplingLayout;
    use cubeguide_core::cube::{FaceLabel, SlotPosition, CELLS_PER_FACE};
    use cubeguide_core::moves::{apply, apply_token, MoveToken, Reorientation};
    use cubeguide_core::scan::FaceletString;
    use cubeguide_core::traits::{SolverError, MAX_SOLUTION_TEXT};
    use cubeguide_display::DisplayError;
    use cubeguide_protocol::StatusKind;

    use crate::sensing::ReplayFrame;

    const FRAME_MS: u32 = 33;

    /// Label `i` owns hues `20 i ..= 20 i + 19`
    fn calibration() -> ColorCalibration {
        let mut calibration = ColorCalibration::new();
        for label in FaceLabel::ALL {
            let low = label.index() as u8 * 20;
            calibration.insert(
                label,
                ColorRange::new(Hsv::new(low, 0, 0), Hsv::new(low + 19, 255, 255)),
            );
        }
        calibration
    }

    fn hsv_for(label: FaceLabel) -> Hsv {
        Hsv::new(label.index() as u8 * 20 + 5, 200, 200)
    }

    /// Camera replaying a scripted sequence, then disconnecting
    #[derive(Default)]
    struct Script {
        frames: VecDeque<(u32, Result<ReplayFrame, SensorError>)>,
        clock: u32,
        now: Option<u32>,
    }

    impl Script {
        fn show(mut self, face: &FaceGrid, count: usize) -> Self {
            let samples: [Hsv; CELLS_PER_FACE] = core::array::from_fn(|i| hsv_for(face.cell(i)));
            for _ in 0..count {
                let frame = ReplayFrame::new(SamplingLayout::default(), samples, self.clock);
                self.frames.push_back((self.clock, Ok(frame)));
                self.clock += FRAME_MS;
            }
            self
        }

        fn unavailable(mut self) -> Self {
            self.frames
                .push_back((self.clock, Err(SensorError::FrameUnavailable)));
            self.clock += FRAME_MS;
            self
        }

        fn scan(mut self, state: &CubeState) -> Self {
            for slot in SlotPosition::ORDER {
                self = self.show(state.face(slot), 3);
            }
            self
        }
    }

    impl FrameSource for Script {
        type Frame = ReplayFrame;

        fn next_frame(&mut self) -> Result<ReplayFrame, SensorError> {
            let (at, next) = self
                .frames
                .pop_front()
                .unwrap_or((self.clock, Err(SensorError::Disconnected)));
            self.now = Some(at);
            next
        }

        fn clock_ms(&self) -> Option<u32> {
            self.now
        }
    }

    struct FakeSolver {
        answer: Result<&'static str, SolverError>,
        calls: usize,
    }

    impl FakeSolver {
        fn answering(answer: &'static str) -> Self {
            Self {
                answer: Ok(answer),
                calls: 0,
            }
        }
    }

    impl SolverOracle for FakeSolver {
        fn solve(
            &mut self,
            _facelets: &FaceletString,
        ) -> Result<heapless::String<MAX_SOLUTION_TEXT>, SolverError> {
            self.calls += 1;
            let mut text = heapless::String::new();
            text.push_str(self.answer?).unwrap();
            Ok(text)
        }
    }

    /// Sends Abort on the given poll (0-based)
    #[derive(Default)]
    struct ScriptedInput {
        abort_at: Option<usize>,
        polls: usize,
    }

    impl InputSource for ScriptedInput {
        fn poll_input(&mut self) -> Option<InputEvent> {
            let poll = self.polls;
            self.polls += 1;
            (Some(poll) == self.abort_at).then_some(InputEvent::Abort)
        }
    }

    #[derive(Default)]
    struct Recorder {
        statuses: Vec<StatusKind>,
    }

    impl OverlayBackend for Recorder {
        fn present(&mut self, overlay: &Overlay) -> Result<(), DisplayError> {
            self.statuses.push(overlay.status());
            Ok(())
        }
    }

    type TestController = Controller<Script, FakeSolver, ScriptedInput, Recorder>;

    fn controller(script: Script, solver: FakeSolver, input: ScriptedInput) -> TestController {
        controller_with(script, solver, input, SessionConfig::default())
    }

    fn controller_with(
        script: Script,
        solver: FakeSolver,
        input: ScriptedInput,
        config: SessionConfig,
    ) -> TestController {
        Controller::new(
            script,
            solver,
            input,
            Recorder::default(),
            calibration(),
            config,
        )
    }

    fn abort_at(poll: usize) -> ScriptedInput {
        ScriptedInput {
            abort_at: Some(poll),
            polls: 0,
        }
    }

    fn token(text: &str) -> MoveToken {
        MoveToken::parse(text).unwrap()
    }

    #[test]
    fn test_solved_cube_skips_empty_solution() {
        let solved = CubeState::solved();
        let mut ctrl = controller(
            Script::default().scan(&solved),
            FakeSolver::answering(""),
            ScriptedInput::default(),
        );
        let outcome = ctrl.run();

        assert_eq!(outcome.phase, SessionPhase::Solved);
        assert_eq!(outcome.committed, Some(solved));
        assert_eq!(outcome.moves_total, 0);
        assert_eq!(ctrl.solver().calls, 1);
        assert_eq!(ctrl.overlay().status(), StatusKind::Solved);
    }

    #[test]
    fn test_unavailable_frames_are_skipped() {
        let solved = CubeState::solved();
        let script = Script::default()
            .unavailable()
            .show(solved.face(SlotPosition::Up), 2)
            .unavailable()
            .show(solved.face(SlotPosition::Up), 1);
        let script = SlotPosition::ORDER[1..]
            .iter()
            .fold(script, |s, slot| s.show(solved.face(*slot), 3));

        let mut ctrl = controller(script, FakeSolver::answering(""), ScriptedInput::default());
        assert_eq!(ctrl.run().phase, SessionPhase::Solved);
    }

    #[test]
    fn test_confirmed_move_commits_state() {
        let solved = CubeState::solved();
        let after = apply_token(&solved, token("R"));
        let script = Script::default()
            .scan(&solved)
            .show(solved.front(), 2)
            .show(after.front(), 3);

        let mut ctrl = controller(script, FakeSolver::answering("R"), ScriptedInput::default());
        let outcome = ctrl.run();

        assert_eq!(outcome.phase, SessionPhase::Solved);
        assert_eq!(outcome.committed, Some(after));
        assert_eq!(outcome.moves_done, 1);
        assert_eq!(ctrl.solver().calls, 1);
        assert!(ctrl.backend().statuses.contains(&StatusKind::Hint));
    }

    #[test]
    fn test_abort_keeps_committed_state() {
        let solved = CubeState::solved();
        let after_r = apply_token(&solved, token("R"));
        let script = Script::default()
            .scan(&solved)
            .show(after_r.front(), 3)
            .show(after_r.front(), 1);

        // 18 scan frames, 3 to confirm R, 1 before the abort
        let mut ctrl = controller(script, FakeSolver::answering("R U"), abort_at(22));
        let outcome = ctrl.run();

        assert_eq!(outcome.phase, SessionPhase::Aborted);
        assert_eq!(outcome.cancel_reason, Some(CancelReason::UserAbort));
        assert_eq!(outcome.committed, Some(after_r));
        assert_eq!(outcome.moves_done, 1);
        assert_eq!(outcome.moves_total, 2);
        assert_eq!(ctrl.overlay().status(), StatusKind::Aborted);
    }

    #[test]
    fn test_partial_back_move_is_not_committed() {
        let solved = CubeState::solved();
        let turned = apply(&solved, Reorientation::Y.into());
        let script = Script::default().scan(&solved).show(turned.front(), 3);

        // B is y, R, y'; only the y is confirmed
        let mut ctrl = controller(script, FakeSolver::answering("B"), abort_at(21));
        let outcome = ctrl.run();

        assert_eq!(outcome.phase, SessionPhase::Aborted);
        assert_eq!(outcome.committed, Some(solved));
        assert_eq!(outcome.moves_done, 0);
    }

    #[test]
    fn test_back_move_through_reorientation() {
        let solved = CubeState::solved();
        let y = apply(&solved, Reorientation::Y.into());
        let y_r = apply_token(&y, token("R"));
        let done = apply_token(&solved, token("B"));
        assert_eq!(apply(&y_r, Reorientation::YPrime.into()), done);

        let script = Script::default()
            .scan(&solved)
            .show(y.front(), 3)
            .show(y_r.front(), 3)
            .show(done.front(), 3);
        let mut ctrl = controller(script, FakeSolver::answering("B"), ScriptedInput::default());
        let outcome = ctrl.run();

        assert_eq!(outcome.phase, SessionPhase::Solved);
        assert_eq!(outcome.committed, Some(done));
    }

    #[test]
    fn test_face_held_past_capture_is_stored_once() {
        let solved = CubeState::solved();
        let script = SlotPosition::ORDER
            .iter()
            .fold(Script::default(), |s, slot| s.show(solved.face(*slot), 10));

        let mut ctrl = controller(script, FakeSolver::answering(""), ScriptedInput::default());
        let outcome = ctrl.run();

        assert_eq!(outcome.phase, SessionPhase::Solved);
        assert_eq!(outcome.committed, Some(solved));
        assert_eq!(ctrl.solver().calls, 1);
        assert!(!ctrl.backend().statuses.contains(&StatusKind::Error));
    }

    #[test]
    fn test_duplicate_center_restarts_scan() {
        let solved = CubeState::solved();
        // the Up face comes back in place of the Front face
        let script = [
            SlotPosition::Up,
            SlotPosition::Right,
            SlotPosition::Up,
            SlotPosition::Down,
            SlotPosition::Left,
            SlotPosition::Back,
        ]
        .iter()
        .fold(Script::default(), |s, slot| s.show(solved.face(*slot), 3))
        .scan(&solved);

        let mut ctrl = controller(script, FakeSolver::answering(""), ScriptedInput::default());
        let outcome = ctrl.run();

        assert_eq!(outcome.phase, SessionPhase::Solved);
        assert_eq!(ctrl.solver().calls, 1);
        assert!(ctrl.backend().statuses.contains(&StatusKind::Error));
    }

    #[test]
    fn test_solver_failure_restarts_scan() {
        let solved = CubeState::solved();
        let solver = FakeSolver {
            answer: Err(SolverError::Rejected),
            calls: 0,
        };
        let mut ctrl = controller(
            Script::default().scan(&solved),
            solver,
            ScriptedInput::default(),
        );
        let outcome = ctrl.run();

        assert_eq!(ctrl.solver().calls, 1);
        assert_eq!(outcome.phase, SessionPhase::Aborted);
        assert_eq!(outcome.cancel_reason, Some(CancelReason::SensorLost));
        assert_eq!(outcome.committed, None);
    }

    #[test]
    fn test_bad_solution_restarts_scan() {
        let solved = CubeState::solved();
        let mut ctrl = controller(
            Script::default().scan(&solved),
            FakeSolver::answering("R X"),
            ScriptedInput::default(),
        );
        let outcome = ctrl.run();
        assert_eq!(outcome.committed, None);
        assert_eq!(ctrl.phase(), SessionPhase::Aborted);
    }

    #[test]
    fn test_disconnect_during_move() {
        let solved = CubeState::solved();
        let mut ctrl = controller(
            Script::default().scan(&solved),
            FakeSolver::answering("R"),
            ScriptedInput::default(),
        );
        let outcome = ctrl.run();

        assert_eq!(outcome.cancel_reason, Some(CancelReason::SensorLost));
        assert_eq!(outcome.committed, Some(solved));
        assert_eq!(outcome.moves_total, 1);
    }

    #[test]
    fn test_inactivity_cancels_pending_move() {
        let solved = CubeState::solved();
        let config = SessionConfig {
            inactivity_timeout_ms: Some(100),
            ..SessionConfig::default()
        };
        let script = Script::default().scan(&solved).show(solved.front(), 10);
        let mut ctrl = controller_with(
            script,
            FakeSolver::answering("R"),
            ScriptedInput::default(),
            config,
        );
        let outcome = ctrl.run();

        assert_eq!(outcome.cancel_reason, Some(CancelReason::Inactivity));
        assert_eq!(outcome.committed, Some(solved));
    }

    #[test]
    fn test_dropped_frames_count_toward_inactivity() {
        let solved = CubeState::solved();
        let config = SessionConfig {
            inactivity_timeout_ms: Some(100),
            ..SessionConfig::default()
        };
        let script = (0..10).fold(Script::default().scan(&solved), |s, _| s.unavailable());
        let mut ctrl = controller_with(
            script,
            FakeSolver::answering("R"),
            ScriptedInput::default(),
            config,
        );
        let outcome = ctrl.run();

        assert_eq!(outcome.cancel_reason, Some(CancelReason::Inactivity));
        assert_eq!(outcome.committed, Some(solved));
    }

    #[test]
    fn test_dropped_frames_while_scanning_do_not_cancel() {
        let solved = CubeState::solved();
        let config = SessionConfig {
            inactivity_timeout_ms: Some(100),
            ..SessionConfig::default()
        };
        let script = (0..10).fold(Script::default(), |s, _| s.unavailable()).scan(&solved);
        let mut ctrl = controller_with(
            script,
            FakeSolver::answering(""),
            ScriptedInput::default(),
            config,
        );
        assert_eq!(ctrl.run().phase, SessionPhase::Solved);
    }

    #[test]
    fn test_abort_while_scanning() {
        let solved = CubeState::solved();
        let mut ctrl = controller(
            Script::default().scan(&solved),
            FakeSolver::answering(""),
            abort_at(4),
        );
        let outcome = ctrl.run();

        assert_eq!(outcome.cancel_reason, Some(CancelReason::UserAbort));
        assert_eq!(outcome.committed, None);
        assert_eq!(ctrl.solver().calls, 0);
    }

    #[test]
    fn test_finished_session_is_sticky() {
        let solved = CubeState::solved();
        let mut ctrl = controller(
            Script::default().scan(&solved),
            FakeSolver::answering(""),
            ScriptedInput::default(),
        );
        let outcome = ctrl.run();
        assert_eq!(ctrl.tick(), Some(outcome));
        assert_eq!(ctrl.solver().calls, 1);
    }
}
