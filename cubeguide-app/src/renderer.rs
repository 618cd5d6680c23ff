//! Overlay rendering
//!
//! Fills the overlay for each session phase. Row 0 is the headline, row 1
//! the instruction and row 2 a notice that survives until replaced.

use cubeguide_core::config::SamplingLayout;
use cubeguide_core::cube::{FaceLabel, SlotPosition, CELLS_PER_FACE};
use cubeguide_core::moves::{Quarter, Reorientation};
use cubeguide_core::plan::{Plan, Step};
use cubeguide_core::scan::ScanProgress;
use cubeguide_core::state::{CancelReason, Feedback};
use cubeguide_display::{hint_arrows, Overlay};
use cubeguide_protocol::StatusKind;

/// Letters read on the nine stickers
pub type CellLabels = [Option<FaceLabel>; CELLS_PER_FACE];

const HEADLINE: usize = 0;
const INSTRUCTION: usize = 1;
const NOTICE: usize = 2;

/// Render the scan phase; `slot` is the slot being scanned
pub fn render_scan(
    overlay: &mut Overlay,
    slot: SlotPosition,
    progress: ScanProgress,
    cells: CellLabels,
) {
    overlay.set_line(
        HEADLINE,
        &format!(
            "Scan ({}/6): show the {} face ({})",
            slot.index() + 1,
            slot.name(),
            slot
        ),
    );
    let (status, instruction) = match progress {
        ScanProgress::Adjusting => (StatusKind::Adjust, "Fit the face in the grid".to_owned()),
        ScanProgress::Holding { needed } => {
            (StatusKind::Holding, format!("Hold steady... ({needed})"))
        }
        ScanProgress::TurnToNext => (StatusKind::Captured, "Show the next face".to_owned()),
        ScanProgress::Captured(done) => {
            overlay.set_line(NOTICE, &format!("{} face captured", done.name()));
            (StatusKind::Captured, "Show the next face".to_owned())
        }
        ScanProgress::Complete => (StatusKind::Thinking, "Scan complete, solving...".to_owned()),
    };
    overlay.set_status(status);
    overlay.set_line(INSTRUCTION, &instruction);
    overlay.set_arrows(&[]);
    overlay.set_cells(Some(cells));
}

/// Render the plan's current step
///
/// Arrows are only drawn while the cube still shows the face from before
/// the step.
pub fn render_move(
    overlay: &mut Overlay,
    layout: &SamplingLayout,
    plan: &Plan,
    feedback: Feedback,
    cells: CellLabels,
) {
    let (Some(token), Some(step)) = (plan.current_token(), plan.current_step()) else {
        return;
    };
    overlay.set_line(
        HEADLINE,
        &format!(
            "Move {}/{}: {}",
            plan.tokens_done() + 1,
            plan.solution().len(),
            token
        ),
    );
    overlay.set_line(INSTRUCTION, &step_text(step));

    let status = match feedback {
        Feedback::TrackingLost => StatusKind::Adjust,
        Feedback::Progress => StatusKind::Moving,
        Feedback::Hint => StatusKind::Hint,
        Feedback::Confirmed => StatusKind::Confirmed,
        Feedback::Cancelled(_) => StatusKind::Aborted,
        Feedback::Ignored => overlay.status(),
    };
    overlay.set_status(status);

    if feedback == Feedback::Hint {
        overlay.set_arrows(&hint_arrows(step, layout));
    } else {
        overlay.set_arrows(&[]);
    }
    overlay.set_cells(Some(cells));
}

/// What the person should do for `step`
pub fn step_text(step: Step) -> String {
    match step {
        Step::Turn { face, quarter } => {
            let direction = match quarter {
                Quarter::Clockwise => "clockwise",
                Quarter::CounterClockwise => "counter-clockwise",
            };
            format!(
                "Turn the {} face {} ({})",
                face.name(),
                direction,
                step.as_move()
            )
        }
        Step::Reorient(r) => {
            let side = match r {
                Reorientation::Y => SlotPosition::Right,
                Reorientation::YPrime => SlotPosition::Left,
            };
            format!(
                "Rotate the cube so the {} face is in front ({})",
                side.name(),
                r
            )
        }
    }
}

pub fn render_solved(overlay: &mut Overlay, moves: usize) {
    overlay.clear();
    overlay.set_status(StatusKind::Solved);
    overlay.set_line(HEADLINE, "Cube solved!");
    overlay.set_line(INSTRUCTION, &format!("{moves} moves"));
}

pub fn render_aborted(overlay: &mut Overlay, reason: CancelReason) {
    overlay.clear();
    overlay.set_status(StatusKind::Aborted);
    overlay.set_line(HEADLINE, "Stopped");
    let text = match reason {
        CancelReason::UserAbort => "Cancelled by user",
        CancelReason::Inactivity => "No progress for too long",
        CancelReason::SensorLost => "Camera lost",
    };
    overlay.set_line(INSTRUCTION, text);
}

/// Show an error notice; the rest of the overlay is left alone
pub fn render_error(overlay: &mut Overlay, message: &str) {
    overlay.set_status(StatusKind::Error);
    overlay.set_line(NOTICE, message);
}
