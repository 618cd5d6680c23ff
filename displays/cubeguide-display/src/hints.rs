//! Hint arrow geometry
//!
//! Arrows are drawn between sample points of the sampling grid, so they
//! follow the grid wherever it is configured. Cells are numbered row-major
//! as seen by the camera:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```

use cubeguide_core::config::SamplingLayout;
use cubeguide_core::cube::SlotPosition;
use cubeguide_core::moves::{Quarter, Reorientation};
use cubeguide_core::plan::Step;
use cubeguide_protocol::Arrow;
use heapless::Vec;

use crate::overlay::MAX_ARROWS;

/// Arrows for one step
pub type HintArrows = Vec<Arrow, MAX_ARROWS>;

/// Inset of the front-face arrows from the corner points, in pixels
const FRONT_INSET: u16 = 10;

/// Arrows showing how to perform `step`
///
/// A Back turn has no hint; plans never ask for one directly.
pub fn hint_arrows(step: Step, layout: &SamplingLayout) -> HintArrows {
    let p = |cell: usize| layout.point(cell);
    let mut arrows = HintArrows::new();
    let mut push = |from: (u16, u16), to: (u16, u16)| {
        // never more than four segments
        let _ = arrows.push(Arrow::new(from, to));
    };

    match step {
        Step::Turn { face, quarter } => {
            let cw = quarter == Quarter::Clockwise;
            let (a, b) = match face {
                SlotPosition::Right => (8, 2),
                SlotPosition::Left => (0, 6),
                SlotPosition::Up => (2, 0),
                SlotPosition::Down => (6, 8),
                SlotPosition::Front => {
                    for (from, to) in front_circle(layout) {
                        if cw {
                            push(from, to);
                        } else {
                            push(to, from);
                        }
                    }
                    return arrows;
                }
                SlotPosition::Back => return arrows,
            };
            if cw {
                push(p(a), p(b));
            } else {
                push(p(b), p(a));
            }
        }
        Step::Reorient(r) => {
            for (left, right) in [(6, 8), (3, 5), (0, 2)] {
                match r {
                    Reorientation::Y => push(p(left), p(right)),
                    Reorientation::YPrime => push(p(right), p(left)),
                }
            }
        }
    }
    arrows
}

/// Four segments circling the corner points clockwise
fn front_circle(layout: &SamplingLayout) -> [((u16, u16), (u16, u16)); 4] {
    let (x0, y0) = layout.point(0);
    let (x2, y2) = layout.point(2);
    let (x6, y6) = layout.point(6);
    let (x8, y8) = layout.point(8);
    let d = FRONT_INSET;
    [
        ((x8.saturating_sub(d), y8), (x6, y6.saturating_add(d))),
        ((x6, y6.saturating_sub(d)), (x0.saturating_add(d), y0)),
        ((x0.saturating_add(d), y0), (x2, y2.saturating_sub(d))),
        ((x2, y2.saturating_add(d)), (x8.saturating_sub(d), y8)),
    ]
}
