//! Token to physical step expansion
//!
//! The camera sees only the front slot. Every step must change the front
//! face so it can be confirmed, and a Back turn never does. Back moves are
//! therefore performed as "turn the cube, turn Right, turn it back".

use heapless::Vec;

use crate::cube::{CubeState, SlotPosition};
use crate::moves::{apply, Move, MoveToken, Quarter, Reorientation, Turn};

/// Most steps a single token expands into (B2)
pub const MAX_STEPS_PER_TOKEN: usize = 4;

/// One physically confirmable action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Quarter turn of one face
    Turn { face: SlotPosition, quarter: Quarter },
    /// Whole-cube rotation
    Reorient(Reorientation),
}

impl Step {
    pub const fn turn(face: SlotPosition, quarter: Quarter) -> Self {
        Step::Turn { face, quarter }
    }

    /// The move-engine equivalent
    pub fn as_move(self) -> Move {
        match self {
            Step::Turn { face, quarter } => Move::Token(MoveToken::new(face, quarter.into())),
            Step::Reorient(r) => Move::Reorient(r),
        }
    }

    /// Predict the state after this step
    pub fn apply(self, state: &CubeState) -> CubeState {
        apply(state, self.as_move())
    }
}

/// Steps for one token
pub type Steps = Vec<Step, MAX_STEPS_PER_TOKEN>;

/// Expand a token into the steps a person performs
pub fn plan_token(token: MoveToken) -> Steps {
    let mut steps = Steps::new();
    let mut push = |step| {
        // at most four steps per token
        let _ = steps.push(step);
    };

    if token.face == SlotPosition::Back {
        push(Step::Reorient(Reorientation::Y));
        for quarter in quarters(token.turn) {
            push(Step::turn(SlotPosition::Right, quarter));
        }
        push(Step::Reorient(Reorientation::YPrime));
    } else {
        for quarter in quarters(token.turn) {
            push(Step::turn(token.face, quarter));
        }
    }
    steps
}

/// Quarter turns making up `turn`; half turns are two clockwise quarters
fn quarters(turn: Turn) -> impl Iterator<Item = Quarter> {
    let (quarter, count) = match turn {
        Turn::Clockwise => (Quarter::Clockwise, 1),
        Turn::CounterClockwise => (Quarter::CounterClockwise, 1),
        Turn::Half => (Quarter::Clockwise, 2),
    };
    core::iter::repeat(quarter).take(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::apply_token;

    fn token(text: &str) -> MoveToken {
        MoveToken::parse(text).unwrap()
    }

    #[test]
    fn test_simple_quarter() {
        let steps = plan_token(token("U'"));
        assert_eq!(
            steps.as_slice(),
            [Step::turn(SlotPosition::Up, Quarter::CounterClockwise)]
        );
    }

    #[test]
    fn test_half_turn_is_two_steps() {
        let steps = plan_token(token("F2"));
        assert_eq!(
            steps.as_slice(),
            [
                Step::turn(SlotPosition::Front, Quarter::Clockwise),
                Step::turn(SlotPosition::Front, Quarter::Clockwise),
            ]
        );
    }

    #[test]
    fn test_back_moves_use_reorientation() {
        let y = Step::Reorient(Reorientation::Y);
        let y_prime = Step::Reorient(Reorientation::YPrime);
        let r = Step::turn(SlotPosition::Right, Quarter::Clockwise);
        let r_prime = Step::turn(SlotPosition::Right, Quarter::CounterClockwise);

        assert_eq!(plan_token(token("B")).as_slice(), [y, r, y_prime]);
        assert_eq!(plan_token(token("B'")).as_slice(), [y, r_prime, y_prime]);
        assert_eq!(plan_token(token("B2")).as_slice(), [y, r, r, y_prime]);
    }

    fn scrambled() -> CubeState {
        crate::moves::apply_all(
            &CubeState::solved(),
            ["R", "U2", "F'", "L", "D", "B'"].map(token),
        )
    }

    #[test]
    fn test_expansion_matches_direct_application() {
        let start = scrambled();
        for t in MoveToken::ALL {
            let stepped = plan_token(t)
                .iter()
                .fold(start, |state, step| step.apply(&state));
            assert_eq!(stepped, apply_token(&start, t), "{t}");
        }
    }

    #[test]
    fn test_every_step_changes_front() {
        let start = scrambled();
        for t in MoveToken::ALL {
            let mut state = start;
            for step in plan_token(t) {
                let next = step.apply(&state);
                assert_ne!(next.front(), state.front(), "{t} step {step:?}");
                state = next;
            }
        }
    }
}
