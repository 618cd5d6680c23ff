//! Pure move application
//!
//! Every face turn is a face rotation plus a four-band cycle of the stickers
//! bordering that face. The clockwise band tables below are the only
//! definition of each turn; counter-clockwise runs the same table backwards
//! and half turns are two clockwise quarters.

use crate::cube::{CubeState, SlotPosition};

use super::token::{Move, MoveToken, Quarter, Reorientation, Turn};

use crate::cube::SlotPosition::{Back as B, Down as D, Front as F, Left as L, Right as R, Up as U};

/// Three stickers on one slot, in transfer order
#[derive(Debug, Clone, Copy)]
struct Band {
    slot: SlotPosition,
    cells: [usize; 3],
}

const fn band(slot: SlotPosition, cells: [usize; 3]) -> Band {
    Band { slot, cells }
}

/// Clockwise turn: `dst.cells[k]` receives the old `src.cells[k]`
#[derive(Debug, Clone, Copy)]
struct Transfer {
    dst: Band,
    src: Band,
}

const fn transfer(dst: Band, src: Band) -> Transfer {
    Transfer { dst, src }
}

const RIGHT_CW: [Transfer; 4] = [
    transfer(band(U, [2, 5, 8]), band(F, [2, 5, 8])),
    transfer(band(F, [2, 5, 8]), band(D, [2, 5, 8])),
    transfer(band(D, [2, 5, 8]), band(B, [6, 3, 0])),
    transfer(band(B, [6, 3, 0]), band(U, [2, 5, 8])),
];

const LEFT_CW: [Transfer; 4] = [
    transfer(band(U, [0, 3, 6]), band(B, [8, 5, 2])),
    transfer(band(F, [0, 3, 6]), band(U, [0, 3, 6])),
    transfer(band(D, [0, 3, 6]), band(F, [0, 3, 6])),
    transfer(band(B, [8, 5, 2]), band(D, [0, 3, 6])),
];

const UP_CW: [Transfer; 4] = [
    transfer(band(F, [0, 1, 2]), band(R, [0, 1, 2])),
    transfer(band(R, [0, 1, 2]), band(B, [0, 1, 2])),
    transfer(band(B, [0, 1, 2]), band(L, [0, 1, 2])),
    transfer(band(L, [0, 1, 2]), band(F, [0, 1, 2])),
];

const DOWN_CW: [Transfer; 4] = [
    transfer(band(F, [6, 7, 8]), band(L, [6, 7, 8])),
    transfer(band(L, [6, 7, 8]), band(B, [6, 7, 8])),
    transfer(band(B, [6, 7, 8]), band(R, [6, 7, 8])),
    transfer(band(R, [6, 7, 8]), band(F, [6, 7, 8])),
];

const FRONT_CW: [Transfer; 4] = [
    transfer(band(U, [6, 7, 8]), band(L, [8, 5, 2])),
    transfer(band(R, [0, 3, 6]), band(U, [6, 7, 8])),
    transfer(band(D, [0, 1, 2]), band(R, [6, 3, 0])),
    transfer(band(L, [2, 5, 8]), band(D, [0, 1, 2])),
];

const BACK_CW: [Transfer; 4] = [
    transfer(band(U, [0, 1, 2]), band(R, [2, 5, 8])),
    transfer(band(R, [2, 5, 8]), band(D, [8, 7, 6])),
    transfer(band(D, [8, 7, 6]), band(L, [6, 3, 0])),
    transfer(band(L, [6, 3, 0]), band(U, [0, 1, 2])),
];

const fn bands_for(face: SlotPosition) -> &'static [Transfer; 4] {
    match face {
        SlotPosition::Up => &UP_CW,
        SlotPosition::Right => &RIGHT_CW,
        SlotPosition::Front => &FRONT_CW,
        SlotPosition::Down => &DOWN_CW,
        SlotPosition::Left => &LEFT_CW,
        SlotPosition::Back => &BACK_CW,
    }
}

/// Apply any move, returning the new state
pub fn apply(state: &CubeState, mv: Move) -> CubeState {
    match mv {
        Move::Token(token) => apply_token(state, token),
        Move::Reorient(r) => reorient(state, r),
    }
}

/// Apply one of the 18 face turns
pub fn apply_token(state: &CubeState, token: MoveToken) -> CubeState {
    match token.turn {
        Turn::Clockwise => quarter(state, token.face, Quarter::Clockwise),
        Turn::CounterClockwise => quarter(state, token.face, Quarter::CounterClockwise),
        Turn::Half => {
            let once = quarter(state, token.face, Quarter::Clockwise);
            quarter(&once, token.face, Quarter::Clockwise)
        }
    }
}

/// Turn `face` by 90°
pub fn quarter(state: &CubeState, face: SlotPosition, direction: Quarter) -> CubeState {
    let mut next = *state;
    let grid = state.face(face);
    let rotated = match direction {
        Quarter::Clockwise => grid.rotated_cw(),
        Quarter::CounterClockwise => grid.rotated_ccw(),
    };
    next.set_face(face, rotated);

    for t in bands_for(face) {
        let (to, from) = match direction {
            Quarter::Clockwise => (t.dst, t.src),
            Quarter::CounterClockwise => (t.src, t.dst),
        };
        let mut target = *next.face(to.slot);
        for (dst_cell, src_cell) in to.cells.iter().zip(from.cells) {
            target.set_cell(*dst_cell, state.face(from.slot).cell(src_cell));
        }
        next.set_face(to.slot, target);
    }
    next
}

/// Rotate the whole cube about the vertical axis
pub fn reorient(state: &CubeState, r: Reorientation) -> CubeState {
    let face = |slot| *state.face(slot);
    let (front, right, back, left, up, down) = match r {
        Reorientation::Y => (
            face(R),
            face(B),
            face(L),
            face(F),
            face(U).rotated_cw(),
            face(D).rotated_ccw(),
        ),
        Reorientation::YPrime => (
            face(L),
            face(F),
            face(R),
            face(B),
            face(U).rotated_ccw(),
            face(D).rotated_cw(),
        ),
    };

    let mut next = *state;
    next.set_face(F, front);
    next.set_face(R, right);
    next.set_face(B, back);
    next.set_face(L, left);
    next.set_face(U, up);
    next.set_face(D, down);
    next
}

/// Apply a sequence of moves left to right
pub fn apply_all<I>(state: &CubeState, moves: I) -> CubeState
where
    I: IntoIterator,
    I::Item: Into<Move>,
{
    moves
        .into_iter()
        .fold(*state, |acc, mv| apply(&acc, mv.into()))
}
