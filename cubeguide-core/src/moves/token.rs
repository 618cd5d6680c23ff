//! Move notation
//!
//! Oracle tokens (`R`, `U'`, `F2`, ...) are parsed once at the boundary into
//! closed enums; everything downstream matches on them exhaustively.

use core::fmt;

use crate::cube::SlotPosition;

/// How far a face turns, seen from outside that face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    pub const fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    /// Notation suffix
    pub const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }
}

/// A single 90° turn, the unit a person performs and the camera confirms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Quarter {
    Clockwise,
    CounterClockwise,
}

impl Quarter {
    pub const fn inverse(self) -> Self {
        match self {
            Quarter::Clockwise => Quarter::CounterClockwise,
            Quarter::CounterClockwise => Quarter::Clockwise,
        }
    }
}

impl From<Quarter> for Turn {
    fn from(quarter: Quarter) -> Self {
        match quarter {
            Quarter::Clockwise => Turn::Clockwise,
            Quarter::CounterClockwise => Turn::CounterClockwise,
        }
    }
}

/// One of the 18 face turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveToken {
    pub face: SlotPosition,
    pub turn: Turn,
}

impl MoveToken {
    /// Every face turn, grouped by face in slot order
    pub const ALL: [MoveToken; 18] = {
        let mut all = [MoveToken::new(SlotPosition::Up, Turn::Clockwise); 18];
        let turns = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];
        let mut i = 0;
        while i < 18 {
            all[i] = MoveToken::new(SlotPosition::ORDER[i / 3], turns[i % 3]);
            i += 1;
        }
        all
    };

    pub const fn new(face: SlotPosition, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// The token that undoes this one
    pub const fn inverse(self) -> Self {
        Self::new(self.face, self.turn.inverse())
    }

    /// Parse oracle notation such as `R`, `R'` or `R2`
    ///
    /// Surrounding whitespace is ignored. Anything else is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let mut chars = text.chars();
        let face = SlotPosition::from_char(chars.next()?)?;
        let turn = match chars.next() {
            None => Turn::Clockwise,
            Some('\'') => Turn::CounterClockwise,
            Some('2') => Turn::Half,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(face, turn))
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.as_char(), self.turn.suffix())
    }
}

/// Whole-cube rotation about the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reorientation {
    /// Right face comes to the front
    Y,
    /// Left face comes to the front
    YPrime,
}

impl Reorientation {
    pub const fn inverse(self) -> Self {
        match self {
            Reorientation::Y => Reorientation::YPrime,
            Reorientation::YPrime => Reorientation::Y,
        }
    }
}

impl fmt::Display for Reorientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reorientation::Y => write!(f, "y"),
            Reorientation::YPrime => write!(f, "y'"),
        }
    }
}

/// Anything the move engine can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Move {
    Token(MoveToken),
    Reorient(Reorientation),
}

impl Move {
    pub const fn inverse(self) -> Self {
        match self {
            Move::Token(token) => Move::Token(token.inverse()),
            Move::Reorient(r) => Move::Reorient(r.inverse()),
        }
    }
}

impl From<MoveToken> for Move {
    fn from(token: MoveToken) -> Self {
        Move::Token(token)
    }
}

impl From<Reorientation> for Move {
    fn from(r: Reorientation) -> Self {
        Move::Reorient(r)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Token(token) => token.fmt(f),
            Move::Reorient(r) => r.fmt(f),
        }
    }
}
