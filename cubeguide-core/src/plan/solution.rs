//! Parsed oracle solutions and the step cursor walking them

use heapless::Vec;
use thiserror::Error;

use crate::moves::MoveToken;

use super::steps::{plan_token, Step, Steps};

/// Longest solution accepted from the oracle
pub const MAX_SOLUTION_MOVES: usize = 32;

/// Solution text that is not a usable move list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Token at `index` (0-based) is not move notation
    #[error("unknown move token at position {index}")]
    UnknownToken { index: usize },
    #[error("solution has more than 32 moves")]
    TooManyMoves,
}

/// Ordered oracle moves; empty means already solved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Solution {
    tokens: Vec<MoveToken, MAX_SOLUTION_MOVES>,
}

impl Solution {
    /// Parse whitespace-separated tokens such as `"R U' F2"`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut tokens = Vec::new();
        for (index, word) in text.split_whitespace().enumerate() {
            let token = MoveToken::parse(word).ok_or(ParseError::UnknownToken { index })?;
            tokens.push(token).map_err(|_| ParseError::TooManyMoves)?;
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[MoveToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Result of advancing the cursor past a confirmed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Advance {
    /// More steps remain in the current token
    Step,
    /// The token is done; the next one (if any) is now current
    TokenDone,
    /// The last step of the last token is done
    Finished,
}

/// Cursor over the physical steps of a solution
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Plan {
    solution: Solution,
    /// Current token index (0-based)
    token_index: usize,
    /// Steps of the current token
    steps: Steps,
    /// Current step within `steps`
    step_index: usize,
}

impl Plan {
    pub fn new(solution: Solution) -> Self {
        let steps = solution
            .tokens()
            .first()
            .map(|t| plan_token(*t))
            .unwrap_or_default();
        Self {
            solution,
            token_index: 0,
            steps,
            step_index: 0,
        }
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn is_finished(&self) -> bool {
        self.token_index >= self.solution.len()
    }

    /// Token being performed
    pub fn current_token(&self) -> Option<MoveToken> {
        self.solution.tokens().get(self.token_index).copied()
    }

    /// Step the person should perform now
    pub fn current_step(&self) -> Option<Step> {
        if self.is_finished() {
            return None;
        }
        self.steps.get(self.step_index).copied()
    }

    /// Steps of the current token and the index of the current one
    pub fn token_steps(&self) -> (&[Step], usize) {
        (&self.steps, self.step_index)
    }

    /// Tokens fully completed so far
    pub fn tokens_done(&self) -> usize {
        self.token_index
    }

    /// Mark the current step confirmed
    pub fn advance(&mut self) -> Advance {
        if self.is_finished() {
            return Advance::Finished;
        }
        self.step_index += 1;
        if self.step_index < self.steps.len() {
            return Advance::Step;
        }

        self.token_index += 1;
        self.step_index = 0;
        match self.current_token() {
            Some(token) => {
                self.steps = plan_token(token);
                Advance::TokenDone
            }
            None => {
                self.steps.clear();
                Advance::Finished
            }
        }
    }
}
