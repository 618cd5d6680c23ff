//! User input trait

use cubeguide_protocol::InputEvent;

/// Non-blocking source of user commands
///
/// Polled once per loop iteration.
pub trait InputSource {
    fn poll_input(&mut self) -> Option<InputEvent>;
}

/// Input source that never reports anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_input(&mut self) -> Option<InputEvent> {
        None
    }
}
