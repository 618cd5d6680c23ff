//! Move confirmation state machine
//!
//! Decides from a stream of noisy detections whether a prescribed move has
//! physically happened. The state machine is explicit, finite, and
//! deterministic.

pub mod events;
pub mod machine;

pub use events::{CancelReason, Event};
pub use machine::{ConfirmState, Feedback, MoveConfirmation};
