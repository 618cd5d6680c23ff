//! Overlay Link Protocol
//!
//! Byte protocol between the guidance session (which decides what to show)
//! and an external renderer (which draws it over the camera image and
//! reports key presses back).
//!
//! # Protocol Overview
//!
//! All messages use one binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CRC8 │
//! │ 1B    │ 1B     │ 1B   │ 0–64B       │ 1B   │
//! └───────┴────────┴──────┴─────────────┴──────┘
//! ```
//!
//! The renderer holds no guidance logic. It draws what it is told and
//! shows the result on `Commit`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod messages;

pub use events::InputEvent;
pub use frame::{crc8, Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{Arrow, OverlayMessage, RendererMessage, StatusKind, MAX_TEXT_LEN};
