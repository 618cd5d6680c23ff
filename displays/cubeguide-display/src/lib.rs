//! Overlay presentation for Cubeguide
//!
//! This crate provides:
//! - `Overlay`, the buffer describing what is drawn over the camera preview
//! - Hint arrow geometry for each physical step
//! - `OverlayBackend` trait for renderers (link to an external window, log output)
//!
//! # Architecture
//!
//! The session controller fills an [`Overlay`] and hands it to a backend
//! whenever it changes. A backend either draws it directly or turns it into
//! protocol frames with [`encode_frames`] and writes them to a renderer
//! process.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod hints;
pub mod overlay;

// Re-export key types
pub use backend::{encode_frames, refresh, DisplayError, OverlayBackend};
pub use hints::{hint_arrows, HintArrows};
pub use overlay::{Overlay, MAX_ARROWS, MAX_OVERLAY_MESSAGES, TEXT_ROWS};
