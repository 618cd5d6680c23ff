//! Message types for the overlay link
//!
//! Message types are divided into two categories:
//! - Session → Renderer: overlay drawing commands
//! - Renderer → Session: key presses, heartbeat requests

use crate::events::InputEvent;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Message type IDs: Renderer → Session
pub const MSG_INPUT: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Session → Renderer
pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_TEXT: u8 = 0x21;
pub const MSG_ARROW: u8 = 0x22;
pub const MSG_CELL_LABEL: u8 = 0x23;
pub const MSG_STATUS: u8 = 0x24;
pub const MSG_COMMIT: u8 = 0x2F;

/// Longest text line carried in one frame
pub const MAX_TEXT_LEN: usize = 60;

/// Banner shown by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusKind {
    /// Waiting for a face to be shown
    #[default]
    Scanning,
    /// Face visible, hold still
    Holding,
    /// Grid not readable, adjust the cube
    Adjust,
    /// Face stored
    Captured,
    /// Waiting for the solver
    Thinking,
    /// Waiting for the person to perform a move
    Moving,
    /// The move has not started yet
    Hint,
    /// Move seen
    Confirmed,
    Solved,
    Aborted,
    Error,
}

impl StatusKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        use StatusKind::*;
        const ALL: [StatusKind; 11] = [
            Scanning, Holding, Adjust, Captured, Thinking, Moving, Hint, Confirmed, Solved,
            Aborted, Error,
        ];
        ALL.get(byte as usize).copied()
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Straight arrow in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Arrow {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Arrow {
    pub const fn new(from: (u16, u16), to: (u16, u16)) -> Self {
        Self {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
        }
    }

    fn to_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        for (chunk, value) in out.chunks_exact_mut(2).zip([self.x1, self.y1, self.x2, self.y2]) {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        out
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 8 {
            return None;
        }
        let word = |i: usize| u16::from_be_bytes([bytes[i], bytes[i + 1]]);
        Some(Self {
            x1: word(0),
            y1: word(2),
            x2: word(4),
            y2: word(6),
        })
    }
}

/// Messages from the session to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayMessage<'a> {
    /// Start a new overlay
    Clear,
    /// Instruction line; text longer than [`MAX_TEXT_LEN`] bytes is cut
    Text { row: u8, text: &'a str },
    Arrow(Arrow),
    /// Letter drawn on a sticker cell, `b'?'` for unknown
    CellLabel { cell: u8, letter: u8 },
    Status(StatusKind),
    /// Show everything sent since `Clear`
    Commit,
}

impl<'a> OverlayMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            OverlayMessage::Clear => Ok(Frame::empty(MSG_CLEAR)),
            OverlayMessage::Text { row, text } => {
                // Payload: [row][len][utf-8 bytes...]
                let bytes = truncate(text, MAX_TEXT_LEN).as_bytes();
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&[*row, bytes.len() as u8])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(bytes)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_TEXT, &payload)
            }
            OverlayMessage::Arrow(arrow) => Frame::new(MSG_ARROW, &arrow.to_bytes()),
            OverlayMessage::CellLabel { cell, letter } => {
                Frame::new(MSG_CELL_LABEL, &[*cell, *letter])
            }
            OverlayMessage::Status(kind) => Frame::new(MSG_STATUS, &[kind.to_byte()]),
            OverlayMessage::Commit => Ok(Frame::empty(MSG_COMMIT)),
        }
    }

    /// Decode a renderer-bound frame (renderer side and tests)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match (frame.msg_type, payload) {
            (MSG_CLEAR, []) => Ok(OverlayMessage::Clear),
            (MSG_COMMIT, []) => Ok(OverlayMessage::Commit),
            (MSG_TEXT, [row, len, text @ ..]) if *len as usize == text.len() => {
                let text = core::str::from_utf8(text).map_err(|_| FrameError::InvalidFrame)?;
                Ok(OverlayMessage::Text { row: *row, text })
            }
            (MSG_ARROW, bytes) => Arrow::from_bytes(bytes)
                .map(OverlayMessage::Arrow)
                .ok_or(FrameError::InvalidFrame),
            (MSG_CELL_LABEL, [cell, letter]) if *cell < 9 => Ok(OverlayMessage::CellLabel {
                cell: *cell,
                letter: *letter,
            }),
            (MSG_STATUS, [kind]) => StatusKind::from_byte(*kind)
                .map(OverlayMessage::Status)
                .ok_or(FrameError::InvalidFrame),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Longest prefix of `text` within `max` bytes that ends on a char boundary
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Messages from the renderer to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RendererMessage {
    /// Key press
    Input(InputEvent),
    /// Heartbeat request
    Ping,
}

impl RendererMessage {
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match (frame.msg_type, frame.payload.as_slice()) {
            (MSG_INPUT, [byte]) => InputEvent::from_byte(*byte)
                .map(RendererMessage::Input)
                .ok_or(FrameError::InvalidFrame),
            (MSG_PING, []) => Ok(RendererMessage::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode (renderer side and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            RendererMessage::Input(event) => Frame::new(MSG_INPUT, &[event.to_byte()]),
            RendererMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}
