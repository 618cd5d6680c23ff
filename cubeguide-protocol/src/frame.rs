//! Frame encoding and decoding for the overlay link.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-64)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-64 bytes): type-specific data
//! - CRC8 (1 byte): CRC-8/SMBUS over LENGTH, TYPE and PAYLOAD

use heapless::Vec;
use thiserror::Error;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// START + LENGTH + TYPE + payload + CRC
pub const MAX_FRAME_SIZE: usize = 3 + MAX_PAYLOAD_SIZE + 1;

const CRC8_POLY: u8 = 0x07;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    #[error("payload exceeds {MAX_PAYLOAD_SIZE} bytes")]
    PayloadTooLarge,
    #[error("checksum mismatch")]
    InvalidChecksum,
    /// Structurally valid frame with unexpected contents
    #[error("invalid frame")]
    InvalidFrame,
    #[error("output buffer too small")]
    BufferTooSmall,
}

fn crc8_update(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC8_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// CRC-8/SMBUS (poly 0x07, init 0, no reflection)
pub fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |crc, &byte| crc8_update(crc, byte))
}

fn frame_crc(msg_type: u8, payload: &[u8]) -> u8 {
    [payload.len() as u8, msg_type]
        .iter()
        .chain(payload)
        .fold(0, |crc, &byte| crc8_update(crc, byte))
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Total encoded size
    pub fn encoded_len(&self) -> usize {
        4 + self.payload.len()
    }

    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, self.payload.len() as u8, self.msg_type]);
        let (body, crc) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        crc[0] = frame_crc(self.msg_type, &self.payload);

        Ok(len)
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for START
    Sync,
    Length,
    Type { len: u8 },
    Payload { len: u8, msg_type: u8 },
    Crc { msg_type: u8 },
}

/// Byte-at-a-time frame decoder
///
/// Garbage before a START byte is skipped. A bad length or CRC drops the
/// partial frame and the parser hunts for the next START.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.payload.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(frame))` when a frame completes, `Ok(None)` when
    /// more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        let state = self.state;
        self.state = match state {
            ParseState::Sync if byte == FRAME_START => ParseState::Length,
            ParseState::Sync => ParseState::Sync,
            ParseState::Length if byte as usize > MAX_PAYLOAD_SIZE => {
                self.reset();
                return Err(FrameError::PayloadTooLarge);
            }
            ParseState::Length => ParseState::Type { len: byte },
            ParseState::Type { len: 0 } => ParseState::Crc { msg_type: byte },
            ParseState::Type { len } => {
                self.payload.clear();
                ParseState::Payload { len, msg_type: byte }
            }
            ParseState::Payload { len, msg_type } => {
                // length was bounded when it was read
                let _ = self.payload.push(byte);
                if self.payload.len() == len as usize {
                    ParseState::Crc { msg_type }
                } else {
                    ParseState::Payload { len, msg_type }
                }
            }
            ParseState::Crc { msg_type } => {
                let valid = byte == frame_crc(msg_type, &self.payload);
                let frame = Frame {
                    msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return if valid {
                    Ok(Some(frame))
                } else {
                    Err(FrameError::InvalidChecksum)
                };
            }
        };
        Ok(None)
    }

    /// Feed bytes until a frame completes
    ///
    /// Returns the number of bytes consumed and the frame, if any. Bytes
    /// after the frame are left for the next call.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<Frame>, FrameError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                other => return (i + 1, other),
            }
        }
        (bytes.len(), Ok(None))
    }
}
