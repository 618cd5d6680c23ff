//! Overlay backends
//!
//! `LinkBackend` streams overlay frames to an external renderer (a pipe,
//! a serial port, a file). `LogBackend` reports overlay changes through the
//! log, for headless runs.

use std::io::Write;

use log::info;

use cubeguide_display::{encode_frames, DisplayError, Overlay, OverlayBackend};

/// Writes each presented overlay as protocol frames
pub struct LinkBackend<W: Write> {
    writer: W,
    frames_sent: usize,
}

impl<W: Write> LinkBackend<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_sent: 0,
        }
    }

    /// Frames written so far
    #[cfg(test)]
    pub fn frames_sent(&self) -> usize {
        self.frames_sent
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OverlayBackend for LinkBackend<W> {
    fn present(&mut self, overlay: &Overlay) -> Result<(), DisplayError> {
        let writer = &mut self.writer;
        let sent = &mut self.frames_sent;
        encode_frames(overlay, |bytes| {
            writer
                .write_all(bytes)
                .map_err(|_| DisplayError::Communication)?;
            *sent += 1;
            Ok(())
        })?;
        self.writer.flush().map_err(|_| DisplayError::Communication)
    }
}

/// Logs the status and instruction lines of each presented overlay
#[derive(Debug, Default)]
pub struct LogBackend;

impl OverlayBackend for LogBackend {
    fn present(&mut self, overlay: &Overlay) -> Result<(), DisplayError> {
        let lines: Vec<&str> = (0..cubeguide_display::TEXT_ROWS)
            .filter_map(|row| overlay.line(row))
            .filter(|line| !line.is_empty())
            .collect();
        info!("[{:?}] {}", overlay.status(), lines.join(" | "));
        Ok(())
    }
}

/// Presents to two backends, e.g. the log and a renderer link
pub struct TeeBackend<A, B> {
    first: A,
    second: B,
}

impl<A: OverlayBackend, B: OverlayBackend> TeeBackend<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: OverlayBackend, B: OverlayBackend> OverlayBackend for TeeBackend<A, B> {
    fn present(&mut self, overlay: &Overlay) -> Result<(), DisplayError> {
        self.first.present(overlay)?;
        self.second.present(overlay)
    }

    fn is_ready(&self) -> bool {
        self.first.is_ready() && self.second.is_ready()
    }
}
