//! Recorded camera input
//!
//! A replay file holds one frame per line: the nine HSV samples of the
//! sampling grid in layout order, written as `h,s,v` triples separated by
//! whitespace. A line holding only `-` is a frame the camera failed to
//! deliver. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # Up face, held steady
//! 75,20,200 75,20,200 75,20,200 75,20,200 75,20,200 75,20,200 75,20,200 75,20,200 75,20,200
//! -
//! ```

use std::io::BufRead;
use std::thread;
use std::time::Duration;

use log::warn;

use cubeguide_core::color::Hsv;
use cubeguide_core::config::SamplingLayout;
use cubeguide_core::cube::CELLS_PER_FACE;
use cubeguide_core::traits::{Frame, FrameSource, SensorError};

/// Frame holding only the samples at the grid points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFrame {
    layout: SamplingLayout,
    samples: [Hsv; CELLS_PER_FACE],
    timestamp_ms: u32,
}

impl ReplayFrame {
    pub fn new(layout: SamplingLayout, samples: [Hsv; CELLS_PER_FACE], timestamp_ms: u32) -> Self {
        Self {
            layout,
            samples,
            timestamp_ms,
        }
    }
}

impl Frame for ReplayFrame {
    fn sample_pixel(&self, x: u16, y: u16) -> Option<Hsv> {
        self.layout
            .points
            .iter()
            .position(|p| *p == (x, y))
            .map(|cell| self.samples[cell])
    }

    fn timestamp_ms(&self) -> u32 {
        self.timestamp_ms
    }
}

/// Contents of one replay line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayLine {
    Skip,
    Unavailable,
    Samples([Hsv; CELLS_PER_FACE]),
}

/// Parse one replay line; `None` when malformed
pub fn parse_line(line: &str) -> Option<ReplayLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Some(ReplayLine::Skip);
    }
    if line == "-" {
        return Some(ReplayLine::Unavailable);
    }

    let mut samples = [Hsv::default(); CELLS_PER_FACE];
    let mut words = line.split_whitespace();
    for sample in samples.iter_mut() {
        *sample = parse_triple(words.next()?)?;
    }
    if words.next().is_some() {
        return None;
    }
    Some(ReplayLine::Samples(samples))
}

fn parse_triple(word: &str) -> Option<Hsv> {
    let mut parts = word.split(',').map(|p| p.parse::<u8>().ok());
    let hsv = Hsv::new(parts.next()??, parts.next()??, parts.next()??);
    parts.next().is_none().then_some(hsv)
}

/// Frame source reading a replay file
///
/// Each frame line, including `-`, advances the clock by one frame
/// interval. End of input is a disconnected camera.
pub struct ReplaySource<R> {
    reader: R,
    layout: SamplingLayout,
    interval_ms: u32,
    clock_ms: u32,
    /// Time given to the latest frame line
    last_tick_ms: Option<u32>,
    line_no: usize,
    /// Sleep between frames to play back in real time
    pacing: Option<Duration>,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R, layout: SamplingLayout, interval_ms: u32) -> Self {
        Self {
            reader,
            layout,
            interval_ms,
            clock_ms: 0,
            last_tick_ms: None,
            line_no: 0,
            pacing: None,
        }
    }

    /// Sleep one frame interval before each frame
    pub fn realtime(mut self) -> Self {
        self.pacing = Some(Duration::from_millis(u64::from(self.interval_ms)));
        self
    }

    fn tick(&mut self) -> u32 {
        let now = self.clock_ms;
        self.last_tick_ms = Some(now);
        self.clock_ms = self.clock_ms.wrapping_add(self.interval_ms);
        if let Some(pause) = self.pacing {
            thread::sleep(pause);
        }
        now
    }
}

impl<R: BufRead> FrameSource for ReplaySource<R> {
    type Frame = ReplayFrame;

    fn next_frame(&mut self) -> Result<ReplayFrame, SensorError> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Err(SensorError::Disconnected),
                Ok(_) => {}
                Err(err) => {
                    warn!("replay read failed: {}", err);
                    return Err(SensorError::Disconnected);
                }
            }
            self.line_no += 1;

            match parse_line(&line) {
                Some(ReplayLine::Skip) => continue,
                Some(ReplayLine::Unavailable) => {
                    self.tick();
                    return Err(SensorError::FrameUnavailable);
                }
                Some(ReplayLine::Samples(samples)) => {
                    let timestamp_ms = self.tick();
                    return Ok(ReplayFrame::new(self.layout, samples, timestamp_ms));
                }
                None => {
                    warn!("replay line {} is malformed, skipping frame", self.line_no);
                    self.tick();
                    return Err(SensorError::FrameUnavailable);
                }
            }
        }
    }

    fn clock_ms(&self) -> Option<u32> {
        self.last_tick_ms
    }
}
