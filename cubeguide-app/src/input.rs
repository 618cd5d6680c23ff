//! User input
//!
//! Key presses arrive on background threads (stdin lines, or frames from
//! an external renderer) and are forwarded over a channel. The session
//! loop polls the channel without blocking.

use std::io::{BufRead, Read};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use log::{debug, warn};

use cubeguide_core::traits::InputSource;
use cubeguide_protocol::{FrameParser, InputEvent, RendererMessage};

/// Input source fed by reader threads
#[derive(Debug)]
pub struct ChannelInput {
    rx: Receiver<InputEvent>,
}

impl ChannelInput {
    /// Create the source and the sender readers feed
    pub fn new() -> (Self, Sender<InputEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, tx)
    }
}

impl InputSource for ChannelInput {
    fn poll_input(&mut self) -> Option<InputEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Map a typed line to a command: `q` aborts, `r` rescans
///
/// Input arrives a line at a time, so a key only counts after Enter.
pub fn parse_key_line(line: &str) -> Option<InputEvent> {
    let mut chars = line.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => InputEvent::from_key(c),
        _ => None,
    }
}

/// Forward commands typed on `reader` until it closes
pub fn spawn_keyboard<R>(reader: R, tx: Sender<InputEvent>) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            match parse_key_line(&line) {
                Some(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                None => debug!("ignoring input {:?}", line),
            }
        }
    })
}

/// Forward input frames sent by an external renderer
pub fn spawn_link<R>(mut reader: R, tx: Sender<InputEvent>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut parser = FrameParser::new();
        let mut buffer = [0u8; 64];
        loop {
            let len = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(len) => len,
                Err(err) => {
                    warn!("renderer link read failed: {}", err);
                    break;
                }
            };
            let mut rest = &buffer[..len];
            while !rest.is_empty() {
                let (used, result) = parser.feed_bytes(rest);
                rest = &rest[used..];
                match result.map(|f| f.map(|f| RendererMessage::from_frame(&f))) {
                    Ok(Some(Ok(RendererMessage::Input(event)))) => {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                    Ok(Some(Ok(RendererMessage::Ping))) => debug!("renderer ping"),
                    Ok(Some(Err(err))) | Err(err) => warn!("renderer frame dropped: {}", err),
                    Ok(None) => {}
                }
            }
        }
    })
}
