//! User commands reported by the renderer or a local keyboard

/// User commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Stop the session
    Abort,
    /// Throw away the current scan and start over
    Rescan,
}

// Wire format values
const EVENT_ABORT: u8 = 0x01;
const EVENT_RESCAN: u8 = 0x02;

impl InputEvent {
    /// Parse an event from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            EVENT_ABORT => Some(InputEvent::Abort),
            EVENT_RESCAN => Some(InputEvent::Rescan),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            InputEvent::Abort => EVENT_ABORT,
            InputEvent::Rescan => EVENT_RESCAN,
        }
    }

    /// Map a key press (`q` quits, `r` rescans)
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(InputEvent::Abort),
            'r' => Some(InputEvent::Rescan),
            _ => None,
        }
    }
}
