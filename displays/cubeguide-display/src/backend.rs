//! Overlay backend trait
//!
//! Defines the interface for renderers that present an [`Overlay`].

use cubeguide_protocol::FrameError;
use thiserror::Error;

use crate::overlay::Overlay;

/// Overlay backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Writing to the renderer failed
    #[error("renderer communication failed")]
    Communication,
    /// A message did not fit in a frame
    #[error("overlay encoding failed: {0}")]
    Encoding(FrameError),
    /// Renderer not connected
    #[error("renderer not ready")]
    NotReady,
}

impl From<FrameError> for DisplayError {
    fn from(err: FrameError) -> Self {
        DisplayError::Encoding(err)
    }
}

/// Renderer interface
///
/// Implementations draw the overlay themselves or forward it to an external
/// renderer over the protocol link.
pub trait OverlayBackend {
    /// Present the whole overlay
    fn present(&mut self, overlay: &Overlay) -> Result<(), DisplayError>;

    /// Check if the renderer can accept an overlay
    fn is_ready(&self) -> bool {
        true
    }
}

/// Present `overlay` if it changed since it was last presented
///
/// Returns whether anything was sent.
pub fn refresh<B: OverlayBackend + ?Sized>(
    backend: &mut B,
    overlay: &mut Overlay,
) -> Result<bool, DisplayError> {
    if !overlay.is_dirty() {
        return Ok(false);
    }
    if !backend.is_ready() {
        return Err(DisplayError::NotReady);
    }
    backend.present(overlay)?;
    overlay.mark_clean();
    Ok(true)
}

/// Encode the overlay as protocol frames, handing each encoded frame to `sink`
pub fn encode_frames<F>(overlay: &Overlay, mut sink: F) -> Result<(), DisplayError>
where
    F: FnMut(&[u8]) -> Result<(), DisplayError>,
{
    for message in overlay.messages() {
        let bytes = message.to_frame()?.encode_to_vec()?;
        sink(&bytes)?;
    }
    Ok(())
}
