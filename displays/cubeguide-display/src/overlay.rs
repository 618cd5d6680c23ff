//! Overlay buffer
//!
//! Holds everything drawn over the camera preview: instruction lines, hint
//! arrows, the letter read on each sticker and a status banner. Setters only
//! mark the overlay dirty when the content actually changes, so a renderer
//! is not flooded with identical frames at camera rate.

use cubeguide_core::cube::{FaceLabel, CELLS_PER_FACE};
use cubeguide_protocol::{Arrow, OverlayMessage, StatusKind, MAX_TEXT_LEN};
use heapless::{String, Vec};

/// Number of instruction lines
pub const TEXT_ROWS: usize = 3;

/// Most arrows shown at once (the four segments of a front-face hint)
pub const MAX_ARROWS: usize = 4;

/// Clear + Status + lines + arrows + cell labels + Commit
pub const MAX_OVERLAY_MESSAGES: usize = 2 + TEXT_ROWS + MAX_ARROWS + CELLS_PER_FACE + 1;

/// Content drawn over the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    lines: [String<MAX_TEXT_LEN>; TEXT_ROWS],
    arrows: Vec<Arrow, MAX_ARROWS>,
    /// Letters per sticker cell; `None` when no face is being read
    cells: Option<[Option<FaceLabel>; CELLS_PER_FACE]>,
    status: StatusKind,
    dirty: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            arrows: Vec::new(),
            cells: None,
            status: StatusKind::default(),
            dirty: true,
        }
    }

    /// Remove lines, arrows and cell labels; the status is kept
    pub fn clear(&mut self) {
        for row in 0..TEXT_ROWS {
            self.set_line(row, "");
        }
        self.set_arrows(&[]);
        self.set_cells(None);
    }

    /// Set an instruction line, cut at [`MAX_TEXT_LEN`] bytes
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let text = truncate(text, MAX_TEXT_LEN);
        if line.as_str() != text {
            line.clear();
            // fits after truncation
            let _ = line.push_str(text);
            self.dirty = true;
        }
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    pub fn set_status(&mut self, status: StatusKind) {
        if self.status != status {
            self.status = status;
            self.dirty = true;
        }
    }

    pub fn status(&self) -> StatusKind {
        self.status
    }

    /// Replace the hint arrows; extra arrows beyond [`MAX_ARROWS`] are dropped
    pub fn set_arrows(&mut self, arrows: &[Arrow]) {
        let arrows = &arrows[..arrows.len().min(MAX_ARROWS)];
        if self.arrows.as_slice() != arrows {
            self.arrows.clear();
            // bounded above
            let _ = self.arrows.extend_from_slice(arrows);
            self.dirty = true;
        }
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Show the letters read on each sticker, or hide them with `None`
    pub fn set_cells(&mut self, cells: Option<[Option<FaceLabel>; CELLS_PER_FACE]>) {
        if self.cells != cells {
            self.cells = cells;
            self.dirty = true;
        }
    }

    pub fn cells(&self) -> Option<&[Option<FaceLabel>; CELLS_PER_FACE]> {
        self.cells.as_ref()
    }

    /// Check if the overlay needs presenting
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as presented
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The link messages that draw this overlay, from `Clear` to `Commit`
    ///
    /// Empty lines are skipped. Unknown stickers are labelled `?`.
    pub fn messages(&self) -> Vec<OverlayMessage<'_>, MAX_OVERLAY_MESSAGES> {
        let mut out = Vec::new();
        let mut push = |msg| {
            // capacity covers every element the overlay can hold
            let _ = out.push(msg);
        };

        push(OverlayMessage::Clear);
        push(OverlayMessage::Status(self.status));
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                push(OverlayMessage::Text {
                    row: row as u8,
                    text: line.as_str(),
                });
            }
        }
        for arrow in &self.arrows {
            push(OverlayMessage::Arrow(*arrow));
        }
        if let Some(cells) = &self.cells {
            for (cell, label) in cells.iter().enumerate() {
                let letter = label.map_or(b'?', |l| l.as_char() as u8);
                push(OverlayMessage::CellLabel {
                    cell: cell as u8,
                    letter,
                });
            }
        }
        push(OverlayMessage::Commit);
        out
    }
}

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

#[cfg(feature = "defmt")]
impl defmt::Format for Overlay {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Overlay[{}", self.status);
        for line in self.lines.iter().filter(|l| !l.is_empty()) {
            defmt::write!(f, ", {}", line.as_str());
        }
        defmt::write!(f, ", arrows={}]", self.arrows.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_overlay_is_dirty() {
        let overlay = Overlay::new();
        assert!(overlay.is_dirty());
        assert_eq!(overlay.status(), StatusKind::Scanning);
        assert_eq!(overlay.line(0), Some(""));
        assert_eq!(overlay.line(TEXT_ROWS), None);
    }

    #[test]
    fn test_unchanged_content_stays_clean() {
        let mut overlay = Overlay::new();
        overlay.set_line(0, "Show the Front face");
        overlay.set_status(StatusKind::Holding);
        overlay.mark_clean();

        overlay.set_line(0, "Show the Front face");
        overlay.set_status(StatusKind::Holding);
        overlay.set_arrows(&[]);
        overlay.set_cells(None);
        assert!(!overlay.is_dirty());

        overlay.set_line(1, "hold still");
        assert!(overlay.is_dirty());
    }

    #[test]
    fn test_line_truncated() {
        let mut overlay = Overlay::new();
        let long = "x".repeat(MAX_TEXT_LEN + 10);
        overlay.set_line(2, &long);
        assert_eq!(overlay.line(2).map(str::len), Some(MAX_TEXT_LEN));
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut overlay = Overlay::new();
        overlay.mark_clean();
        overlay.set_line(7, "nothing");
        assert!(!overlay.is_dirty());
    }

    #[test]
    fn test_arrows_capped() {
        let mut overlay = Overlay::new();
        let arrow = Arrow::new((0, 0), (10, 10));
        overlay.set_arrows(&[arrow; 6]);
        assert_eq!(overlay.arrows().len(), MAX_ARROWS);
    }

    #[test]
    fn test_clear_keeps_status() {
        let mut overlay = Overlay::new();
        overlay.set_status(StatusKind::Moving);
        overlay.set_line(0, "Turn R");
        overlay.set_arrows(&[Arrow::new((1, 2), (3, 4))]);
        overlay.set_cells(Some([Some(FaceLabel::Front); CELLS_PER_FACE]));
        overlay.clear();

        assert_eq!(overlay.status(), StatusKind::Moving);
        assert_eq!(overlay.line(0), Some(""));
        assert!(overlay.arrows().is_empty());
        assert!(overlay.cells().is_none());
    }

    #[test]
    fn test_messages_order() {
        let mut overlay = Overlay::new();
        overlay.set_status(StatusKind::Hint);
        overlay.set_line(1, "Turn R");
        overlay.set_arrows(&[Arrow::new((390, 310), (390, 170))]);
        let mut cells = [Some(FaceLabel::Up); CELLS_PER_FACE];
        cells[4] = None;
        overlay.set_cells(Some(cells));

        let messages = overlay.messages();
        assert_eq!(messages.len(), 2 + 1 + 1 + CELLS_PER_FACE + 1);
        assert_eq!(messages[0], OverlayMessage::Clear);
        assert_eq!(messages[1], OverlayMessage::Status(StatusKind::Hint));
        assert_eq!(
            messages[2],
            OverlayMessage::Text {
                row: 1,
                text: "Turn R"
            }
        );
        assert!(matches!(messages[3], OverlayMessage::Arrow(_)));
        assert_eq!(
            messages[4],
            OverlayMessage::CellLabel { cell: 0, letter: b'U' }
        );
        assert_eq!(
            messages[8],
            OverlayMessage::CellLabel { cell: 4, letter: b'?' }
        );
        assert_eq!(messages.last(), Some(&OverlayMessage::Commit));
    }

    #[test]
    fn test_full_overlay_fits() {
        let mut overlay = Overlay::new();
        for row in 0..TEXT_ROWS {
            overlay.set_line(row, "line");
        }
        overlay.set_arrows(&[Arrow::new((0, 0), (1, 1)); MAX_ARROWS]);
        overlay.set_cells(Some([None; CELLS_PER_FACE]));
        assert_eq!(overlay.messages().len(), MAX_OVERLAY_MESSAGES);
    }
}
