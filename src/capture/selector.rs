//! Drag state of the region selection overlay.

use crate::capture::types::SelectionOutcome;
use crate::input::InputEvent;
use crate::util::Rect;

/// Tracks one drag across the selection overlay.
///
/// Coordinates are viewport pixels. The region only exists once the pointer
/// has moved; a press and release in place selects nothing. A region is
/// accepted only when both sides are strictly larger than `min_selection`.
#[derive(Debug, Clone)]
pub struct RegionDrag {
    min_selection: f64,
    start: Option<(f64, f64)>,
    current: Option<Rect>,
}

impl RegionDrag {
    pub fn new(min_selection: f64) -> Self {
        Self {
            min_selection,
            start: None,
            current: None,
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.start.is_some()
    }

    /// Region the overlay should currently outline.
    pub fn current(&self) -> Option<Rect> {
        self.current
    }

    pub fn pointer_down(&mut self, event: &InputEvent) {
        let Some(point) = event.client_position() else {
            return;
        };
        self.start = Some(point);
        self.current = None;
    }

    /// Updates the region. Returns it so the host can redraw the outline.
    pub fn pointer_move(&mut self, event: &InputEvent) -> Option<Rect> {
        let (sx, sy) = self.start?;
        let (x, y) = event.client_position()?;
        let rect = Rect::from_corners(sx, sy, x, y);
        self.current = Some(rect);
        Some(rect)
    }

    /// Ends the drag. Returns `None` if no drag was in progress.
    pub fn pointer_up(&mut self) -> Option<SelectionOutcome> {
        self.start.take()?;
        let outcome = match self.current.take() {
            Some(rect) if rect.width > self.min_selection && rect.height > self.min_selection => {
                SelectionOutcome::Selected(rect)
            }
            _ => SelectionOutcome::Dismissed,
        };
        Some(outcome)
    }

    /// Escape abandons the selection, whether or not a drag is in progress.
    pub fn escape(&mut self) -> SelectionOutcome {
        self.start = None;
        self.current = None;
        SelectionOutcome::Cancelled
    }
}
