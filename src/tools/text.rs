//! Text entry through a floating overlay.
//!
//! A pointer-down opens a [`TextOverlay`] that the host renders as an editor
//! positioned at the click. Nothing touches the surface until the overlay is
//! committed; the commit snapshots history and rasterizes every non-empty line.

use log::{debug, warn};

use super::GestureCx;
use crate::draw::Color;
use crate::error::EditorError;
use crate::input::InputEvent;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Transient text editor state, never drawn on the surface itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    /// Surface X of the left edge of every line
    pub x: f64,
    /// Surface Y of the top of the first line
    pub y: f64,
    /// Viewport position of the click, for placing the host's editor
    pub client_x: f64,
    pub client_y: f64,
    pub color: Color,
    pub font_size: f64,
    /// Multi-line contents typed so far
    pub buffer: String,
}

/// What caused a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitTrigger {
    /// The overlay's apply button
    Confirm,
    /// Ctrl+Enter or Cmd+Enter
    ModifierEnter,
    /// The editor lost keyboard focus
    FocusLost,
    /// A pointer press somewhere other than the editor
    ClickOutside(ClickTarget),
}

/// Where a click landed while the overlay was open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// On the image being edited
    Surface,
    /// Anywhere outside the editor
    OutsideEditor,
    /// Inside the overlay itself
    Overlay,
    /// On a toolbar button or input
    Toolbar,
}

impl CommitTrigger {
    /// Clicks on the overlay or on toolbar controls keep it open.
    pub fn commits(self) -> bool {
        !matches!(
            self,
            CommitTrigger::ClickOutside(ClickTarget::Overlay | ClickTarget::Toolbar)
        )
    }
}

/// Text tool holding at most one open overlay.
///
/// Committing takes the overlay out of the tool before anything is drawn, so a
/// second commit for the same overlay finds nothing to do.
#[derive(Debug, Default)]
pub struct TextTool {
    overlay: Option<TextOverlay>,
}

impl TextTool {
    pub fn overlay(&self) -> Option<&TextOverlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut TextOverlay> {
        self.overlay.as_mut()
    }

    /// Opens a fresh overlay at the click, discarding any open one uncommitted.
    pub fn on_pointer_down(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        let Some(client) = event.client_position() else {
            return;
        };
        let Some((x, y)) = cx.locate(event, "text") else {
            return;
        };
        cx.drawing.begin_at(x, y);

        let overlay = TextOverlay {
            x,
            y,
            client_x: client.0,
            client_y: client.1,
            color: cx.drawing.color,
            font_size: cx.drawing.font_size,
            buffer: String::new(),
        };
        if self.overlay.replace(overlay).is_some() {
            debug!("Discarded open text overlay without committing");
        }
    }

    /// Closes the overlay without drawing. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        self.overlay.take().is_some()
    }

    /// Commits the open overlay onto the surface.
    ///
    /// Returns true if text was drawn. Whitespace-only input closes the overlay
    /// without touching history or the surface.
    pub fn commit(&mut self, trigger: CommitTrigger, cx: &mut GestureCx<'_>) -> bool {
        if !trigger.commits() {
            return false;
        }
        let Some(overlay) = self.overlay.take() else {
            return false;
        };

        let lines = committed_lines(&overlay.buffer);
        if lines.is_empty() {
            debug!("Text overlay closed empty ({:?})", trigger);
            return false;
        }
        if !cx.text.is_available() {
            warn!("No font loaded, dropping text annotation");
            return false;
        }
        let Some(surface) = cx.surface.as_deref_mut() else {
            warn!("{}", EditorError::SurfaceUnavailable("text"));
            return false;
        };

        cx.history.snapshot(surface);
        let color = Color {
            a: 1.0,
            ..overlay.color
        };
        for (index, line) in lines {
            let y = line_top(overlay.y, index, overlay.font_size);
            cx.text
                .draw_line(surface, line, overlay.x, y, overlay.font_size, color);
        }
        debug!("Committed text overlay ({:?})", trigger);
        true
    }
}

/// Lines worth drawing, each with its index in the original input.
///
/// The whole input is trimmed first; each kept line is trimmed and blank lines
/// are skipped but still advance the index.
pub fn committed_lines(text: &str) -> Vec<(usize, &str)> {
    text.trim()
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            (!line.is_empty()).then_some((index, line))
        })
        .collect()
}

/// Top of the `index`th line for text anchored at `y`.
pub fn line_top(y: f64, index: usize, font_size: f64) -> f64 {
    y + index as f64 * font_size * LINE_HEIGHT
}
