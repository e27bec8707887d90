//! Data types for region capture.

use thiserror::Error;

use crate::error::EditorError;
use crate::util::Rect;

/// How an interactive region selection ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    /// A region larger than the minimum in both dimensions.
    Selected(Rect),
    /// Released without a usable region (no drag, or too small).
    Dismissed,
    /// The user pressed Escape.
    Cancelled,
}

/// Result of a capture request.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The region was captured and loaded into the session.
    Opened {
        selection: Rect,
        /// PNG bytes of the captured region, before any editing
        screenshot: Vec<u8>,
    },
    /// Nothing was captured; the session is untouched.
    Cancelled(String),
}

/// Errors that can occur during region capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to rasterize page: {0}")]
    Rasterize(String),

    #[error("Capture cancelled: {0}")]
    Cancelled(String),

    #[error(transparent)]
    Editor(#[from] EditorError),
}
