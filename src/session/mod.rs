//! Editing sessions: one loaded image, its undo history and the active tool.
//!
//! The host creates a session, attaches its drawing surface through the
//! returned [`ReadySignal`], loads an image, forwards pointer and key input,
//! and finally exports the result as PNG bytes plus a data URI.

mod editor;
mod events;
mod export;
mod readiness;

pub use editor::EditingSession;
pub use events::{ExportResult, ImageSource, SessionEvent};
pub use export::{PNG_DATA_URI_PREFIX, decode_data_uri};
pub use readiness::ReadySignal;

#[cfg(test)]
mod tests;
