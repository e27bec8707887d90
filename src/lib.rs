//! Screenshot annotation engine.
//!
//! An [`EditingSession`] owns one raster image, a bounded undo/redo history
//! and a set of drawing tools (freehand, highlighter, rectangle, ellipse,
//! line, arrow, text, crop). Hosts feed it pointer, touch and key input and
//! export the result as PNG bytes plus a data URI. The [`capture`] module
//! adds interactive region selection in front of a session, and [`Script`]
//! replays recorded gestures headlessly.

pub mod capture;
pub mod config;
pub mod draw;
pub mod error;
pub mod history;
pub mod input;
pub mod script;
pub mod session;
pub mod tools;
pub mod util;

pub use config::Config;
pub use error::EditorError;
pub use script::Script;
pub use session::{EditingSession, ExportResult, ImageSource, ReadySignal, SessionEvent};
