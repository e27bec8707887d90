//! Error taxonomy for the editing core.

use thiserror::Error;

/// Errors surfaced by [`EditingSession`](crate::session::EditingSession) operations.
///
/// `Decode`, `NotReady` and `Encode` reject the async load/export calls.
/// `SurfaceUnavailable` is only ever logged: a failed paint leaves the surface
/// untouched and the interaction carries on.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Editing surface is not attached: {0}")]
    NotReady(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("No drawing surface available for {0}")]
    SurfaceUnavailable(&'static str),
}
