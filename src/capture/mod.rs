//! Region capture feeding an editing session.
//!
//! A [`RegionSelector`] lets the user drag out a rectangle, a
//! [`PageRasterizer`] turns that rectangle into PNG bytes, and
//! [`capture_and_edit`] loads the result into an [`EditingSession`](crate::EditingSession).
//! Cancelling the selection never touches the session.

mod dependencies;
mod pipeline;
mod selector;
pub mod types;


pub use dependencies::{CaptureDependencies, PageRasterizer, RegionSelector};
pub use pipeline::{PresetSelector, StaticPageRasterizer, capture_and_edit, crop_to_selection};
pub use selector::RegionDrag;
pub use types::{CaptureError, CaptureOutcome, SelectionOutcome};
