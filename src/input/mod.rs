//! Input types routed from the host to the drawing tools.
//!
//! Pointer and touch events arrive in viewport coordinates and are mapped to
//! surface pixels through a [`Viewport`]. The [`DrawingContext`] carries the
//! gesture anchor, the latest pointer position and the active style.

pub mod context;
pub mod events;
pub mod modifiers;

// Re-export commonly used types at module level
pub use context::{BRUSH_SIZE_RANGE, DrawingContext, FONT_SIZE_RANGE, Viewport};
pub use events::{InputEvent, Key, PointerEvent, TouchEvent, TouchPoint};
pub use modifiers::Modifiers;
