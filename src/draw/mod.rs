//! Raster surface and drawing primitives.
//!
//! This module defines the pixel-level side of annotation:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Surface`] / [`Snapshot`]: the image under edit and immutable copies of it
//! - [`raster`]: anti-aliased strokes and fills composited onto a surface
//! - [`TextRenderer`]: glyph rasterization for committed text

pub mod color;
pub mod raster;
pub mod surface;
pub mod text;

// Re-export commonly used types at module level
pub use color::Color;
pub use raster::StrokeStyle;
pub use surface::{Snapshot, Surface, encode_png};
pub use text::TextRenderer;

pub use color::{BLACK, BLUE, CROP_OUTLINE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
