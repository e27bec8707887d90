//! Per-session drawing parameters and viewport mapping.

use crate::draw::{BLACK, Color};

/// Valid brush sizes in pixels.
pub const BRUSH_SIZE_RANGE: (f64, f64) = (1.0, 20.0);
/// Valid font sizes in pixels.
pub const FONT_SIZE_RANGE: (f64, f64) = (8.0, 72.0);

/// Transient drawing state shared by the session and the active tool.
///
/// The anchor and pointer fields are rewritten on every pointer event; the
/// style fields change only through the session's setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingContext {
    /// Surface X where the current gesture started
    pub start_x: f64,
    /// Surface Y where the current gesture started
    pub start_y: f64,
    /// Latest surface X of the pointer
    pub current_x: f64,
    /// Latest surface Y of the pointer
    pub current_y: f64,
    /// Stroke, fill and text color
    pub color: Color,
    /// Stroke width in pixels
    pub brush_size: f64,
    /// Opacity multiplier for strokes (0.0 - 1.0)
    pub opacity: f64,
    /// Em size of committed text in pixels
    pub font_size: f64,
}

impl Default for DrawingContext {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            start_y: 0.0,
            current_x: 0.0,
            current_y: 0.0,
            color: BLACK,
            brush_size: 3.0,
            opacity: 1.0,
            font_size: 16.0,
        }
    }
}

impl DrawingContext {
    /// Records the gesture anchor and resets the pointer to it.
    pub fn begin_at(&mut self, x: f64, y: f64) {
        self.start_x = x;
        self.start_y = y;
        self.current_x = x;
        self.current_y = y;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.current_x = x;
        self.current_y = y;
    }

    pub fn anchor(&self) -> (f64, f64) {
        (self.start_x, self.start_y)
    }

    pub fn current(&self) -> (f64, f64) {
        (self.current_x, self.current_y)
    }

    /// Stroke color with the configured opacity applied.
    pub fn stroke_color(&self) -> Color {
        self.color.with_opacity(self.opacity)
    }
}

/// Where the surface is displayed, in viewport coordinates.
///
/// A zero-sized viewport means the surface is shown unscaled at `(left, top)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Maps a viewport position onto surface pixels.
    ///
    /// Each axis is scaled by `surface size / displayed size` so edits stay
    /// pixel-accurate however the surface is stretched on screen.
    pub fn to_surface(&self, client: (f64, f64), surface_size: (u32, u32)) -> (f64, f64) {
        let scale = |surface: u32, displayed: f64| {
            if displayed > 0.0 {
                surface as f64 / displayed
            } else {
                1.0
            }
        };
        let sx = scale(surface_size.0, self.width);
        let sy = scale(surface_size.1, self.height);
        ((client.0 - self.left) * sx, (client.1 - self.top) * sy)
    }
}
