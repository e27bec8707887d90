//! Utility functions for colors and drag geometry.
//!
//! This module provides:
//! - Arrowhead geometry for the arrow tool
//! - Drag-rectangle normalization shared by rectangle, ellipse, crop and region selection
//! - Color name and hex parsing for the configuration file

use crate::draw::{Color, color::*};

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two back corners of a triangular arrowhead.
///
/// The tip sits at `(x2, y2)` and the head points along the direction from
/// `(x1, y1)` to `(x2, y2)`. Each corner lies `length` pixels behind the tip,
/// splayed `angle_degrees` either side of the shaft.
///
/// # Returns
/// `[(ax, ay), (bx, by)]`, the corner at `shaft - angle` first. A zero-length
/// shaft yields both corners on the tip.
pub fn arrowhead_points(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    length: f64,
    angle_degrees: f64,
) -> [(f64, f64); 2] {
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx == 0.0 && dy == 0.0 {
        return [(x2, y2), (x2, y2)];
    }

    let shaft = dy.atan2(dx);
    let splay = angle_degrees.to_radians();

    let left = shaft - splay;
    let right = shaft + splay;

    [
        (x2 - length * left.cos(), y2 - length * left.sin()),
        (x2 - length * right.cos(), y2 - length * right.sin()),
    ]
}

// ============================================================================
// Drag Geometry
// ============================================================================

/// Axis-aligned rectangle spanned by a pointer drag, in surface pixels.
///
/// Width and height are always non-negative regardless of drag direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds the normalized rectangle between two corners.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Calculates ellipse parameters from two corner points.
///
/// Converts a drag rectangle (from corner to corner) into the inscribed
/// ellipse's center point and radii.
///
/// # Returns
/// Tuple `(cx, cy, rx, ry)` where:
/// - `cx`, `cy` = center point coordinates
/// - `rx` = horizontal radius (half width)
/// - `ry` = vertical radius (half height)
pub fn ellipse_bounds(x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64, f64, f64) {
    let rect = Rect::from_corners(x1, y1, x2, y2);
    let (cx, cy) = rect.center();
    (cx, cy, rect.width / 2.0, rect.height / 2.0)
}

// ============================================================================
// Color Parsing
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and gesture scripts.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Parses a color given either by name or as `#rrggbb` / `#rgb`.
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        Color::from_hex(spec)
    } else {
        name_to_color(spec)
    }
}
