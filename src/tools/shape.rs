//! Rectangle, ellipse, line and arrow.
//!
//! These are preview tools: the session restores the pre-gesture pixels before
//! every move and before the final up, so each call here draws the shape exactly
//! once from the anchor to the latest pointer position.

use super::{GestureCx, ToolKind, ToolSettings};
use crate::draw::{StrokeStyle, Surface, raster};
use crate::input::{DrawingContext, InputEvent};
use crate::util::{Rect, arrowhead_points, ellipse_bounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
}

impl ShapeKind {
    pub fn kind(self) -> ToolKind {
        match self {
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Ellipse => ToolKind::Ellipse,
            ShapeKind::Line => ToolKind::Line,
            ShapeKind::Arrow => ToolKind::Arrow,
        }
    }
}

/// Anchor-to-pointer shape tool.
#[derive(Debug)]
pub struct ShapeTool {
    shape: ShapeKind,
    anchor: Option<(f64, f64)>,
}

impl ShapeTool {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            anchor: None,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn on_pointer_down(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        let Some((x, y)) = cx.locate(event, self.shape.kind().name()) else {
            return;
        };
        cx.drawing.begin_at(x, y);
        self.anchor = Some((x, y));
    }

    pub fn on_pointer_move(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        if self.anchor.is_none() {
            return;
        }
        let Some((x, y)) = cx.locate(event, self.shape.kind().name()) else {
            return;
        };
        cx.drawing.move_to(x, y);
        self.draw(cx);
    }

    /// Performs the committing draw. A touch-end without coordinates reuses
    /// the last pointer position.
    pub fn on_pointer_up(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        if self.anchor.take().is_none() {
            return;
        }
        if let Some((x, y)) = cx.locate(event, self.shape.kind().name()) {
            cx.drawing.move_to(x, y);
        }
        self.draw(cx);
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }

    fn draw(&self, cx: &mut GestureCx<'_>) {
        let drawing = *cx.drawing;
        let settings = cx.settings;
        if let Some(surface) = cx.surface_for(self.shape.kind().name()) {
            draw_shape(surface, self.shape, &drawing, &settings);
        }
    }
}

/// Draws one shape from the context's anchor to its current point.
///
/// Degenerate shapes (zero length, zero area) draw nothing.
pub fn draw_shape(
    surface: &mut Surface,
    shape: ShapeKind,
    drawing: &DrawingContext,
    settings: &ToolSettings,
) {
    let (x1, y1) = drawing.anchor();
    let (x2, y2) = drawing.current();
    let style = StrokeStyle {
        color: drawing.stroke_color(),
        width: drawing.brush_size,
    };

    match shape {
        ShapeKind::Rectangle => {
            let rect = Rect::from_corners(x1, y1, x2, y2);
            if rect.is_valid() {
                raster::stroke_rect(surface, rect, style);
            }
        }
        ShapeKind::Ellipse => {
            let (cx, cy, rx, ry) = ellipse_bounds(x1, y1, x2, y2);
            raster::stroke_ellipse(surface, cx, cy, rx, ry, style);
        }
        ShapeKind::Line => {
            if (x1, y1) != (x2, y2) {
                raster::stroke_polyline(surface, &[(x1, y1), (x2, y2)], style);
            }
        }
        ShapeKind::Arrow => {
            if (x1, y1) == (x2, y2) {
                return;
            }
            raster::stroke_polyline(surface, &[(x1, y1), (x2, y2)], style);
            let [left, right] = arrowhead_points(
                x1,
                y1,
                x2,
                y2,
                settings.arrow_head_length,
                settings.arrow_head_angle,
            );
            raster::fill_polygon(surface, &[(x2, y2), left, right], style.color);
        }
    }
}
