//! Freehand pen and highlighter.

use super::{GestureCx, ToolKind};
use crate::draw::{StrokeStyle, raster};
use crate::input::InputEvent;

/// Highlighter opacity relative to the configured opacity.
const HIGHLIGHTER_OPACITY: f64 = 0.3;
/// Highlighter width relative to the configured brush size.
const HIGHLIGHTER_WIDTH: f64 = 2.0;

/// Strokes the pointer path directly onto the surface.
///
/// Every move re-strokes the whole accumulated path, so the surface always
/// shows the stroke as one continuous path with round joins and caps.
#[derive(Debug, Default)]
pub struct FreehandTool {
    highlighter: bool,
    path: Vec<(f64, f64)>,
}

impl FreehandTool {
    pub fn pen() -> Self {
        Self::default()
    }

    pub fn highlighter() -> Self {
        Self {
            highlighter: true,
            path: Vec::new(),
        }
    }

    pub fn kind(&self) -> ToolKind {
        if self.highlighter {
            ToolKind::Highlighter
        } else {
            ToolKind::Freehand
        }
    }

    pub fn path(&self) -> &[(f64, f64)] {
        &self.path
    }

    pub fn on_pointer_down(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        let Some((x, y)) = cx.locate(event, self.kind().name()) else {
            return;
        };
        cx.drawing.begin_at(x, y);
        self.path = vec![(x, y)];
    }

    pub fn on_pointer_move(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        if self.path.is_empty() {
            return;
        }
        let Some((x, y)) = cx.locate(event, self.kind().name()) else {
            return;
        };
        cx.drawing.move_to(x, y);
        self.path.push((x, y));
        self.draw(cx);
    }

    pub fn on_pointer_up(&mut self) {
        self.path.clear();
    }

    pub fn reset(&mut self) {
        self.path.clear();
    }

    fn style(&self, cx: &GestureCx<'_>) -> StrokeStyle {
        let drawing = &cx.drawing;
        if self.highlighter {
            StrokeStyle {
                color: drawing.color.with_opacity(drawing.opacity * HIGHLIGHTER_OPACITY),
                width: drawing.brush_size * HIGHLIGHTER_WIDTH,
            }
        } else {
            StrokeStyle {
                color: drawing.stroke_color(),
                width: drawing.brush_size,
            }
        }
    }

    fn draw(&self, cx: &mut GestureCx<'_>) {
        if self.path.len() < 2 {
            return;
        }
        let style = self.style(cx);
        if let Some(surface) = cx.surface_for(self.kind().name()) {
            raster::stroke_polyline(surface, &self.path, style);
        }
    }
}
