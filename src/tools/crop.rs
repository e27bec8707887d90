//! Destructive crop.

use log::debug;

use super::GestureCx;
use crate::draw::{CROP_OUTLINE, StrokeStyle, raster};
use crate::input::InputEvent;
use crate::util::Rect;

const OUTLINE_WIDTH: f64 = 2.0;
const OUTLINE_DASH: [f64; 2] = [5.0, 5.0];

/// Drag a rectangle, release to cut the surface down to it.
///
/// While dragging, a dashed outline previews the selection. On release the
/// surface is replaced by the selected block and resized to match.
#[derive(Debug, Default)]
pub struct CropTool {
    anchor: Option<(f64, f64)>,
    selection: Option<Rect>,
}

impl CropTool {
    /// Selection currently being dragged, if any.
    pub fn selection(&self) -> Option<Rect> {
        self.selection
    }

    pub fn on_pointer_down(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        let Some((x, y)) = cx.locate(event, "crop") else {
            return;
        };
        cx.drawing.begin_at(x, y);
        self.anchor = Some((x, y));
        self.selection = None;
    }

    pub fn on_pointer_move(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        let Some((ax, ay)) = self.anchor else {
            return;
        };
        let Some((x, y)) = cx.locate(event, "crop") else {
            return;
        };
        cx.drawing.move_to(x, y);
        let rect = Rect::from_corners(ax, ay, x, y);
        self.selection = Some(rect);

        if rect.width < 1.0 || rect.height < 1.0 {
            return;
        }
        let style = StrokeStyle {
            color: CROP_OUTLINE,
            width: OUTLINE_WIDTH,
        };
        if let Some(surface) = cx.surface_for("crop") {
            raster::stroke_dashed_rect(surface, rect, style, OUTLINE_DASH);
        }
    }

    pub fn on_pointer_up(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        let Some((ax, ay)) = self.anchor.take() else {
            return;
        };
        if let Some((x, y)) = cx.locate(event, "crop") {
            cx.drawing.move_to(x, y);
        }
        let (x, y) = cx.drawing.current();
        let rect = Rect::from_corners(ax, ay, x, y);
        self.selection = None;
        self.apply(rect, cx);
    }

    pub fn reset(&mut self) {
        self.anchor = None;
        self.selection = None;
    }

    fn apply(&self, rect: Rect, cx: &mut GestureCx<'_>) {
        let min = cx.settings.crop_min_size;
        if rect.width < min || rect.height < min {
            debug!(
                "Crop of {:.0}x{:.0} is below the {:.0}px minimum, ignoring",
                rect.width, rect.height, min
            );
            return;
        }
        let Some(surface) = cx.surface_for("crop") else {
            return;
        };

        let (surface_w, surface_h) = surface.dimensions();
        let (x, width) = clip_span(rect.x, rect.width, surface_w);
        let (y, height) = clip_span(rect.y, rect.height, surface_h);

        match surface.extract(x, y, width, height) {
            Some(block) => {
                debug!("Cropping surface to {}x{} at ({}, {})", width, height, x, y);
                surface.replace(block);
            }
            None => debug!("Crop selection lies outside the surface, ignoring"),
        }
    }
}

/// Intersects `[floor(start), floor(start) + trunc(len))` with `[0, limit)`.
///
/// Returns the clipped origin and length; the length is 0 when they miss.
fn clip_span(start: f64, len: f64, limit: u32) -> (u32, u32) {
    let from = start.floor();
    let to = from + len.trunc();
    let lo = from.clamp(0.0, limit as f64);
    let hi = to.clamp(0.0, limit as f64);
    (lo as u32, (hi - lo).max(0.0) as u32)
}
