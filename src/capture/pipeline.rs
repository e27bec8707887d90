use std::sync::Arc;

use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use log::{debug, info};
use tokio::task;

use crate::capture::{
    dependencies::{CaptureDependencies, PageRasterizer, RegionSelector},
    selector::RegionDrag,
    types::{CaptureError, CaptureOutcome, SelectionOutcome},
};
use crate::draw::{Color, Surface, encode_png};
use crate::input::PointerEvent;
use crate::session::{EditingSession, ImageSource};
use crate::util::Rect;

/// Selects a region, captures it and opens it in `session`.
///
/// A dismissed or cancelled selection returns [`CaptureOutcome::Cancelled`]
/// without calling the rasterizer or the session.
pub async fn capture_and_edit(
    dependencies: &CaptureDependencies,
    session: &mut EditingSession,
) -> Result<CaptureOutcome, CaptureError> {
    let selection = match dependencies.selector.select().await {
        SelectionOutcome::Selected(rect) => rect,
        SelectionOutcome::Dismissed => {
            info!("Selection dismissed without a usable region");
            return Ok(CaptureOutcome::Cancelled("no region selected".to_string()));
        }
        SelectionOutcome::Cancelled => {
            info!("Selection cancelled");
            return Ok(CaptureOutcome::Cancelled("selection cancelled".to_string()));
        }
    };
    info!(
        "Capturing region {}x{} at ({}, {})",
        selection.width, selection.height, selection.x, selection.y
    );

    let screenshot = match dependencies.rasterizer.capture(selection).await {
        Ok(data) => data,
        Err(CaptureError::Cancelled(reason)) => {
            info!("Capture cancelled: {}", reason);
            return Ok(CaptureOutcome::Cancelled(reason));
        }
        Err(err) => return Err(err),
    };
    debug!("Captured screenshot data size: {} bytes", screenshot.len());

    session
        .load_image(ImageSource::Encoded(screenshot.clone()))
        .await?;

    Ok(CaptureOutcome::Opened {
        selection,
        screenshot,
    })
}

/// Cuts `selection` out of a full-page raster.
///
/// The origin is floored and the size truncated to whole pixels. Any part of
/// the selection outside the page, and any transparency inside it, shows
/// `background`.
pub fn crop_to_selection(full_page: &RgbaImage, selection: Rect, background: Color) -> RgbaImage {
    let width = selection.width.max(0.0) as u32;
    let height = selection.height.max(0.0) as u32;
    let left = selection.x.floor() as i64;
    let top = selection.y.floor() as i64;

    let mut out = Surface::from_image(RgbaImage::from_pixel(
        width,
        height,
        Rgba(background.to_rgba8()),
    ));
    for dy in 0..height {
        for dx in 0..width {
            let (sx, sy) = (left + dx as i64, top + dy as i64);
            if sx < 0 || sy < 0 || sx >= full_page.width() as i64 || sy >= full_page.height() as i64
            {
                continue;
            }
            let [r, g, b, a] = full_page.get_pixel(sx as u32, sy as u32).0;
            let color = Color {
                a: a as f64 / 255.0,
                ..Color::from_rgb8(r, g, b)
            };
            out.blend(dx as i32, dy as i32, color, 1.0);
        }
    }
    out.pixels().clone()
}

/// Selector that replays a fixed drag, for headless capture.
#[derive(Debug, Clone)]
pub struct PresetSelector {
    region: Rect,
    min_selection: f64,
}

impl PresetSelector {
    pub fn new(region: Rect, min_selection: f64) -> Self {
        Self {
            region,
            min_selection,
        }
    }
}

#[async_trait]
impl RegionSelector for PresetSelector {
    async fn select(&self) -> SelectionOutcome {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.region;
        let mut drag = RegionDrag::new(self.min_selection);
        drag.pointer_down(&PointerEvent::new(x, y).into());
        drag.pointer_move(&PointerEvent::new(x + width, y + height).into());
        drag.pointer_up().unwrap_or(SelectionOutcome::Dismissed)
    }
}

/// Rasterizer backed by an already rendered page image.
#[derive(Debug, Clone)]
pub struct StaticPageRasterizer {
    page: Arc<RgbaImage>,
    background: Color,
}

impl StaticPageRasterizer {
    pub fn new(page: RgbaImage, background: Color) -> Self {
        Self {
            page: Arc::new(page),
            background,
        }
    }
}

#[async_trait]
impl PageRasterizer for StaticPageRasterizer {
    async fn capture(&self, selection: Rect) -> Result<Vec<u8>, CaptureError> {
        let page = Arc::clone(&self.page);
        let background = self.background;
        task::spawn_blocking(move || {
            let region = crop_to_selection(&page, selection, background);
            encode_png(&region).map_err(|e| CaptureError::Rasterize(e.to_string()))
        })
        .await
        .map_err(|e| CaptureError::Rasterize(format!("Rasterize task failed: {}", e)))?
    }
}
