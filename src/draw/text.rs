//! Glyph rasterization for committed text.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Color, Surface};

/// Fonts tried in order when no `font_path` is configured.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Draws single lines of text with a loaded outline font.
///
/// A renderer without a font is valid; it reports itself unavailable and
/// callers skip text drawing.
#[derive(Clone, Default)]
pub struct TextRenderer {
    font: Option<FontArc>,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("available", &self.font.is_some())
            .finish()
    }
}

impl TextRenderer {
    /// Loads the configured font, falling back to well-known system fonts.
    pub fn load(configured: Option<&Path>) -> Self {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FALLBACK_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            match load_font(&path) {
                Some(font) => {
                    debug!("Loaded text font from {}", path.display());
                    return Self { font: Some(font) };
                }
                None if configured == Some(path.as_path()) => {
                    warn!(
                        "Configured font {} could not be loaded, trying system fonts",
                        path.display()
                    );
                }
                None => {}
            }
        }

        warn!("No usable font found; text annotations will not be drawn");
        Self::default()
    }

    pub fn from_font(font: FontArc) -> Self {
        Self { font: Some(font) }
    }

    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    /// Draws one line with the top of its em box at `y`, starting at `x`.
    ///
    /// `font_size` is the em size in pixels. Returns false when no font is loaded.
    pub fn draw_line(
        &self,
        surface: &mut Surface,
        text: &str,
        x: f64,
        y: f64,
        font_size: f64,
        color: Color,
    ) -> bool {
        let Some(font) = &self.font else {
            return false;
        };

        let scale = em_scale(font, font_size as f32);
        let scaled = font.as_scaled(scale);
        let baseline = y as f32 + scaled.ascent();

        let mut caret = x as f32;
        let mut previous = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (ox, oy) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    surface.blend(ox + gx as i32, oy + gy as i32, color, coverage);
                });
            }
        }
        true
    }
}

fn load_font(path: &Path) -> Option<FontArc> {
    let bytes = fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}

/// Converts an em size in pixels to ab_glyph's height-based scale.
fn em_scale(font: &FontArc, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(em_px * font.height_unscaled() / units),
        _ => PxScale::from(em_px),
    }
}

/// Renderer backed by a font compiled into the test binary.
#[cfg(test)]
pub(crate) fn bundled_renderer() -> TextRenderer {
    let font = FontArc::try_from_slice(epaint_default_fonts::HACK_REGULAR)
        .expect("bundled font parses");
    TextRenderer::from_font(font)
}
