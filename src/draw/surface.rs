//! The raster surface under edit and its immutable snapshots.

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use super::Color;

/// RGBA8 pixel grid holding the image being annotated.
///
/// Pixels are stored straight (non-premultiplied). Drawing goes through
/// [`Surface::blend`], which composites source-over.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
}

/// Immutable copy of a surface's pixels.
///
/// Taking a snapshot and restoring one both copy the buffer, so a snapshot
/// never aliases the live surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pixels: RgbaImage,
}

impl Surface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixels: self.pixels.clone(),
        }
    }

    /// Copies a snapshot back onto the surface.
    ///
    /// A snapshot taken before a crop has different dimensions; the surface is
    /// reallocated to match it.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if self.pixels.dimensions() == snapshot.pixels.dimensions() {
            self.pixels.copy_from_slice(snapshot.pixels.as_raw());
        } else {
            self.pixels = snapshot.pixels.clone();
        }
    }

    /// Replaces the whole surface, resizing it to the new image.
    pub fn replace(&mut self, pixels: RgbaImage) {
        self.pixels = pixels;
    }

    /// Copies out the block at `(x, y)` of the given size.
    ///
    /// Returns `None` unless the block lies entirely inside the surface and
    /// has a positive area.
    pub fn extract(&self, x: u32, y: u32, width: u32, height: u32) -> Option<RgbaImage> {
        let inside = width > 0
            && height > 0
            && x.checked_add(width)? <= self.width()
            && y.checked_add(height)? <= self.height();
        inside.then(|| image::imageops::crop_imm(&self.pixels, x, y, width, height).to_image())
    }

    /// Composites `color` over one pixel with the given coverage (0.0 to 1.0).
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let src_a = (color.a as f32 * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            dst.0 = [0, 0, 0, 0];
            return;
        }

        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, src_c) in src.iter().enumerate() {
            let dst_c = dst[channel] as f32 / 255.0;
            let out_c = (src_c * src_a + dst_c * dst_a * (1.0 - src_a)) / out_a;
            dst[channel] = (out_c.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        dst[3] = (out_a.clamp(0.0, 1.0) * 255.0).round() as u8;
    }

    /// Encodes the surface as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        encode_png(&self.pixels)
    }
}

impl Snapshot {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Encodes an RGBA image as PNG bytes.
pub fn encode_png(pixels: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
