//! Anti-aliased stroke and fill rasterization onto a [`Surface`].
//!
//! Every primitive is described by a signed distance function (negative inside).
//! Coverage is accumulated into a scratch buffer first, taking the maximum per
//! pixel, and then composited once. Overlapping segments of one stroke therefore
//! never double up their alpha, the same as a single canvas `stroke()` call.

use super::{Color, Surface};
use crate::util::Rect;

/// Stroke parameters shared by every outline primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    fn half_width(&self) -> f32 {
        (self.width.max(0.0) / 2.0) as f32
    }
}

// ============================================================================
// Public primitives
// ============================================================================

/// Strokes an open polyline with round joins and round caps.
///
/// Fewer than two points draws nothing.
pub fn stroke_polyline(surface: &mut Surface, points: &[(f64, f64)], style: StrokeStyle) {
    if points.len() < 2 {
        return;
    }
    let half = style.half_width();
    let Some(mut coverage) = Coverage::for_bounds(surface, Bounds::around(points).expand(half))
    else {
        return;
    };

    for pair in points.windows(2) {
        let (a, b) = (to_f32(pair[0]), to_f32(pair[1]));
        let bounds = Bounds::around(&[pair[0], pair[1]]).expand(half);
        coverage.accumulate(bounds, |px, py| {
            sdf_segment(px, py, a.0, a.1, b.0, b.1) - half
        });
    }
    coverage.composite(surface, style.color);
}

/// Strokes the outline of an axis-aligned rectangle with mitered corners.
pub fn stroke_rect(surface: &mut Surface, rect: Rect, style: StrokeStyle) {
    let half = style.half_width();
    let (cx, cy) = rect.center();
    let (cx, cy) = (cx as f32, cy as f32);
    let (hx, hy) = ((rect.width / 2.0) as f32, (rect.height / 2.0) as f32);
    let bounds = Bounds {
        min_x: rect.x as f32,
        min_y: rect.y as f32,
        max_x: (rect.x + rect.width) as f32,
        max_y: (rect.y + rect.height) as f32,
    }
    .expand(half);
    let Some(mut coverage) = Coverage::for_bounds(surface, bounds) else {
        return;
    };

    coverage.accumulate(bounds, |px, py| {
        let (lx, ly) = (px - cx, py - cy);
        let outer = sdf_box(lx, ly, hx + half, hy + half);
        let inner = sdf_box(lx, ly, hx - half, hy - half);
        if hx - half <= 0.0 || hy - half <= 0.0 {
            outer
        } else {
            outer.max(-inner)
        }
    });
    coverage.composite(surface, style.color);
}

/// Strokes the outline of an axis-aligned ellipse.
///
/// Zero radii draw nothing.
pub fn stroke_ellipse(
    surface: &mut Surface,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    style: StrokeStyle,
) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let half = style.half_width();
    let (cx, cy, rx, ry) = (cx as f32, cy as f32, rx as f32, ry as f32);
    let bounds = Bounds {
        min_x: cx - rx,
        min_y: cy - ry,
        max_x: cx + rx,
        max_y: cy + ry,
    }
    .expand(half);
    let Some(mut coverage) = Coverage::for_bounds(surface, bounds) else {
        return;
    };

    coverage.accumulate(bounds, |px, py| {
        sdf_ellipse(px - cx, py - cy, rx, ry).abs() - half
    });
    coverage.composite(surface, style.color);
}

/// Fills a convex polygon.
pub fn fill_polygon(surface: &mut Surface, vertices: &[(f64, f64)], color: Color) {
    if vertices.len() < 3 {
        return;
    }
    let verts: Vec<(f32, f32)> = vertices.iter().copied().map(to_f32).collect();
    let bounds = Bounds::around(vertices).expand(0.0);
    let Some(mut coverage) = Coverage::for_bounds(surface, bounds) else {
        return;
    };

    coverage.accumulate(bounds, |px, py| sdf_convex_polygon(&verts, px, py));
    coverage.composite(surface, color);
}

/// Strokes a rectangle outline with a `[on, off]` dash pattern and butt caps.
///
/// The dash phase runs clockwise from the top-left corner and carries over
/// corners, like a single closed subpath.
pub fn stroke_dashed_rect(surface: &mut Surface, rect: Rect, style: StrokeStyle, dash: [f64; 2]) {
    let [on, off] = dash;
    let period = on + off;
    if on <= 0.0 || period <= 0.0 {
        return;
    }
    let half = style.half_width();
    let outer = Bounds {
        min_x: rect.x as f32,
        min_y: rect.y as f32,
        max_x: (rect.x + rect.width) as f32,
        max_y: (rect.y + rect.height) as f32,
    }
    .expand(half);
    let Some(mut coverage) = Coverage::for_bounds(surface, outer) else {
        return;
    };

    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
    let edges = [
        ((x0, y0), (1.0, 0.0), rect.width),
        ((x1, y0), (0.0, 1.0), rect.height),
        ((x1, y1), (-1.0, 0.0), rect.width),
        ((x0, y1), (0.0, -1.0), rect.height),
    ];

    let mut offset = 0.0;
    for (start, dir, length) in edges {
        let mut dash_start = (offset / period).floor() * period;
        while dash_start < offset + length {
            let t0 = (dash_start - offset).max(0.0);
            let t1 = (dash_start + on - offset).min(length);
            if t1 > t0 {
                // Pieces touching a corner extend by half the width to fill the join.
                let t0 = if t0 <= 0.0 { t0 - half as f64 } else { t0 };
                let t1 = if t1 >= length { t1 + half as f64 } else { t1 };
                let a = to_f32((start.0 + dir.0 * t0, start.1 + dir.1 * t0));
                let b = to_f32((start.0 + dir.0 * t1, start.1 + dir.1 * t1));
                let (pcx, pcy) = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
                let phx = (b.0 - a.0).abs() / 2.0 + if dir.0 == 0.0 { half } else { 0.0 };
                let phy = (b.1 - a.1).abs() / 2.0 + if dir.1 == 0.0 { half } else { 0.0 };
                let piece = Bounds {
                    min_x: pcx - phx,
                    min_y: pcy - phy,
                    max_x: pcx + phx,
                    max_y: pcy + phy,
                }
                .expand(0.0);
                coverage.accumulate(piece, |px, py| sdf_box(px - pcx, py - pcy, phx, phy));
            }
            dash_start += period;
        }
        offset += length;
    }
    coverage.composite(surface, style.color);
}

// ============================================================================
// Coverage accumulation
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    fn around(points: &[(f64, f64)]) -> Self {
        points.iter().fold(
            Self {
                min_x: f32::INFINITY,
                min_y: f32::INFINITY,
                max_x: f32::NEG_INFINITY,
                max_y: f32::NEG_INFINITY,
            },
            |b, &(x, y)| Self {
                min_x: b.min_x.min(x as f32),
                min_y: b.min_y.min(y as f32),
                max_x: b.max_x.max(x as f32),
                max_y: b.max_y.max(y as f32),
            },
        )
    }

    /// Grows by `amount` plus one pixel of anti-aliasing margin.
    fn expand(self, amount: f32) -> Self {
        let pad = amount + 1.0;
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }
}

/// Scratch alpha buffer covering a clipped region of the surface.
struct Coverage {
    x0: i32,
    y0: i32,
    width: usize,
    height: usize,
    alpha: Vec<f32>,
}

impl Coverage {
    fn for_bounds(surface: &Surface, bounds: Bounds) -> Option<Self> {
        if !(bounds.min_x.is_finite() && bounds.max_x.is_finite())
            || !(bounds.min_y.is_finite() && bounds.max_y.is_finite())
        {
            return None;
        }
        let x0 = bounds.min_x.floor().max(0.0) as i32;
        let y0 = bounds.min_y.floor().max(0.0) as i32;
        let x1 = bounds.max_x.ceil().min(surface.width() as f32) as i32;
        let y1 = bounds.max_y.ceil().min(surface.height() as f32) as i32;
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let width = (x1 - x0) as usize;
        let height = (y1 - y0) as usize;
        Some(Self {
            x0,
            y0,
            width,
            height,
            alpha: vec![0.0; width * height],
        })
    }

    /// Samples `distance` at pixel centers inside `bounds` and keeps the
    /// strongest coverage seen so far.
    fn accumulate(&mut self, bounds: Bounds, distance: impl Fn(f32, f32) -> f32) {
        let lx0 = (bounds.min_x.floor() as i32 - self.x0).max(0) as usize;
        let ly0 = (bounds.min_y.floor() as i32 - self.y0).max(0) as usize;
        let lx1 = ((bounds.max_x.ceil() as i32 - self.x0).max(0) as usize).min(self.width);
        let ly1 = ((bounds.max_y.ceil() as i32 - self.y0).max(0) as usize).min(self.height);

        for ly in ly0..ly1 {
            let py = (self.y0 + ly as i32) as f32 + 0.5;
            for lx in lx0..lx1 {
                let px = (self.x0 + lx as i32) as f32 + 0.5;
                let cov = coverage_from_distance(distance(px, py));
                let slot = &mut self.alpha[ly * self.width + lx];
                if cov > *slot {
                    *slot = cov;
                }
            }
        }
    }

    fn composite(self, surface: &mut Surface, color: Color) {
        for ly in 0..self.height {
            for lx in 0..self.width {
                let cov = self.alpha[ly * self.width + lx];
                if cov > 0.0 {
                    surface.blend(self.x0 + lx as i32, self.y0 + ly as i32, color, cov);
                }
            }
        }
    }
}

// ============================================================================
// Signed distance functions (negative = inside)
// ============================================================================

#[inline]
fn to_f32((x, y): (f64, f64)) -> (f32, f32) {
    (x as f32, y as f32)
}

/// One pixel of anti-aliasing centered on the edge.
#[inline]
fn coverage_from_distance(d: f32) -> f32 {
    1.0 - smoothstep(-0.5, 0.5, d)
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Box centered at origin with half-extents (hx, hy).
#[inline]
fn sdf_box(px: f32, py: f32, hx: f32, hy: f32) -> f32 {
    let dx = px.abs() - hx;
    let dy = py.abs() - hy;
    let outside = (dx.max(0.0) * dx.max(0.0) + dy.max(0.0) * dy.max(0.0)).sqrt();
    let inside = dx.max(dy).min(0.0);
    outside + inside
}

/// Approximate distance to an ellipse centered at origin.
#[inline]
fn sdf_ellipse(px: f32, py: f32, rx: f32, ry: f32) -> f32 {
    let nx = px / rx;
    let ny = py / ry;
    let len = (nx * nx + ny * ny).sqrt();
    if len < 1e-8 {
        return -rx.min(ry);
    }
    let scale = (rx * rx * ny * ny + ry * ry * nx * nx).sqrt() / (rx * ry * len);
    (len - 1.0) / scale
}

/// Unsigned distance to a segment; a zero-length segment is a point.
#[inline]
fn sdf_segment(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    let len2 = dx * dx + dy * dy;
    let t = if len2 > f32::EPSILON {
        (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let cx = ax + t * dx;
    let cy = ay + t * dy;
    ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}

/// Signed distance to a convex polygon, either winding.
fn sdf_convex_polygon(verts: &[(f32, f32)], px: f32, py: f32) -> f32 {
    let n = verts.len();
    let mut d = (px - verts[0].0) * (px - verts[0].0) + (py - verts[0].1) * (py - verts[0].1);
    let mut s: f32 = 1.0;
    let mut j = n - 1;
    for i in 0..n {
        let ex = verts[j].0 - verts[i].0;
        let ey = verts[j].1 - verts[i].1;
        let wx = px - verts[i].0;
        let wy = py - verts[i].1;
        let len2 = ex * ex + ey * ey;
        let t = if len2 > f32::EPSILON {
            ((wx * ex + wy * ey) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let bx = wx - ex * t;
        let by = wy - ey * t;
        d = d.min(bx * bx + by * by);
        let c1 = py >= verts[i].1;
        let c2 = py < verts[j].1;
        let c3 = ex * wy > ey * wx;
        if (c1 && c2 && c3) || (!c1 && !c2 && !c3) {
            s = -s;
        }
        j = i;
    }
    s * d.sqrt()
}
