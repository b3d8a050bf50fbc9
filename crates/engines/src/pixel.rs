//! In-memory RGBA8 surface with clipped Bresenham line drawing.
//!
//! This module is always available (no feature gate) so tests and non-PNG
//! consumers can rasterize without pulling in the `image` crate.

use flowfield_core::error::EngineError;
use flowfield_core::{Rgb, Surface};

/// An opaque RGBA8 pixel buffer that engines draw onto.
///
/// Lines overwrite what is underneath, so later strokes layer on top of
/// earlier ones. Segments are clipped to the buffer before rasterizing, so
/// endpoints far outside the surface cost nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    background: Rgb,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Creates a surface filled with `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero,
    /// if the byte length overflows `usize`, or if a dimension does not fit
    /// in `i32` pixel coordinates.
    pub fn new(width: usize, height: usize, background: Rgb) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..width * height {
            data.extend_from_slice(&background.to_rgba());
        }
        Ok(Self {
            width,
            height,
            background,
            data,
        })
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Row-major RGBA bytes, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the surface, returning its RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Number of pixels that differ from the background.
    pub fn painted_pixels(&self) -> usize {
        let bg = self.background.to_rgba();
        self.data.chunks_exact(4).filter(|px| *px != bg).count()
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&color.to_rgba());
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let Some((cx1, cy1, cx2, cy2)) = clip_segment(
            (x1 as f64, y1 as f64),
            (x2 as f64, y2 as f64),
            max_x,
            max_y,
        ) else {
            return;
        };

        // Bresenham over the clipped, rounded endpoints.
        let (mut x, mut y) = (cx1.round() as i64, cy1.round() as i64);
        let (x_end, y_end) = (cx2.round() as i64, cy2.round() as i64);
        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let sy = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, color);
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Liang-Barsky clip of segment `a -> b` to `[0, max_x] × [0, max_y]`.
///
/// Returns the visible part, or `None` when the segment misses the box.
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    max_x: f64,
    max_y: f64,
) -> Option<(f64, f64, f64, f64)> {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, a.0),
        (dx, max_x - a.0),
        (-dy, a.1),
        (dy, max_y - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (a.0 + t0 * dx).clamp(0.0, max_x),
        (a.1 + t0 * dy).clamp(0.0, max_y),
        (a.0 + t1 * dx).clamp(0.0, max_x),
        (a.1 + t1 * dy).clamp(0.0, max_y),
    ))
}
