//! The drawing surface an engine paints onto.
//!
//! Engines only ever write to a [`Surface`] through `draw_line`; they never
//! read pixels back. Rasterization details (clipping, anti-aliasing, width)
//! belong to the implementation.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// A 2D pixel surface that can draw straight segments.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> usize;

    /// Surface height in pixels.
    fn height(&self) -> usize;

    /// Draws a straight segment from `(x1, y1)` to `(x2, y2)` in `color`.
    ///
    /// Endpoints may lie outside the surface.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb);
}

/// One recorded `draw_line` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCall {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub color: Rgb,
}

/// A surface that records every call in order instead of rasterizing.
#[derive(Debug, Clone, Default)]
pub struct DrawRecorder {
    width: usize,
    height: usize,
    calls: Vec<DrawCall>,
}

impl DrawRecorder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Consumes the recorder, returning its calls.
    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }
}

impl Surface for DrawRecorder {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
        self.calls.push(DrawCall {
            from: (x1, y1),
            to: (x2, y2),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_starts_empty() {
        let rec = DrawRecorder::new(10, 20);
        assert_eq!(rec.width(), 10);
        assert_eq!(rec.height(), 20);
        assert!(rec.calls().is_empty());
    }

    #[test]
    fn recorder_keeps_call_order() {
        let mut rec = DrawRecorder::new(10, 10);
        rec.draw_line(0, 0, 1, 1, Rgb::BLACK);
        rec.draw_line(-5, 3, 20, 4, Rgb::WHITE);
        let calls = rec.into_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].to, (1, 1));
        assert_eq!(calls[1].from, (-5, 3));
        assert_eq!(calls[1].color, Rgb::WHITE);
    }

    #[test]
    fn recorder_is_usable_as_trait_object() {
        let mut rec = DrawRecorder::new(4, 4);
        {
            let surface: &mut dyn Surface = &mut rec;
            surface.draw_line(0, 0, 3, 3, Rgb::gray(9));
        }
        assert_eq!(rec.calls()[0].color, Rgb::gray(9));
    }
}
