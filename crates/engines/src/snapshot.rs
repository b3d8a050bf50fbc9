//! PNG output of a [`PixelSurface`].
//!
//! This module is feature-gated behind `png` (default on) so consumers that
//! only need the in-memory surface avoid the `image` crate.

use flowfield_core::error::EngineError;
use flowfield_core::Surface;
use std::path::Path;

use crate::pixel::PixelSurface;

/// Writes the surface as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the surface dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(surface: &PixelSurface, path: &Path) -> Result<(), EngineError> {
    let w = u32::try_from(surface.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.data().to_vec())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::Rgb;

    #[test]
    fn write_png_round_trip() {
        let mut surface = PixelSurface::new(16, 12, Rgb::BLACK).unwrap();
        surface.draw_line(0, 0, 15, 11, Rgb::WHITE);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.png");

        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 12);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(15, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let surface = PixelSurface::new(4, 4, Rgb::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/flow.png");
        assert!(matches!(
            write_png(&surface, &path),
            Err(EngineError::Io(_))
        ));
    }
}
