//! Raster primitives: decode, resize, fill, overlay and encode.
//!
//! Everything works on `RgbaImage` with straight (non-premultiplied) alpha.
//! Overlays clip to the destination; nothing here checks that the overlay
//! fits.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use tracing::trace;

use crate::error::{Error, Result};
use crate::geometry::{SizePx, centered_origin};
use crate::options::ResampleFilter;

// ============================================================================
// Decode / Encode
// ============================================================================

/// Decodes an image in any format the `image` crate recognizes.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(Error::Decode)
}

/// Encodes `img` as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(Error::Raster)?;
    Ok(buf.into_inner())
}

// ============================================================================
// Resize / Fill
// ============================================================================

/// Resizes `img` to exactly `size`, ignoring its aspect ratio.
pub fn resize(img: &DynamicImage, size: SizePx, filter: ResampleFilter) -> RgbaImage {
    trace!(
        from_width = img.width(),
        from_height = img.height(),
        to_width = size.width,
        to_height = size.height,
        ?filter,
        "Resizing image"
    );
    imageops::resize(img, size.width, size.height, filter.into())
}

/// Returns a `size` canvas painted with `color` at `opacity`.
///
/// The canvas starts fully transparent, so `opacity` 1.0 yields `color`
/// exactly and 0.0 leaves it transparent.
pub fn fill(size: SizePx, color: Rgba<u8>, opacity: f32) -> RgbaImage {
    let mut canvas = RgbaImage::new(size.width, size.height);
    for pixel in canvas.pixels_mut() {
        *pixel = alpha_blend(color, *pixel, opacity);
    }
    canvas
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites `src` onto `dest` with its top-left corner at (`x`, `y`).
///
/// Source alpha is scaled by `opacity`. Pixels falling outside `dest` are
/// dropped.
pub fn overlay(dest: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, opacity: f32) {
    let dest_width = i64::from(dest.width());
    let dest_height = i64::from(dest.height());

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + i64::from(sx);
        let dy = y + i64::from(sy);

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel_mut(dx as u32, dy as u32);
        *dst_pixel = alpha_blend(*src_pixel, *dst_pixel, opacity);
    }
}

/// Composites `src` centered on `dest`.
pub fn overlay_centered(dest: &mut RgbaImage, src: &RgbaImage, opacity: f32) {
    let outer = SizePx::new(dest.width(), dest.height());
    let inner = SizePx::new(src.width(), src.height());
    let (x, y) = centered_origin(outer, inner);
    overlay(dest, src, x, y, opacity);
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * opacity.clamp(0.0, 1.0);
    let da = dst[3] as f32 / 255.0;

    let src_weight = sa;
    let dst_weight = da * (1.0 - sa);
    let out_a = src_weight + dst_weight;

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let out = (s as f32 * src_weight + d as f32 * dst_weight) / out_a;
        out.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round().min(255.0) as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn fill_is_opaque_at_full_opacity() {
        let plate = fill(SizePx::new(7, 3), WHITE, 1.0);
        assert_eq!(plate.dimensions(), (7, 3));
        assert!(plate.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn fill_at_zero_opacity_stays_transparent() {
        let plate = fill(SizePx::new(2, 2), WHITE, 0.0);
        assert!(plate.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn overlay_simple() {
        let mut dest = RgbaImage::from_pixel(10, 10, RED);
        let src = RgbaImage::from_pixel(4, 4, BLUE);

        overlay(&mut dest, &src, 3, 3, 1.0);

        assert_eq!(*dest.get_pixel(5, 5), BLUE);
        assert_eq!(*dest.get_pixel(0, 0), RED);
        assert_eq!(*dest.get_pixel(7, 7), RED);
    }

    #[test]
    fn overlay_with_transparency() {
        let mut dest = RgbaImage::from_pixel(10, 10, RED);
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]));

        overlay(&mut dest, &src, 0, 0, 1.0);

        let pixel = dest.get_pixel(0, 0);
        assert!(pixel[0] > 0, "Should have some red");
        assert!(pixel[2] > 0, "Should have some blue");
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn overlay_transparent_source_leaves_dest() {
        let mut dest = RgbaImage::from_pixel(4, 4, RED);
        let src = RgbaImage::new(4, 4);
        overlay(&mut dest, &src, 0, 0, 1.0);
        assert!(dest.pixels().all(|p| *p == RED));
    }

    #[test]
    fn overlay_clips_at_bounds() {
        let mut dest = RgbaImage::from_pixel(4, 4, RED);
        let src = RgbaImage::from_pixel(10, 10, BLUE);

        overlay(&mut dest, &src, -3, -3, 1.0);

        assert!(dest.pixels().all(|p| *p == BLUE));
        assert_eq!(dest.dimensions(), (4, 4));
    }

    #[test]
    fn overlay_centered_places_in_middle() {
        let mut dest = RgbaImage::from_pixel(10, 10, RED);
        let src = RgbaImage::from_pixel(4, 4, BLUE);

        overlay_centered(&mut dest, &src, 1.0);

        // 10/2 - 4/2 = 3, so columns and rows 3..7 are covered.
        for (x, y, pixel) in dest.enumerate_pixels() {
            let inside = (3..7).contains(&x) && (3..7).contains(&y);
            assert_eq!(*pixel, if inside { BLUE } else { RED }, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn resize_ignores_aspect_ratio() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 20, BLUE));
        let out = resize(&img, SizePx::new(30, 30), ResampleFilter::Linear);
        assert_eq!(out.dimensions(), (30, 30));
        assert_eq!(*out.get_pixel(15, 15), BLUE);
    }

    #[test]
    fn png_encode_then_decode_keeps_pixels() {
        let img = RgbaImage::from_pixel(5, 3, BLUE);
        let bytes = encode_png(&img).unwrap();
        let decoded = decode(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
