//! Symbol encoding and rasterization.
//!
//! A [`Symbol`] is the module grid produced by a [`SymbolEncoder`], already
//! surrounded by its light quiet zone. [`render_symbol`] turns it into a
//! square RGBA raster of any requested size.

use image::{Rgba, RgbaImage};
use qrcode::{Color, QrCode};
use tracing::trace;

use crate::error::EncodingError;
use crate::options::RecoveryLevel;

/// Light modules on each side of the data region.
pub const QUIET_ZONE: usize = 4;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

// ============================================================================
// Symbol
// ============================================================================

/// A square grid of dark and light modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    width: usize,
    modules: Vec<bool>,
}

impl Symbol {
    /// Wraps a row-major grid of `width * width` modules (`true` = dark),
    /// adding a quiet zone of `quiet_zone` light modules on every side.
    ///
    /// Returns `None` if `modules.len()` is not `width * width`.
    pub fn from_modules(width: usize, modules: &[bool], quiet_zone: usize) -> Option<Self> {
        if modules.len() != width * width {
            return None;
        }

        let full = width + 2 * quiet_zone;
        let mut grid = vec![false; full * full];
        for (row, chunk) in modules.chunks(width.max(1)).enumerate().take(width) {
            let start = (row + quiet_zone) * full + quiet_zone;
            grid[start..start + width].copy_from_slice(chunk);
        }

        Some(Self {
            width: full,
            modules: grid,
        })
    }

    /// Width in modules, quiet zone included.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns true if the module at (`x`, `y`) is dark.
    ///
    /// Out-of-range coordinates read as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }
}

// ============================================================================
// SymbolEncoder
// ============================================================================

/// Turns text into a scannable module grid.
pub trait SymbolEncoder {
    fn encode(&self, content: &str, level: RecoveryLevel) -> Result<Symbol, EncodingError>;
}

/// QR Code encoder backed by the `qrcode` crate.
///
/// Picks the smallest version that fits the content at the requested level.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl SymbolEncoder for QrEncoder {
    fn encode(&self, content: &str, level: RecoveryLevel) -> Result<Symbol, EncodingError> {
        if content.is_empty() {
            return Err(EncodingError::EmptyContent);
        }

        let code = QrCode::with_error_correction_level(content.as_bytes(), level.into())?;
        let width = code.width();
        let modules: Vec<bool> = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();

        trace!(width, ?level, "Encoded QR symbol");

        Symbol::from_modules(width, &modules, QUIET_ZONE)
            .ok_or(EncodingError::Symbol(qrcode::types::QrError::InvalidVersion))
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders `symbol` to an opaque `size x size` raster.
///
/// Each pixel takes the color of the module it falls into, found by scaling
/// the pixel coordinate by `symbol.width() / size` and truncating. When
/// `size` is not a multiple of the grid width some modules come out one
/// pixel wider than others.
pub fn render_symbol(symbol: &Symbol, size: u32) -> RgbaImage {
    let grid = symbol.width() as u64;
    let side = u64::from(size);

    RgbaImage::from_fn(size, size, |x, y| {
        let mx = (u64::from(x) * grid / side) as usize;
        let my = (u64::from(y) * grid / side) as usize;
        if symbol.is_dark(mx, my) { DARK } else { LIGHT }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_modules_adds_quiet_zone() {
        let symbol = Symbol::from_modules(2, &[true, false, false, true], 1).unwrap();
        assert_eq!(symbol.width(), 4);
        assert!(!symbol.is_dark(0, 0));
        assert!(symbol.is_dark(1, 1));
        assert!(!symbol.is_dark(2, 1));
        assert!(symbol.is_dark(2, 2));
        assert!(!symbol.is_dark(3, 3));
        assert!(!symbol.is_dark(10, 10));
    }

    #[test]
    fn from_modules_rejects_wrong_length() {
        assert!(Symbol::from_modules(3, &[true; 8], 0).is_none());
    }

    #[test]
    fn qr_encoder_produces_version_one_for_short_text() {
        let symbol = QrEncoder.encode("HELLO", RecoveryLevel::High).unwrap();
        // Version 1 is 21 modules wide, plus 4 quiet modules per side.
        assert_eq!(symbol.width(), 21 + 2 * QUIET_ZONE);
    }

    #[test]
    fn qr_encoder_places_finder_patterns() {
        let symbol = QrEncoder.encode("HELLO", RecoveryLevel::Medium).unwrap();
        let q = QUIET_ZONE;
        // Outer ring of the top-left finder pattern is dark, its inner ring light.
        assert!(symbol.is_dark(q, q));
        assert!(symbol.is_dark(q + 6, q));
        assert!(!symbol.is_dark(q + 1, q + 1));
        assert!(symbol.is_dark(q + 3, q + 3));
    }

    #[test]
    fn qr_encoder_rejects_empty_content() {
        let err = QrEncoder.encode("", RecoveryLevel::High).unwrap_err();
        assert!(matches!(err, EncodingError::EmptyContent));
    }

    #[test]
    fn qr_encoder_rejects_oversized_content() {
        let content = "x".repeat(4000);
        let err = QrEncoder.encode(&content, RecoveryLevel::High).unwrap_err();
        assert!(matches!(err, EncodingError::Symbol(_)));
    }

    #[test]
    fn render_is_exactly_requested_size() {
        let symbol = QrEncoder.encode("HELLO", RecoveryLevel::High).unwrap();
        for size in [1, 29, 100, 300, 301] {
            let img = render_symbol(&symbol, size);
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[test]
    fn render_samples_modules_at_their_centers() {
        let symbol = QrEncoder.encode("HELLO", RecoveryLevel::High).unwrap();
        let ppm = 10;
        let size = symbol.width() as u32 * ppm;
        let img = render_symbol(&symbol, size);

        for my in 0..symbol.width() {
            for mx in 0..symbol.width() {
                let px = img.get_pixel(mx as u32 * ppm + ppm / 2, my as u32 * ppm + ppm / 2);
                let expected = if symbol.is_dark(mx, my) { DARK } else { LIGHT };
                assert_eq!(*px, expected, "module ({mx}, {my})");
            }
        }
    }

    #[test]
    fn render_corners_are_quiet() {
        let symbol = QrEncoder.encode("HELLO", RecoveryLevel::High).unwrap();
        let img = render_symbol(&symbol, 300);
        assert_eq!(*img.get_pixel(0, 0), LIGHT);
        assert_eq!(*img.get_pixel(299, 299), LIGHT);
    }

    #[test]
    fn render_zero_size_is_empty() {
        let symbol = QrEncoder.encode("HELLO", RecoveryLevel::High).unwrap();
        assert_eq!(render_symbol(&symbol, 0).dimensions(), (0, 0));
    }
}
