//! Pixel geometry for logo placement.
//!
//! The logo sits on an opaque "backing plate" whose area is a fixed fraction
//! of the usable barcode area. The plate keeps the logo's aspect ratio, so a
//! wide logo gets a wide plate of the same area a square logo would get.

/// A rectangle defined in pixel coordinates.
///
/// Coordinates are signed because a plate larger than the barcode is centered
/// at a negative offset and clipped by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: i64,
    /// Y offset from the top edge of the image
    pub y: i64,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width), exclusive.
    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Returns the bottom edge coordinate (y + height), exclusive.
    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }

    /// Returns true if the pixel at (`px`, `py`) lies inside the rectangle.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        let (px, py) = (i64::from(px), i64::from(py));
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Returns true if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrinks both sides by `amount`, stopping at zero.
    pub fn shrink(&self, amount: u32) -> Self {
        Self::new(
            self.width.saturating_sub(amount),
            self.height.saturating_sub(amount),
        )
    }
}

/// Computes the backing plate for a logo of size `logo`.
///
/// The plate area targets `usable² * occupancy` and its sides keep the
/// logo's `width / height` ratio. Both sides are truncated toward zero.
///
/// `logo.height` must be non-zero; a zero height yields an empty plate.
///
/// ```
/// use qrlogo::{plate_size, SizePx};
///
/// let plate = plate_size(SizePx::new(100, 100), 261, 0.05);
/// assert_eq!(plate, SizePx::new(58, 58));
/// ```
pub fn plate_size(logo: SizePx, usable: u32, occupancy: f64) -> SizePx {
    if logo.is_empty() {
        return SizePx::default();
    }

    let area = f64::from(usable).powi(2) * occupancy;
    let ratio = f64::from(logo.width) / f64::from(logo.height);

    let height = (area / ratio).sqrt();
    let width = height * ratio;

    // `as` saturates: NaN and negatives become 0.
    SizePx::new(width as u32, height as u32)
}

/// Returns the top-left corner that centers `inner` on `outer`.
///
/// Each half is rounded down independently, so an odd leftover pixel lands
/// on the right/bottom edge.
pub fn centered_origin(outer: SizePx, inner: SizePx) -> (i64, i64) {
    let x = i64::from(outer.width / 2) - i64::from(inner.width / 2);
    let y = i64::from(outer.height / 2) - i64::from(inner.height / 2);
    (x, y)
}

/// Returns the rectangle `inner` occupies when centered on `outer`.
pub fn centered_rect(outer: SizePx, inner: SizePx) -> RectPx {
    let (x, y) = centered_origin(outer, inner);
    RectPx::new(x, y, inner.width, inner.height)
}
