//! qrlogo: QR codes with a logo in the middle
//!
//! This crate encodes text as a QR code, renders it at a fixed pixel size and
//! optionally composites a logo over the center. The logo sits on an opaque
//! white backing plate sized as a fraction of the usable symbol area, so the
//! code stays scannable at a high recovery level.
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use qrlogo::{Generator, GeneratorOption, RecoveryLevel};
//!
//! let generator = Generator::new([
//!     GeneratorOption::Size(400),
//!     GeneratorOption::RecoveryLevel(RecoveryLevel::High),
//! ]);
//!
//! let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 32, Rgba([200, 30, 30, 255])));
//! let img = generator.generate("https://example.com", Some(&logo)).unwrap();
//! assert_eq!(img.dimensions(), (400, 400));
//!
//! let png = qrlogo::ops::encode_png(&img).unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! # Options
//!
//! Settings start from defaults (300px, 5% occupancy, 2px logo margin,
//! high recovery, linear resampling) and [`GeneratorOption`]s are applied on
//! top in order. For passing settings between processes, use
//! [`GeneratorProfile`].

mod error;
mod generator;
mod geometry;
mod options;
mod profile;
mod symbol;

pub mod ops;

pub use error::{EncodingError, Error, Result};
pub use generator::Generator;
pub use geometry::{RectPx, SizePx, centered_origin, centered_rect, plate_size};
pub use options::{
    DEFAULT_LOGO_MARGIN, DEFAULT_LOGO_OCCUPANCY, DEFAULT_SIZE, GeneratorOption, QRCODE_MARGIN_RATE,
    RecoveryLevel, ResampleFilter, Settings, qrcode_margin_for,
};
pub use profile::GeneratorProfile;
pub use symbol::{QUIET_ZONE, QrEncoder, Symbol, SymbolEncoder, render_symbol};
