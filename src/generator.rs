//! QR code generation with an optional centered logo.

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{RectPx, SizePx, centered_rect, plate_size};
use crate::ops;
use crate::options::{GeneratorOption, Settings};
use crate::profile::GeneratorProfile;
use crate::symbol::{QrEncoder, SymbolEncoder, render_symbol};

const PLATE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

// ============================================================================
// Generator
// ============================================================================

/// Builds QR code rasters and composites logos onto them.
///
/// Settings are fixed at construction. Each [`generate`](Self::generate)
/// call allocates its own images and keeps no state, so a generator can be
/// shared by reference across threads.
///
/// # Layering
///
/// ```text
/// ┌──────────────────────────────┐
/// │ QR raster (size x size)      │
/// │      ┌──────────────┐        │
/// │      │ white plate  │ ◄──────┼── plate_size(logo, usable, occupancy)
/// │      │   ┌──────┐   │        │
/// │      │   │ logo │ ◄─┼────────┼── plate - logo_margin, stretched
/// │      │   └──────┘   │        │
/// │      └──────────────┘        │
/// └──────────────────────────────┘
/// ```
///
/// # Example
///
/// ```
/// use qrlogo::{Generator, GeneratorOption};
///
/// let generator = Generator::new([GeneratorOption::Size(200)]);
/// let img = generator.generate("HELLO", None).unwrap();
/// assert_eq!(img.dimensions(), (200, 200));
/// ```
#[derive(Debug, Clone)]
pub struct Generator<E = QrEncoder> {
    settings: Settings,
    encoder: E,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new([])
    }
}

impl Generator<QrEncoder> {
    /// Creates a QR generator with `options` applied over the defaults.
    pub fn new(options: impl IntoIterator<Item = GeneratorOption>) -> Self {
        Self::with_encoder(QrEncoder, options)
    }

    /// Creates a QR generator from a serialized profile.
    ///
    /// Fields missing from the profile keep their defaults.
    pub fn from_profile(profile: &GeneratorProfile) -> Self {
        Self::new(profile.options())
    }
}

impl<E: SymbolEncoder> Generator<E> {
    /// Creates a generator that encodes with `encoder`.
    pub fn with_encoder(encoder: E, options: impl IntoIterator<Item = GeneratorOption>) -> Self {
        Self {
            settings: Settings::from_options(options),
            encoder,
        }
    }

    /// Returns the frozen settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Exports the settings as a serializable profile.
    pub fn export_profile(&self) -> GeneratorProfile {
        GeneratorProfile::from(&self.settings)
    }

    /// Encodes `content` and renders it at the configured size, then
    /// composites `logo` over the center if one is given.
    ///
    /// The result is always `size x size`. Encoding failures are returned
    /// as [`Error::Encoding`]; a logo with a zero side is rejected with
    /// [`Error::EmptyLogo`].
    pub fn generate(&self, content: &str, logo: Option<&DynamicImage>) -> Result<RgbaImage> {
        let symbol = self
            .encoder
            .encode(content, self.settings.recovery_level())?;

        let size = self.settings.size();
        let mut img = render_symbol(&symbol, size);

        debug!(
            size,
            modules = symbol.width(),
            level = ?self.settings.recovery_level(),
            "Rendered symbol"
        );

        let Some(logo) = logo else {
            return Ok(img);
        };

        let plate = self.compose_plate(logo)?;
        ops::overlay_centered(&mut img, &plate, 1.0);

        Ok(img)
    }

    /// Returns the backing plate size for a logo of the given dimensions.
    pub fn plate_size(&self, logo: SizePx) -> SizePx {
        plate_size(
            logo,
            self.settings.usable(),
            self.settings.logo_occupancy(),
        )
    }

    /// Returns where the plate lands on the raster for a logo of the given
    /// dimensions. Pixels outside this rectangle are untouched by the logo.
    pub fn plate_rect(&self, logo: SizePx) -> RectPx {
        let raster = SizePx::new(self.settings.size(), self.settings.size());
        centered_rect(raster, self.plate_size(logo))
    }

    /// Builds the white plate with the resized logo centered on it.
    fn compose_plate(&self, logo: &DynamicImage) -> Result<RgbaImage> {
        let logo_size = SizePx::new(logo.width(), logo.height());
        if logo_size.is_empty() {
            return Err(Error::EmptyLogo {
                width: logo_size.width,
                height: logo_size.height,
            });
        }

        let plate_size = self.plate_size(logo_size);
        let fitted = plate_size.shrink(self.settings.logo_margin());

        debug!(
            logo_width = logo_size.width,
            logo_height = logo_size.height,
            plate_width = plate_size.width,
            plate_height = plate_size.height,
            fitted_width = fitted.width,
            fitted_height = fitted.height,
            "Computed logo placement"
        );

        let mut plate = ops::fill(plate_size, PLATE_COLOR, 1.0);

        if fitted.is_empty() {
            debug!("Logo margin leaves no room, placing bare plate");
            return Ok(plate);
        }

        let resized = ops::resize(logo, fitted, self.settings.resample_filter());
        ops::overlay_centered(&mut plate, &resized, 1.0);

        Ok(plate)
    }
}

// ============================================================================
// Tests
// ============================================================================
