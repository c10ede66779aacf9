//! Generation settings and the options that build them.
//!
//! Settings start from fixed defaults, then a list of [`GeneratorOption`]s is
//! applied in order. The last `Size` wins and always recomputes the reserved
//! QR margin, so the margin can never drift from the size.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Default raster width and height in pixels.
pub const DEFAULT_SIZE: u32 = 300;

/// Default fraction of the usable area taken by the backing plate.
pub const DEFAULT_LOGO_OCCUPANCY: f64 = 0.05;

/// Default padding in pixels between plate edge and logo.
pub const DEFAULT_LOGO_MARGIN: u32 = 2;

/// Fraction of `size` kept logo-free around the symbol.
pub const QRCODE_MARGIN_RATE: f64 = 0.13;

// ============================================================================
// RecoveryLevel
// ============================================================================

/// Error-correction strength of the encoded symbol.
///
/// Higher levels tolerate more occlusion at the cost of capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum RecoveryLevel {
    /// Recovers about 7% of codewords.
    Low,
    /// Recovers about 15% of codewords.
    Medium,
    /// Recovers about 25% of codewords.
    Quartile,
    /// Recovers about 30% of codewords.
    #[default]
    High,
}

impl From<RecoveryLevel> for qrcode::EcLevel {
    fn from(level: RecoveryLevel) -> Self {
        match level {
            RecoveryLevel::Low => Self::L,
            RecoveryLevel::Medium => Self::M,
            RecoveryLevel::Quartile => Self::Q,
            RecoveryLevel::High => Self::H,
        }
    }
}

// ============================================================================
// ResampleFilter
// ============================================================================

/// Resampling algorithm used when the logo is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ResampleFilter {
    /// Nearest neighbor. Fastest, keeps hard pixel edges.
    Nearest,
    /// Bilinear (triangle) filter.
    #[default]
    Linear,
    /// Cubic Catmull-Rom spline. Sharper than linear on downscales.
    CatmullRom,
    /// Gaussian blur kernel. Soft edges, no ringing.
    Gaussian,
    /// Lanczos with window 3. Sharpest, may ring around high-contrast edges.
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Linear => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Gaussian => Self::Gaussian,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

// ============================================================================
// GeneratorOption
// ============================================================================

/// A single named override, applied on top of the defaults.
///
/// Values are not validated; nonsensical values show up as odd output when
/// generating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorOption {
    /// Raster width and height in pixels. Also resets the QR margin.
    Size(u32),
    /// Fraction of the usable area covered by the backing plate, in (0, 1].
    LogoOccupancy(f64),
    /// Pixels trimmed from the plate size to get the logo size.
    LogoMargin(u32),
    /// Error-correction level handed to the encoder. Plate geometry does not
    /// depend on it.
    RecoveryLevel(RecoveryLevel),
    /// Filter used when stretching the logo onto the plate.
    ResampleFilter(ResampleFilter),
}

impl GeneratorOption {
    /// Writes this override into `settings`.
    pub fn apply(self, settings: &mut Settings) {
        match self {
            Self::Size(size) => {
                settings.size = size;
                settings.qrcode_margin = qrcode_margin_for(size);
            }
            Self::LogoOccupancy(occupancy) => settings.logo_occupancy = occupancy,
            Self::LogoMargin(margin) => settings.logo_margin = margin,
            Self::RecoveryLevel(level) => settings.recovery_level = level,
            Self::ResampleFilter(filter) => settings.resample_filter = filter,
        }
    }
}

/// Returns `floor(size * 0.13)`.
pub fn qrcode_margin_for(size: u32) -> u32 {
    (f64::from(size) * QRCODE_MARGIN_RATE) as u32
}

// ============================================================================
// Settings
// ============================================================================

/// Frozen generation parameters.
///
/// Built once from options and read-only afterwards. There is no way to set
/// the QR margin directly; it always follows the size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    size: u32,
    qrcode_margin: u32,
    logo_occupancy: f64,
    logo_margin: u32,
    recovery_level: RecoveryLevel,
    resample_filter: ResampleFilter,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            size: 0,
            qrcode_margin: 0,
            logo_occupancy: DEFAULT_LOGO_OCCUPANCY,
            logo_margin: DEFAULT_LOGO_MARGIN,
            recovery_level: RecoveryLevel::High,
            resample_filter: ResampleFilter::Linear,
        };
        GeneratorOption::Size(DEFAULT_SIZE).apply(&mut settings);
        settings
    }
}

impl Settings {
    /// Applies `options` in order on top of the defaults.
    ///
    /// ```
    /// use qrlogo::{GeneratorOption, Settings};
    ///
    /// let settings = Settings::from_options([
    ///     GeneratorOption::LogoMargin(4),
    ///     GeneratorOption::Size(500),
    /// ]);
    /// assert_eq!(settings.size(), 500);
    /// assert_eq!(settings.qrcode_margin(), 65);
    /// ```
    pub fn from_options(options: impl IntoIterator<Item = GeneratorOption>) -> Self {
        let mut settings = Self::default();
        for option in options {
            option.apply(&mut settings);
        }
        settings
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Border width reserved inside the raster, `floor(size * 0.13)`.
    pub fn qrcode_margin(&self) -> u32 {
        self.qrcode_margin
    }

    /// Side of the square area the plate is sized against.
    pub fn usable(&self) -> u32 {
        self.size.saturating_sub(self.qrcode_margin)
    }

    pub fn logo_occupancy(&self) -> f64 {
        self.logo_occupancy
    }

    pub fn logo_margin(&self) -> u32 {
        self.logo_margin
    }

    pub fn recovery_level(&self) -> RecoveryLevel {
        self.recovery_level
    }

    pub fn resample_filter(&self) -> ResampleFilter {
        self.resample_filter
    }
}
