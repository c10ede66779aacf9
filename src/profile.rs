//! Serializable generator settings.
//!
//! A [`GeneratorProfile`] captures generation settings in a JSON-friendly
//! form so they can be handed between processes. Every field is optional;
//! a missing field keeps its default.
//!
//! # Example
//!
//! ```
//! use qrlogo::{Generator, GeneratorProfile, RecoveryLevel};
//!
//! let profile = GeneratorProfile::new()
//!     .with_size(512)
//!     .with_recovery_level(RecoveryLevel::Quartile);
//!
//! let json = profile.to_json().unwrap();
//! let restored = GeneratorProfile::from_json(&json).unwrap();
//!
//! let generator = Generator::from_profile(&restored);
//! assert_eq!(generator.settings().size(), 512);
//! ```

use serde::{Deserialize, Serialize};

use crate::options::{GeneratorOption, RecoveryLevel, ResampleFilter, Settings};

/// A serializable set of generator overrides.
///
/// # JSON Format
///
/// ```json
/// {
///   "size": 300,
///   "logoOccupancy": 0.05,
///   "logoMargin": 2,
///   "recoveryLevel": "high",
///   "resampleFilter": "linear"
/// }
/// ```
///
/// The QR margin is not part of the profile; it is always derived from
/// `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GeneratorProfile {
    /// Raster width and height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Fraction of the usable area covered by the backing plate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_occupancy: Option<f64>,

    /// Pixels trimmed from the plate size to get the logo size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_margin: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_level: Option<RecoveryLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resample_filter: Option<ResampleFilter>,
}

impl GeneratorProfile {
    /// Creates an empty profile with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_logo_occupancy(mut self, occupancy: f64) -> Self {
        self.logo_occupancy = Some(occupancy);
        self
    }

    pub fn with_logo_margin(mut self, margin: u32) -> Self {
        self.logo_margin = Some(margin);
        self
    }

    pub fn with_recovery_level(mut self, level: RecoveryLevel) -> Self {
        self.recovery_level = Some(level);
        self
    }

    pub fn with_resample_filter(mut self, filter: ResampleFilter) -> Self {
        self.resample_filter = Some(filter);
        self
    }

    /// Returns the overrides this profile sets, in field order.
    pub fn options(&self) -> Vec<GeneratorOption> {
        [
            self.size.map(GeneratorOption::Size),
            self.logo_occupancy.map(GeneratorOption::LogoOccupancy),
            self.logo_margin.map(GeneratorOption::LogoMargin),
            self.recovery_level.map(GeneratorOption::RecoveryLevel),
            self.resample_filter.map(GeneratorOption::ResampleFilter),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&Settings> for GeneratorProfile {
    fn from(settings: &Settings) -> Self {
        Self {
            size: Some(settings.size()),
            logo_occupancy: Some(settings.logo_occupancy()),
            logo_margin: Some(settings.logo_margin()),
            recovery_level: Some(settings.recovery_level()),
            resample_filter: Some(settings.resample_filter()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
