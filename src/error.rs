//! Error types surfaced by QR generation and logo compositing.

use thiserror::Error;

/// Reasons a piece of content cannot be turned into a symbol.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The content string was empty.
    #[error("no data to encode")]
    EmptyContent,

    /// The QR encoder rejected the data, typically because it exceeds the
    /// capacity of the largest version at the requested recovery level.
    #[error(transparent)]
    Symbol(#[from] qrcode::types::QrError),
}

/// Errors returned by [`Generator`](crate::Generator) and the image operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Content could not be encoded at the configured recovery level.
    #[error("failed to encode content: {0}")]
    Encoding(#[from] EncodingError),

    /// Logo bytes are not a recognizable raster format.
    #[error("failed to decode logo image: {0}")]
    Decode(#[source] image::ImageError),

    /// The composed raster could not be written out.
    #[error("failed to encode output image: {0}")]
    Raster(#[source] image::ImageError),

    /// A logo with no area has no aspect ratio to preserve.
    #[error("logo must have non-zero dimensions, got {width}x{height}")]
    EmptyLogo { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
