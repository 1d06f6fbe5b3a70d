//! Error types for imtool-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! the internal storage layout.

use thiserror::Error;

/// imtool core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Maximum channel value outside [1, 65535]
    #[error("invalid maximum channel value: {0} (expected 1..=65535)")]
    InvalidMaxValue(u32),

    /// A channel value exceeds the image's maximum channel value
    #[error("channel value {value} exceeds maximum channel value {max}")]
    ChannelOutOfRange { value: u16, max: u16 },

    /// Pixel count does not match width * height
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for imtool core operations
pub type Result<T> = std::result::Result<T, Error>;
