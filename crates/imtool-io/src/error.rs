//! I/O error types
//!
//! Provides a unified error type for all image I/O operations.
//! Callers can tell apart a file that could not be opened, a file that
//! is not a well-formed image, and a well-formed file whose values are
//! out of range.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// The input could not be opened or the output could not be created
    #[error("cannot open '{}': {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrong magic tag, malformed header or truncated payload
    #[error("format error: {0}")]
    Format(String),

    /// Header or pixel value outside its allowed range
    #[error("value out of range: {0}")]
    ValueRange(String),

    /// Stream error after the file was opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] imtool_core::Error),
}

impl IoError {
    /// Map a core validation failure to the I/O error kind a caller
    /// expects from a decoder.
    pub(crate) fn from_decoded(err: imtool_core::Error) -> Self {
        use imtool_core::Error as CoreError;
        match err {
            CoreError::InvalidDimension { .. }
            | CoreError::InvalidMaxValue(_)
            | CoreError::ChannelOutOfRange { .. } => IoError::ValueRange(err.to_string()),
            other => IoError::Core(other),
        }
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
