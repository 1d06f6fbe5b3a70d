//! Image format detection
//!
//! Detects image formats by examining the magic tag at the start of the
//! data. The same [`ImageFormat`] value selects the encoder on write.

use crate::{IoError, IoResult};

/// Magic tags for format detection
pub(crate) mod magic {
    /// Length of every magic tag
    pub const LEN: usize = 2;

    /// Raw binary pixel map
    pub const PPM: &[u8; LEN] = b"P6";

    /// Indexed color-table format
    pub const COMPACT: &[u8; LEN] = b"C6";
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Raw binary pixel map (`P6`)
    Ppm,
    /// Color table plus per-pixel indices (`C6`); write-only
    Compact,
}

impl ImageFormat {
    /// The two-byte tag that starts a file of this format
    pub fn magic(self) -> &'static [u8; magic::LEN] {
        match self {
            ImageFormat::Ppm => magic::PPM,
            ImageFormat::Compact => magic::COMPACT,
        }
    }

    /// Format whose magic tag equals `tag`, if any
    pub fn from_magic(tag: &[u8]) -> Option<Self> {
        [ImageFormat::Ppm, ImageFormat::Compact]
            .into_iter()
            .find(|f| f.magic().as_slice() == tag)
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Ppm => write!(f, "PPM"),
            ImageFormat::Compact => write!(f, "compact"),
        }
    }
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < magic::LEN {
        return Err(IoError::Format(
            "not enough data to detect format".to_string(),
        ));
    }

    ImageFormat::from_magic(&data[..magic::LEN]).ok_or_else(|| {
        IoError::Format(format!(
            "unknown magic tag {:?}",
            String::from_utf8_lossy(&data[..magic::LEN])
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_ppm() {
        assert_eq!(
            detect_format_from_bytes(b"P6\n100 100\n255\n").unwrap(),
            ImageFormat::Ppm
        );
    }

    #[test]
    fn test_detect_compact() {
        assert_eq!(
            detect_format_from_bytes(b"C6 4 4 255 2\n").unwrap(),
            ImageFormat::Compact
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format_from_bytes(b"P5\n1 1\n255\n"),
            Err(IoError::Format(_))
        ));
        assert!(detect_format_from_bytes(b"P").is_err());
    }

    #[test]
    fn test_magic_tags() {
        assert_eq!(ImageFormat::Ppm.magic(), b"P6");
        assert_eq!(ImageFormat::Compact.magic(), b"C6");
        assert_eq!(ImageFormat::from_magic(b"C6"), Some(ImageFormat::Compact));
    }
}
