//! Colors and channels
//!
//! A [`Color`] is the (red, green, blue) triple of a pixel, detached from
//! its position. It is the unit of histogram counting, spatial indexing
//! and color-table deduplication, so it is `Copy`, `Hash` and `Eq`.
//!
//! # Channel width on disk
//!
//! All channels of an image share one on-disk width, chosen by the
//! image's maximum channel value: one byte when the maximum is at most
//! 255, two big-endian bytes otherwise. [`ChannelDepth`] captures that
//! choice so the codec and the compact encoder agree on it.

use crate::error::{Error, Result};

/// Largest maximum channel value an image may declare.
pub const MAX_CHANNEL_VALUE: u16 = u16::MAX;

/// Largest maximum channel value stored with one byte per channel.
pub const MAX_ONE_BYTE_VALUE: u16 = 255;

/// One of the three color channels.
///
/// The discriminants are the k-d tree axes: red, then green, then blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel (axis 0)
    Red = 0,
    /// Green channel (axis 1)
    Green = 1,
    /// Blue channel (axis 2)
    Blue = 2,
}

impl Channel {
    /// All channels in axis order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Channel used to split at the given tree depth (`depth mod 3`).
    #[inline]
    pub fn for_depth(depth: usize) -> Self {
        Self::ALL[depth % 3]
    }
}

/// An RGB color with 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Color {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Black (all channels zero).
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Get one channel value.
    #[inline]
    pub fn channel(self, channel: Channel) -> u16 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Largest of the three channel values.
    #[inline]
    pub fn max_channel(self) -> u16 {
        self.red.max(self.green).max(self.blue)
    }

    /// Apply `f` to every channel.
    #[inline]
    pub fn map_channels<F: Fn(u16) -> u16>(self, f: F) -> Self {
        Self::new(f(self.red), f(self.green), f(self.blue))
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Only the ordering of distances matters to callers, so no square
    /// root is taken. The maximum value (3 * 65535^2) fits in a `u64`.
    #[inline]
    pub fn distance_squared(self, other: Color) -> u64 {
        let dr = i64::from(self.red) - i64::from(other.red);
        let dg = i64::from(self.green) - i64::from(other.green);
        let db = i64::from(self.blue) - i64::from(other.blue);
        (dr * dr + dg * dg + db * db) as u64
    }
}

impl From<[u16; 3]> for Color {
    fn from(arr: [u16; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Color> for [u16; 3] {
    fn from(color: Color) -> Self {
        [color.red, color.green, color.blue]
    }
}

impl From<(u16, u16, u16)> for Color {
    fn from((red, green, blue): (u16, u16, u16)) -> Self {
        Self::new(red, green, blue)
    }
}

/// Number of bytes each channel occupies on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelDepth {
    /// One byte per channel (max value <= 255)
    Bit8,
    /// Two big-endian bytes per channel (max value > 255)
    Bit16,
}

impl ChannelDepth {
    /// Select the channel depth for a maximum channel value.
    #[inline]
    pub fn for_max_value(max_value: u16) -> Self {
        if max_value <= MAX_ONE_BYTE_VALUE {
            ChannelDepth::Bit8
        } else {
            ChannelDepth::Bit16
        }
    }

    /// Bytes per channel.
    #[inline]
    pub fn bytes_per_channel(self) -> usize {
        match self {
            ChannelDepth::Bit8 => 1,
            ChannelDepth::Bit16 => 2,
        }
    }

    /// Bytes per pixel (three channels).
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        3 * self.bytes_per_channel()
    }

    /// Append a color to `out` in this depth's byte layout.
    ///
    /// 16-bit channels are written high byte first.
    pub fn push_color(self, color: Color, out: &mut Vec<u8>) {
        match self {
            ChannelDepth::Bit8 => {
                out.extend_from_slice(&[color.red as u8, color.green as u8, color.blue as u8]);
            }
            ChannelDepth::Bit16 => {
                out.extend_from_slice(&color.red.to_be_bytes());
                out.extend_from_slice(&color.green.to_be_bytes());
                out.extend_from_slice(&color.blue.to_be_bytes());
            }
        }
    }

    /// Read one color from the start of `bytes`.
    ///
    /// `bytes` must hold at least [`bytes_per_pixel`](Self::bytes_per_pixel) bytes.
    #[inline]
    pub fn read_color(self, bytes: &[u8]) -> Color {
        match self {
            ChannelDepth::Bit8 => Color::new(
                u16::from(bytes[0]),
                u16::from(bytes[1]),
                u16::from(bytes[2]),
            ),
            ChannelDepth::Bit16 => Color::new(
                u16::from_be_bytes([bytes[0], bytes[1]]),
                u16::from_be_bytes([bytes[2], bytes[3]]),
                u16::from_be_bytes([bytes[4], bytes[5]]),
            ),
        }
    }
}

/// Check that a declared maximum channel value is in [1, 65535].
///
/// # Errors
///
/// Returns [`Error::InvalidMaxValue`] for 0 or anything above 65535.
pub fn validate_max_value(max_value: u32) -> Result<u16> {
    if max_value == 0 || max_value > u32::from(MAX_CHANNEL_VALUE) {
        return Err(Error::InvalidMaxValue(max_value));
    }
    Ok(max_value as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_for_depth_cycles() {
        assert_eq!(Channel::for_depth(0), Channel::Red);
        assert_eq!(Channel::for_depth(1), Channel::Green);
        assert_eq!(Channel::for_depth(2), Channel::Blue);
        assert_eq!(Channel::for_depth(3), Channel::Red);
        assert_eq!(Channel::for_depth(7), Channel::Green);
    }

    #[test]
    fn test_distance_squared() {
        let a = Color::new(9, 1, 1);
        assert_eq!(a.distance_squared(Color::new(10, 0, 0)), 3);
        assert_eq!(a.distance_squared(Color::new(0, 0, 0)), 83);
        assert_eq!(a.distance_squared(a), 0);
    }

    #[test]
    fn test_distance_squared_extremes() {
        let black = Color::black();
        let white = Color::new(65535, 65535, 65535);
        assert_eq!(black.distance_squared(white), 3 * 65535u64 * 65535);
    }

    #[test]
    fn test_channel_depth_selection() {
        assert_eq!(ChannelDepth::for_max_value(1), ChannelDepth::Bit8);
        assert_eq!(ChannelDepth::for_max_value(255), ChannelDepth::Bit8);
        assert_eq!(ChannelDepth::for_max_value(256), ChannelDepth::Bit16);
        assert_eq!(ChannelDepth::for_max_value(65535), ChannelDepth::Bit16);
        assert_eq!(ChannelDepth::Bit8.bytes_per_pixel(), 3);
        assert_eq!(ChannelDepth::Bit16.bytes_per_pixel(), 6);
    }

    #[test]
    fn test_push_and_read_color_16bit() {
        let color = Color::new(0x1234, 0x00ff, 0xff00);
        let mut out = Vec::new();
        ChannelDepth::Bit16.push_color(color, &mut out);
        assert_eq!(out, vec![0x12, 0x34, 0x00, 0xff, 0xff, 0x00]);
        assert_eq!(ChannelDepth::Bit16.read_color(&out), color);
    }

    #[test]
    fn test_validate_max_value() {
        assert!(validate_max_value(0).is_err());
        assert_eq!(validate_max_value(1).unwrap(), 1);
        assert_eq!(validate_max_value(65535).unwrap(), 65535);
        assert!(validate_max_value(65536).is_err());
    }
}
