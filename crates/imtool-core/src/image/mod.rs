//! Image - The pixel store
//!
//! An [`Image`] holds `width * height` pixels, each with three 16-bit
//! channels, plus the image's declared maximum channel value.
//!
//! # Invariants
//!
//! - `width > 0` and `height > 0`
//! - `max_value` is in `[1, 65535]`
//! - every channel of every pixel is `<= max_value`
//!
//! Every constructor and every mutating method checks these, so an
//! `Image` that exists is always valid.
//!
//! # Layout
//!
//! Pixels are addressed row-major (`index = y * width + x`). The
//! physical storage is either interleaved per-pixel records or three
//! parallel channel arrays (see [`Layout`]). The layout is a storage
//! choice only: accessors, equality and every transformation behave
//! identically for both.

mod store;

use crate::color::{ChannelDepth, Color, validate_max_value};
use crate::error::{Error, Result};
use store::PixelStore;

/// Physical storage layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// One record of three channels per pixel (array of structures)
    #[default]
    Interleaved,
    /// Three parallel channel arrays (structure of arrays)
    Planar,
}

/// Read-only summary of an image: its dimensions and maximum channel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Declared maximum channel value
    pub max_value: u16,
}

impl std::fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Width: {}, Height: {}, Max Color Value: {}",
            self.width, self.height, self.max_value
        )
    }
}

/// An RGB image with 16-bit channels.
///
/// # Examples
///
/// ```
/// use imtool_core::{Color, Image, Layout};
///
/// let mut image = Image::new(4, 3, 255, Layout::Interleaved).unwrap();
/// image.set_pixel(1, 2, Color::new(10, 20, 30)).unwrap();
/// assert_eq!(image.get_pixel(1, 2), Some(Color::new(10, 20, 30)));
/// assert_eq!(image.pixel_count(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    max_value: u16,
    store: PixelStore,
}

impl Image {
    /// Create a black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::InvalidMaxValue`] if `max_value` is 0.
    pub fn new(width: u32, height: u32, max_value: u16, layout: Layout) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        let max_value = validate_max_value(u32::from(max_value))?;
        Ok(Image {
            width,
            height,
            max_value,
            store: PixelStore::filled(layout, len, Color::black()),
        })
    }

    /// Create an image from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or maximum value are invalid,
    /// if `pixels.len() != width * height`, or if any channel exceeds
    /// `max_value`.
    pub fn from_pixels(
        width: u32,
        height: u32,
        max_value: u16,
        pixels: Vec<Color>,
        layout: Layout,
    ) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        let max_value = validate_max_value(u32::from(max_value))?;
        if pixels.len() != len {
            return Err(Error::PixelCountMismatch {
                expected: len,
                actual: pixels.len(),
            });
        }
        Self::validated(width, height, max_value, PixelStore::from_colors(layout, pixels))
    }

    /// Create an image by evaluating `f(x, y)` for every pixel.
    ///
    /// With the `rayon` feature, pixels are computed in parallel.
    ///
    /// # Errors
    ///
    /// Same as [`Image::from_pixels`].
    pub fn from_fn<F>(
        width: u32,
        height: u32,
        max_value: u16,
        layout: Layout,
        f: F,
    ) -> Result<Self>
    where
        F: Fn(u32, u32) -> Color + Sync,
    {
        let len = Self::checked_len(width, height)?;
        let max_value = validate_max_value(u32::from(max_value))?;
        let w = width as usize;
        let store = PixelStore::from_fn(layout, len, |i| f((i % w) as u32, (i / w) as u32));
        Self::validated(width, height, max_value, store)
    }

    fn checked_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }

    fn validated(width: u32, height: u32, max_value: u16, store: PixelStore) -> Result<Self> {
        let value = store.max_channel();
        if value > max_value {
            return Err(Error::ChannelOutOfRange {
                value,
                max: max_value,
            });
        }
        Ok(Image {
            width,
            height,
            max_value,
            store,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the declared maximum channel value.
    #[inline]
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// Get the on-disk channel width implied by the maximum value.
    #[inline]
    pub fn channel_depth(&self) -> ChannelDepth {
        ChannelDepth::for_max_value(self.max_value)
    }

    /// Get the physical storage layout.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.store.layout()
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.store.len()
    }

    /// Width, height and maximum channel value.
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            max_value: self.max_value,
        }
    }

    /// Get the pixel at (x, y), or `None` if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the pixel at (x, y) without a bounds check on the coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the row-major index falls outside the image.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Color {
        self.store.get(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at row-major `index`, or `None` if out of bounds.
    pub fn pixel_at(&self, index: usize) -> Option<Color> {
        (index < self.store.len()).then(|| self.store.get(index))
    }

    /// Set the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates are outside
    /// the image, or [`Error::ChannelOutOfRange`] if a channel of `color`
    /// exceeds the maximum channel value.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        if x >= self.width || y >= self.height {
            let index = y as usize * self.width as usize + x as usize;
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.store.len(),
            });
        }
        let value = color.max_channel();
        if value > self.max_value {
            return Err(Error::ChannelOutOfRange {
                value,
                max: self.max_value,
            });
        }
        self.store.set(y as usize * self.width as usize + x as usize, color);
        Ok(())
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> Pixels<'_> {
        Pixels {
            store: &self.store,
            next: 0,
            end: self.store.len(),
        }
    }

    /// Copy all pixels, row-major, into a vector.
    pub fn to_vec(&self) -> Vec<Color> {
        self.store.to_vec()
    }

    /// Return a copy stored in the given layout.
    pub fn to_layout(&self, layout: Layout) -> Image {
        if layout == self.layout() {
            return self.clone();
        }
        Image {
            width: self.width,
            height: self.height,
            max_value: self.max_value,
            store: PixelStore::from_colors(layout, self.store.to_vec()),
        }
    }

    /// Return a new image with every pixel replaced by `f(pixel)`.
    ///
    /// The maximum channel value is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] if `f` produces a channel
    /// above the maximum value.
    pub fn map_pixels<F>(&self, f: F) -> Result<Image>
    where
        F: Fn(Color) -> Color + Sync,
    {
        self.map_pixels_with_max(self.max_value, f)
    }

    /// Return a new image with maximum value `max_value` and every pixel
    /// replaced by `f(pixel)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaxValue`] if `max_value` is 0, or
    /// [`Error::ChannelOutOfRange`] if `f` produces a channel above
    /// `max_value`.
    pub fn map_pixels_with_max<F>(&self, max_value: u16, f: F) -> Result<Image>
    where
        F: Fn(Color) -> Color + Sync,
    {
        let max_value = validate_max_value(u32::from(max_value))?;
        let mut store = self.store.clone();
        store.map_in_place(f);
        Self::validated(self.width, self.height, max_value, store)
    }
}

/// Logical equality: same dimensions, same maximum value and the same
/// pixels in the same order, regardless of layout.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.max_value == other.max_value
            && self.pixels().eq(other.pixels())
    }
}

impl Eq for Image {}

/// Row-major pixel iterator returned by [`Image::pixels`].
#[derive(Debug, Clone)]
pub struct Pixels<'a> {
    store: &'a PixelStore,
    next: usize,
    end: usize,
}

impl Iterator for Pixels<'_> {
    type Item = Color;

    #[inline]
    fn next(&mut self) -> Option<Color> {
        if self.next >= self.end {
            return None;
        }
        let color = self.store.get(self.next);
        self.next += 1;
        Some(color)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Pixels<'_> {}
