//! Compact (C6) indexed-color format
//!
//! Stores each distinct color once in a table and every pixel as an
//! index into that table:
//!
//! ```text
//! C6 <width> <height> <max> <colors>\n
//! <color table: colors * 3 channels, 1 or 2 bytes each, big-endian>
//! <indices: width * height, 1, 2 or 4 bytes each, little-endian>
//! ```
//!
//! Table entries appear in first-occurrence order (row-major scan).
//! There is no decoder for this format.

use crate::{ImageFormat, IoError, IoResult};
use imtool_core::{Color, Image};
use std::collections::HashMap;
use std::io::Write;

/// Width of one pixel index in the compact payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexWidth {
    /// Up to 256 colors
    U8,
    /// Up to 65536 colors
    U16,
    /// More than 65536 colors
    U32,
}

impl IndexWidth {
    /// Largest table that fits one-byte indices
    pub const U8_MAX_COLORS: usize = 1 << 8;
    /// Largest table that fits two-byte indices
    pub const U16_MAX_COLORS: usize = 1 << 16;

    /// Smallest index width that can address `len` table entries
    pub fn for_table_len(len: usize) -> Self {
        if len <= Self::U8_MAX_COLORS {
            IndexWidth::U8
        } else if len <= Self::U16_MAX_COLORS {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    /// Bytes per index
    pub fn bytes(self) -> usize {
        match self {
            IndexWidth::U8 => 1,
            IndexWidth::U16 => 2,
            IndexWidth::U32 => 4,
        }
    }

    fn push(self, index: u32, out: &mut Vec<u8>) {
        let bytes = index.to_le_bytes();
        out.extend_from_slice(&bytes[..self.bytes()]);
    }
}

/// Distinct colors of an image in first-occurrence order
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: Vec<Color>,
    index: HashMap<Color, u32>,
}

impl ColorTable {
    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if the table holds no colors
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Table entries in index order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Table index of `color`, if present
    pub fn index_of(&self, color: Color) -> Option<u32> {
        self.index.get(&color).copied()
    }

    /// Index width needed to address every entry
    pub fn index_width(&self) -> IndexWidth {
        IndexWidth::for_table_len(self.colors.len())
    }

    fn insert(&mut self, color: Color) -> IoResult<u32> {
        if let Some(&i) = self.index.get(&color) {
            return Ok(i);
        }
        let i = u32::try_from(self.colors.len())
            .map_err(|_| IoError::ValueRange("too many distinct colors".to_string()))?;
        self.colors.push(color);
        self.index.insert(color, i);
        Ok(i)
    }
}

/// An image split into a color table and one table index per pixel
#[derive(Debug, Clone)]
pub struct IndexedImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum channel value of the source image
    pub max_value: u16,
    /// Distinct colors
    pub table: ColorTable,
    /// Row-major table indices
    pub indices: Vec<u32>,
}

impl IndexedImage {
    /// Build the color table and index stream in one row-major pass.
    pub fn from_image(image: &Image) -> IoResult<Self> {
        let mut table = ColorTable::default();
        let indices = image
            .pixels()
            .map(|color| table.insert(color))
            .collect::<IoResult<Vec<u32>>>()?;
        Ok(IndexedImage {
            width: image.width(),
            height: image.height(),
            max_value: image.max_value(),
            table,
            indices,
        })
    }
}

/// Write an image in compact format to a writer.
pub fn write_compact<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    let indexed = IndexedImage::from_image(image)?;
    let index_width = indexed.table.index_width();
    tracing::debug!(
        colors = indexed.table.len(),
        index_bytes = index_width.bytes(),
        "built color table"
    );

    writer.write_all(ImageFormat::Compact.magic())?;
    writeln!(
        writer,
        " {} {} {} {}",
        indexed.width,
        indexed.height,
        indexed.max_value,
        indexed.table.len()
    )?;

    let depth = image.channel_depth();
    let mut payload = Vec::with_capacity(
        indexed.table.len() * depth.bytes_per_pixel()
            + indexed.indices.len() * index_width.bytes(),
    );
    for &color in indexed.table.colors() {
        depth.push_color(color, &mut payload);
    }
    for &index in &indexed.indices {
        index_width.push(index, &mut payload);
    }
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Write an image in compact format to memory.
pub fn write_compact_mem(image: &Image) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_compact(image, &mut out)?;
    Ok(out)
}
