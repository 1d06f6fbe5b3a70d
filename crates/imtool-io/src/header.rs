//! Image header reading
//!
//! Both formats start with a two-byte magic tag followed by decimal
//! fields separated by whitespace:
//!
//! ```text
//! P6 <width> <height> <max>            (raw)
//! C6 <width> <height> <max> <colors>   (compact)
//! ```
//!
//! Exactly one whitespace byte follows the last field; the binary
//! payload starts right after it.

use crate::{ImageFormat, IoError, IoResult, format::magic};
use imtool_core::{ImageInfo, validate_max_value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Image metadata read without decoding pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Declared maximum channel value
    pub max_value: u16,
    /// Detected image format
    pub format: ImageFormat,
    /// Color table size (compact format only)
    pub num_colors: Option<u32>,
}

impl ImageHeader {
    /// Dimensions and maximum channel value, as a decoded image would report them
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            max_value: self.max_value,
        }
    }
}

/// Read image metadata from a file path without decoding pixel data
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<ImageHeader> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IoError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    read_header(&mut BufReader::new(file))
}

/// Read image metadata from bytes without decoding pixel data
pub fn read_image_header_mem(data: &[u8]) -> IoResult<ImageHeader> {
    read_header(&mut &data[..])
}

/// Read a header of either format, leaving `reader` at the payload.
pub(crate) fn read_header<R: Read>(reader: &mut R) -> IoResult<ImageHeader> {
    let mut tag = [0u8; magic::LEN];
    read_tag(reader, &mut tag)?;
    let format = crate::detect_format_from_bytes(&tag)?;
    read_fields(reader, format)
}

/// Read a header that must be of `expected` format.
pub(crate) fn read_header_expecting<R: Read>(
    reader: &mut R,
    expected: ImageFormat,
) -> IoResult<ImageHeader> {
    let mut tag = [0u8; magic::LEN];
    read_tag(reader, &mut tag)?;
    if &tag != expected.magic() {
        return Err(IoError::Format(format!(
            "expected magic tag {:?}, found {:?}",
            String::from_utf8_lossy(expected.magic()),
            String::from_utf8_lossy(&tag)
        )));
    }
    read_fields(reader, expected)
}

fn read_tag<R: Read>(reader: &mut R, tag: &mut [u8; magic::LEN]) -> IoResult<()> {
    reader.read_exact(tag).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => {
            IoError::Format("file too short for a magic tag".to_string())
        }
        _ => IoError::Io(e),
    })
}

fn read_fields<R: Read>(reader: &mut R, format: ImageFormat) -> IoResult<ImageHeader> {
    let mut fields = FieldReader {
        reader,
        ended: false,
    };
    fields.separator(format)?;
    let width = fields.next("width")?;
    let height = fields.next("height")?;
    let max_value = fields.next("max value")?;
    let num_colors = match format {
        ImageFormat::Ppm => None,
        ImageFormat::Compact => Some(fields.next("color count")?),
    };
    if fields.ended {
        return Err(IoError::Format(
            "missing separator after header".to_string(),
        ));
    }

    if width == 0 || height == 0 {
        return Err(IoError::ValueRange(format!(
            "invalid image dimensions: {}x{}",
            width, height
        )));
    }
    let max_value =
        validate_max_value(max_value).map_err(|e| IoError::ValueRange(e.to_string()))?;

    tracing::debug!(%format, width, height, max_value, ?num_colors, "read header");
    Ok(ImageHeader {
        width,
        height,
        max_value,
        format,
        num_colors,
    })
}

/// Reads whitespace-separated decimal fields one byte at a time, so
/// that nothing past the single separator byte is consumed.
struct FieldReader<'a, R> {
    reader: &'a mut R,
    /// Set when a field was ended by end of input instead of a separator
    ended: bool,
}

impl<R: Read> FieldReader<'_, R> {
    fn byte(&mut self) -> IoResult<Option<u8>> {
        let mut b = [0u8; 1];
        loop {
            match self.reader.read(&mut b) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(b[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(IoError::Io(e)),
            }
        }
    }

    /// Consume the whitespace byte that must follow the magic tag.
    fn separator(&mut self, format: ImageFormat) -> IoResult<()> {
        match self.byte()? {
            Some(c) if c.is_ascii_whitespace() => Ok(()),
            Some(c) => Err(IoError::Format(format!(
                "expected whitespace after {} magic tag but found byte 0x{:02x}",
                format, c
            ))),
            None => Err(IoError::Format(format!(
                "unexpected end of header after {} magic tag",
                format
            ))),
        }
    }

    /// Parse the next field. Leading whitespace is skipped; the single
    /// whitespace byte that ends the field is consumed.
    fn next(&mut self, name: &str) -> IoResult<u32> {
        let mut b = self.byte()?;
        while matches!(b, Some(c) if c.is_ascii_whitespace()) {
            b = self.byte()?;
        }

        let mut value: u32 = 0;
        let mut digits = 0;
        while let Some(c) = b.filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(c - b'0')))
                .ok_or_else(|| IoError::Format(format!("{} is too large", name)))?;
            digits += 1;
            b = self.byte()?;
        }

        if digits == 0 {
            return Err(IoError::Format(match b {
                None => format!("unexpected end of header before {}", name),
                Some(c) => format!("expected {} but found byte 0x{:02x}", name, c),
            }));
        }
        match b {
            None => {
                self.ended = true;
                Ok(value)
            }
            Some(c) if c.is_ascii_whitespace() => Ok(value),
            Some(c) => Err(IoError::Format(format!(
                "unexpected byte 0x{:02x} after {}",
                c, name
            ))),
        }
    }
}
