//! Raw pixel map (P6) format support
//!
//! Reads and writes binary PPM. The channel width is chosen by the
//! maximum channel value: one byte per channel up to 255, two
//! big-endian bytes per channel above.
//!
//! ```text
//! P6\n<width> <height>\n<max>\n<payload>
//! ```

use crate::header::read_header_expecting;
use crate::{ImageFormat, IoError, IoResult};
use imtool_core::{ChannelDepth, Color, Image, Layout};
use std::io::{BufRead, Read, Write};

/// Options for decoding an image
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Storage layout of the decoded image
    pub layout: Layout,
}

impl DecodeOptions {
    /// Decode into the given layout
    pub fn with_layout(layout: Layout) -> Self {
        Self { layout }
    }
}

/// Read a P6 image from a reader into the default (interleaved) layout.
pub fn read_ppm<R: BufRead>(reader: R) -> IoResult<Image> {
    read_ppm_with_options(reader, &DecodeOptions::default())
}

/// Read a P6 image from a reader.
///
/// # Errors
///
/// - [`IoError::Format`] if the magic tag is not `P6`, a header field is
///   malformed, or the payload is shorter than `width * height` pixels
/// - [`IoError::ValueRange`] if the dimensions or maximum value are out
///   of range, or a channel value exceeds the maximum value
pub fn read_ppm_with_options<R: BufRead>(
    mut reader: R,
    options: &DecodeOptions,
) -> IoResult<Image> {
    let header = read_header_expecting(&mut reader, ImageFormat::Ppm)?;
    let depth = ChannelDepth::for_max_value(header.max_value);

    let pixel_count = (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or_else(|| {
            IoError::ValueRange(format!(
                "image too large: {}x{}",
                header.width, header.height
            ))
        })?;
    let payload_len = pixel_count
        .checked_mul(depth.bytes_per_pixel())
        .ok_or_else(|| IoError::ValueRange("payload size overflows".to_string()))?;

    let mut payload = Vec::new();
    reader
        .take(payload_len as u64)
        .read_to_end(&mut payload)?;
    if payload.len() < payload_len {
        return Err(IoError::Format(format!(
            "truncated payload: expected {} bytes, found {}",
            payload_len,
            payload.len()
        )));
    }

    let pixels: Vec<Color> = payload
        .chunks_exact(depth.bytes_per_pixel())
        .map(|chunk| depth.read_color(chunk))
        .collect();

    tracing::debug!(
        width = header.width,
        height = header.height,
        max_value = header.max_value,
        layout = ?options.layout,
        "decoded P6 image"
    );

    Image::from_pixels(
        header.width,
        header.height,
        header.max_value,
        pixels,
        options.layout,
    )
    .map_err(IoError::from_decoded)
}

/// Read a P6 image from memory.
pub fn read_ppm_mem(data: &[u8]) -> IoResult<Image> {
    read_ppm(data)
}

/// Read a P6 image from memory with options.
pub fn read_ppm_mem_with_options(data: &[u8], options: &DecodeOptions) -> IoResult<Image> {
    read_ppm_with_options(data, options)
}

/// Write an image as P6 to a writer.
///
/// The header is `P6\n<width> <height>\n<max>\n`, followed by the
/// payload in the channel width selected by the maximum value.
pub fn write_ppm<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    write!(
        writer,
        "P6\n{} {}\n{}\n",
        image.width(),
        image.height(),
        image.max_value()
    )?;

    let depth = image.channel_depth();
    let mut payload = Vec::with_capacity(image.pixel_count() * depth.bytes_per_pixel());
    for color in image.pixels() {
        depth.push_color(color, &mut payload);
    }
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Write an image as P6 to memory.
pub fn write_ppm_mem(image: &Image) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_ppm(image, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(max_value: u16, layout: Layout) -> Image {
        let pixels = vec![
            Color::new(0, 1, 2).map_channels(|v| v.min(max_value)),
            Color::new(max_value, 0, max_value / 2),
            Color::new(3, 4, 5).map_channels(|v| v.min(max_value)),
            Color::new(max_value, max_value, max_value),
        ];
        Image::from_pixels(2, 2, max_value, pixels, layout).unwrap()
    }

    #[test]
    fn test_write_8bit_layout() {
        let image = sample(255, Layout::Interleaved);
        let data = write_ppm_mem(&image).unwrap();
        let header = b"P6\n2 2\n255\n";
        assert_eq!(&data[..header.len()], header);
        assert_eq!(data.len(), header.len() + 12);
        assert_eq!(&data[header.len()..header.len() + 6], &[0, 1, 2, 255, 0, 127]);
    }

    #[test]
    fn test_write_16bit_big_endian() {
        let image = Image::from_pixels(
            1,
            1,
            1000,
            vec![Color::new(0x0102, 0x0304, 1000)],
            Layout::Planar,
        )
        .unwrap();
        let data = write_ppm_mem(&image).unwrap();
        let header = b"P6\n1 1\n1000\n";
        assert_eq!(&data[header.len()..], &[0x01, 0x02, 0x03, 0x04, 0x03, 0xe8]);
    }

    #[test]
    fn test_roundtrip_both_depths_and_layouts() {
        for max_value in [1u16, 255, 256, 65535] {
            for layout in [Layout::Interleaved, Layout::Planar] {
                let image = sample(max_value, layout);
                let data = write_ppm_mem(&image).unwrap();
                let decoded =
                    read_ppm_mem_with_options(&data, &DecodeOptions::with_layout(layout)).unwrap();
                assert_eq!(decoded, image);
                assert_eq!(decoded.layout(), layout);
            }
        }
    }

    #[test]
    fn test_truncated_payload() {
        let mut data = write_ppm_mem(&sample(255, Layout::Interleaved)).unwrap();
        data.pop();
        assert!(matches!(read_ppm_mem(&data), Err(IoError::Format(_))));
    }

    #[test]
    fn test_wrong_magic() {
        assert!(matches!(
            read_ppm_mem(b"P5\n1 1\n255\n\x00"),
            Err(IoError::Format(_))
        ));
    }

    #[test]
    fn test_channel_above_max() {
        let data = b"P6\n1 1\n100\n\x65\x00\x00";
        assert!(matches!(read_ppm_mem(data), Err(IoError::ValueRange(_))));
    }
}
