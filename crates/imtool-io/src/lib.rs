//! imtool-io - Image I/O
//!
//! Reads and writes the raw binary pixel map (`P6`) and writes the
//! compact indexed-color format (`C6`).
//!
//! # Example
//!
//! ```no_run
//! use imtool_io::{ImageFormat, read_image, write_image};
//!
//! let image = read_image("input.ppm").unwrap();
//! write_image(&image, "output.cppm", ImageFormat::Compact).unwrap();
//! ```

pub mod compact;
pub mod error;
pub mod format;
pub mod header;
pub mod ppm;

pub use compact::{ColorTable, IndexWidth, IndexedImage, write_compact, write_compact_mem};
pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};
pub use header::{ImageHeader, read_image_header, read_image_header_mem};
pub use ppm::{
    DecodeOptions, read_ppm, read_ppm_mem, read_ppm_mem_with_options, read_ppm_with_options,
    write_ppm, write_ppm_mem,
};

use imtool_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a P6 image from a file into the default layout.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    read_image_with_options(path, &DecodeOptions::default())
}

/// Read a P6 image from a file.
///
/// # Errors
///
/// [`IoError::FileOpen`] if the file cannot be opened, otherwise as
/// [`read_ppm_with_options`].
pub fn read_image_with_options<P: AsRef<Path>>(
    path: P,
    options: &DecodeOptions,
) -> IoResult<Image> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IoError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading image");
    read_ppm_with_options(BufReader::new(file), options)
}

/// Write an image to a file in the given format.
///
/// # Errors
///
/// [`IoError::FileOpen`] if the file cannot be created, or
/// [`IoError::Io`] if writing fails.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| IoError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), %format, "writing image");
    let writer = BufWriter::new(file);
    match format {
        ImageFormat::Ppm => write_ppm(image, writer),
        ImageFormat::Compact => write_compact(image, writer),
    }
}
