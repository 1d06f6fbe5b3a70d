//! imtool-test - Regression test framework for imtool
//!
//! Each `tests/*_reg.rs` file creates a [`RegParams`], records a series
//! of numbered comparisons, and asserts on [`RegParams::cleanup`] at the
//! end. Failures are collected rather than panicking on the first one,
//! so a single run reports every mismatch.
//!
//! # Usage
//!
//! ```ignore
//! use imtool_test::RegParams;
//!
//! let mut rp = RegParams::new("quantize");
//! rp.compare_values(4.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Fixtures are synthetic; there is no image data directory.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use imtool_core::{Color, Image, Layout};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // imtool-test is at crates/imtool-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Path of a numbered output file for a test, e.g. `regout/ppmio.03.ppm`
pub fn regout_path(test_name: &str, index: usize, ext: &str) -> String {
    format!("{}/{}.{:02}.{}", regout_dir(), test_name, index, ext)
}

/// Build a smooth three-channel gradient.
///
/// Red grows left to right, green grows top to bottom and blue is
/// their average, each scaled to `max_value`.
pub fn gradient_image(width: u32, height: u32, max_value: u16, layout: Layout) -> TestResult<Image> {
    let max = u32::from(max_value);
    let wd = width.max(2) - 1;
    let hd = height.max(2) - 1;
    Image::from_fn(width, height, max_value, layout, |x, y| {
        let r = (x * max / wd) as u16;
        let g = (y * max / hd) as u16;
        let b = ((u32::from(r) + u32::from(g)) / 2) as u16;
        Color::new(r, g, b)
    })
    .map_err(|source| TestError::Fixture {
        name: "gradient".to_string(),
        source,
    })
}

/// Build an image by tiling `colors` row-major across `width * height`
/// pixels.
pub fn image_from_colors(
    width: u32,
    height: u32,
    max_value: u16,
    colors: &[Color],
    layout: Layout,
) -> TestResult<Image> {
    let n = colors.len().max(1);
    Image::from_fn(width, height, max_value, layout, |x, y| {
        let i = y as usize * width as usize + x as usize;
        colors.get(i % n).copied().unwrap_or_default()
    })
    .map_err(|source| TestError::Fixture {
        name: "tiled".to_string(),
        source,
    })
}

/// Build a one-row image where each color appears exactly `count` times,
/// in the order given.
///
/// Useful for checking histogram counts and first-occurrence order.
pub fn counted_colors_image(
    counts: &[(Color, usize)],
    max_value: u16,
    layout: Layout,
) -> TestResult<Image> {
    let pixels: Vec<Color> = counts
        .iter()
        .flat_map(|&(color, count)| std::iter::repeat_n(color, count))
        .collect();
    Image::from_pixels(pixels.len() as u32, 1, max_value, pixels, layout).map_err(|source| {
        TestError::Fixture {
            name: "counted".to_string(),
            source,
        }
    })
}
