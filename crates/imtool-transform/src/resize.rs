//! Bilinear resampling
//!
//! Each target pixel is mapped back to a fractional source coordinate
//! and blended from its four source neighbors:
//!
//! ```text
//! top    = lerp(p(x0, y0), p(x1, y0), dx)
//! bottom = lerp(p(x0, y1), p(x1, y1), dx)
//! value  = lerp(top, bottom, dy)
//! ```
//!
//! Channels are interpolated independently. The result keeps the
//! source's maximum channel value and storage layout.

use crate::{TransformError, TransformResult};
use imtool_core::{Color, Image};

/// How a target coordinate maps to a source coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioMode {
    /// `ratio = src / target`; resizing to the same size is the identity
    #[default]
    Uniform,
    /// `ratio = (src - 1) / target`; target 0 maps to source 0
    EdgeAnchored,
}

impl RatioMode {
    fn ratio(self, src: u32, target: u32) -> f64 {
        if src <= 1 {
            return 0.0;
        }
        let span = match self {
            RatioMode::Uniform => src,
            RatioMode::EdgeAnchored => src - 1,
        };
        f64::from(span) / f64::from(target)
    }
}

/// Options for [`resize_with_options`]
#[derive(Debug, Clone, Default)]
pub struct ResizeOptions {
    /// Coordinate mapping applied to both axes
    pub ratio: RatioMode,
}

/// Source neighbors and blend weight for one target coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSample {
    lo: u32,
    hi: u32,
    frac: f64,
}

/// Precompute the source samples for every target coordinate on one axis.
fn axis_samples(src: u32, target: u32, mode: RatioMode) -> Vec<AxisSample> {
    let ratio = mode.ratio(src, target);
    (0..target)
        .map(|t| {
            if src == 1 {
                return AxisSample {
                    lo: 0,
                    hi: 0,
                    frac: 0.0,
                };
            }
            let origin = f64::from(t) * ratio;
            let base = origin.floor();
            let mut lo = base as u32;
            let mut frac = origin - base;
            // The last row/column has no right neighbor: sample it as the
            // far end of the previous interval.
            if lo >= src - 1 {
                lo = src - 2;
                frac = 1.0;
            }
            AxisSample {
                lo,
                hi: lo + 1,
                frac,
            }
        })
        .collect()
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

fn interpolate_channel(p00: u16, p10: u16, p01: u16, p11: u16, fx: f64, fy: f64, max: f64) -> u16 {
    let top = lerp(f64::from(p00), f64::from(p10), fx);
    let bottom = lerp(f64::from(p01), f64::from(p11), fx);
    lerp(top, bottom, fy).round().clamp(0.0, max) as u16
}

/// Resize an image with bilinear interpolation and the default
/// (uniform) ratio mapping.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if `width` or `height`
/// is 0.
pub fn resize(image: &Image, width: u32, height: u32) -> TransformResult<Image> {
    resize_with_options(image, width, height, &ResizeOptions::default())
}

/// Resize an image with bilinear interpolation.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if `width` or `height`
/// is 0.
pub fn resize_with_options(
    image: &Image,
    width: u32,
    height: u32,
    options: &ResizeOptions,
) -> TransformResult<Image> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target dimensions must be positive: {}x{}",
            width, height
        )));
    }

    let xs = axis_samples(image.width(), width, options.ratio);
    let ys = axis_samples(image.height(), height, options.ratio);
    let max = f64::from(image.max_value());

    tracing::debug!(
        src_width = image.width(),
        src_height = image.height(),
        width,
        height,
        ratio = ?options.ratio,
        "resizing"
    );

    let resized = Image::from_fn(width, height, image.max_value(), image.layout(), |x, y| {
        let sx = xs[x as usize];
        let sy = ys[y as usize];
        let p00 = image.get_pixel_unchecked(sx.lo, sy.lo);
        let p10 = image.get_pixel_unchecked(sx.hi, sy.lo);
        let p01 = image.get_pixel_unchecked(sx.lo, sy.hi);
        let p11 = image.get_pixel_unchecked(sx.hi, sy.hi);
        let channel = |f: fn(Color) -> u16| {
            interpolate_channel(f(p00), f(p10), f(p01), f(p11), sx.frac, sy.frac, max)
        };
        Color::new(
            channel(|c| c.red),
            channel(|c| c.green),
            channel(|c| c.blue),
        )
    })?;
    Ok(resized)
}
