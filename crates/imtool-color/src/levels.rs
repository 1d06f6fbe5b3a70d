//! Intensity rescaling
//!
//! Maps every channel linearly from `[0, current max]` onto
//! `[0, new max]` and sets the image's maximum value to the new max.

use crate::{ColorError, ColorResult};
use imtool_core::Image;

/// Rescale all channel values to a new maximum channel value.
///
/// Each channel becomes `round(value * new_max / max)`, clamped to
/// `new_max`. The mapping is monotonic. Changing the maximum across 255
/// also changes the on-disk channel width.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if `new_max` is 0.
pub fn rescale_max_value(image: &Image, new_max: u16) -> ColorResult<Image> {
    if new_max == 0 {
        return Err(ColorError::InvalidParameters(
            "new maximum value must be at least 1".to_string(),
        ));
    }

    let factor = f64::from(new_max) / f64::from(image.max_value());
    tracing::debug!(from = image.max_value(), to = new_max, factor, "rescaling levels");

    let rescaled = image.map_pixels_with_max(new_max, |c| {
        c.map_channels(|v| (f64::from(v) * factor).round().min(f64::from(new_max)) as u16)
    })?;
    Ok(rescaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imtool_core::{Color, Layout};

    fn sample(max_value: u16) -> Image {
        Image::from_pixels(
            2,
            2,
            max_value,
            vec![
                Color::new(0, 1, 2),
                Color::new(max_value, max_value / 2, 3),
                Color::new(10, 20, 30),
                Color::new(max_value, max_value, max_value),
            ],
            Layout::Interleaved,
        )
        .unwrap()
    }

    #[test]
    fn test_rescale_255_to_128() {
        let out = rescale_max_value(&sample(255), 128).unwrap();
        assert_eq!(out.max_value(), 128);
        assert_eq!(out.pixel_at(3), Some(Color::new(128, 128, 128)));
        // 127 * 128 / 255 = 63.75
        assert_eq!(out.pixel_at(1), Some(Color::new(128, 64, 2)));
        assert!(out.pixels().all(|c| c.max_channel() <= 128));
    }

    #[test]
    fn test_rescale_up_to_16bit() {
        let out = rescale_max_value(&sample(255), 65535).unwrap();
        assert_eq!(out.max_value(), 65535);
        // 1 * 257
        assert_eq!(out.pixel_at(0), Some(Color::new(0, 257, 514)));
        assert_eq!(out.pixel_at(3), Some(Color::new(65535, 65535, 65535)));
    }

    #[test]
    fn test_rescale_same_max_is_identity() {
        let image = sample(1000);
        assert_eq!(rescale_max_value(&image, 1000).unwrap(), image);
    }

    #[test]
    fn test_rescale_is_monotonic() {
        let image = Image::from_fn(256, 1, 255, Layout::Planar, |x, _| {
            Color::new(x as u16, 255 - x as u16, 0)
        })
        .unwrap();
        let out = rescale_max_value(&image, 7).unwrap();
        let reds: Vec<u16> = out.pixels().map(|c| c.red).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(reds[255], 7);
    }

    #[test]
    fn test_rescale_to_zero_rejected() {
        assert!(matches!(
            rescale_max_value(&sample(255), 0),
            Err(ColorError::InvalidParameters(_))
        ));
    }
}
