//! Rare-color removal
//!
//! Replaces the `n` least frequent colors of an image with their
//! nearest neighbor among the remaining colors:
//!
//! 1. Rank the colors with a [`ColorHistogram`]
//! 2. Split off the `n` rarest
//! 3. Index the common colors in a [`ColorTree`]
//! 4. Look up a replacement for every rare color
//! 5. Rewrite the pixels that have a rare color
//!
//! Replacements always come from the common set, so a rare color never
//! maps to another rare color.

use crate::histogram::ColorHistogram;
use crate::kdtree::ColorTree;
use crate::ColorResult;
use imtool_core::{Color, Image};
use std::collections::HashMap;

// =============================================================================
// Replacement table
// =============================================================================

/// Map each of the `n` rarest colors of `image` to its nearest common
/// color.
///
/// The map is empty when `n` is 0 or when every color is rare (there is
/// nothing to map to).
pub fn rare_color_replacements(image: &Image, n: usize) -> HashMap<Color, Color> {
    let histogram = ColorHistogram::from_image(image);
    let (rare, common) = histogram.split_rarest(n);

    tracing::debug!(
        distinct = histogram.len(),
        rare = rare.len(),
        common = common.len(),
        "split histogram"
    );

    if rare.is_empty() || common.is_empty() {
        return HashMap::new();
    }

    let common_colors: Vec<Color> = common.iter().map(|e| e.color).collect();
    let tree = ColorTree::build(&common_colors);
    tracing::debug!(nodes = tree.len(), depth = tree.depth(), "built color tree");

    rare.iter()
        .filter_map(|entry| {
            tree.nearest(entry.color)
                .map(|nearest| (entry.color, nearest.color))
        })
        .collect()
}

// =============================================================================
// Image rewrite
// =============================================================================

/// Remove the `n` least frequent colors of `image`.
///
/// Each pixel whose color is among the `n` rarest is replaced with the
/// closest remaining color; all other pixels are unchanged. Colors with
/// equal counts are ranked by first appearance in row-major order.
///
/// If `n` is 0 or at least the number of distinct colors, the image is
/// returned unchanged.
pub fn remove_rare_colors(image: &Image, n: usize) -> ColorResult<Image> {
    let replacements = rare_color_replacements(image, n);
    if replacements.is_empty() {
        return Ok(image.clone());
    }

    let out = image.map_pixels(|c| replacements.get(&c).copied().unwrap_or(c))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imtool_core::Layout;

    fn row(colors: &[(Color, usize)]) -> Image {
        let pixels: Vec<Color> = colors
            .iter()
            .flat_map(|&(c, n)| std::iter::repeat_n(c, n))
            .collect();
        Image::from_pixels(pixels.len() as u32, 1, 255, pixels, Layout::Interleaved).unwrap()
    }

    #[test]
    fn test_replacements_only_for_rare() {
        let rare = Color::new(250, 0, 0);
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let image = row(&[(red, 5), (rare, 1), (blue, 5)]);
        let map = rare_color_replacements(&image, 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&rare), Some(&red));
    }

    #[test]
    fn test_remove_rare_colors() {
        let rare = Color::new(0, 0, 250);
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let image = row(&[(red, 3), (rare, 1), (blue, 3)]);
        let out = remove_rare_colors(&image, 1).unwrap();
        assert_eq!(out.pixel_at(3), Some(blue));
        assert_eq!(out.pixel_at(0), Some(red));
        assert_eq!(out.pixel_at(6), Some(blue));
    }

    #[test]
    fn test_zero_threshold_is_identity() {
        let image = row(&[(Color::new(1, 1, 1), 1), (Color::new(2, 2, 2), 2)]);
        assert!(rare_color_replacements(&image, 0).is_empty());
        assert_eq!(remove_rare_colors(&image, 0).unwrap(), image);
    }

    #[test]
    fn test_all_rare_is_identity() {
        let image = row(&[(Color::new(1, 1, 1), 1), (Color::new(2, 2, 2), 2)]);
        assert_eq!(remove_rare_colors(&image, 2).unwrap(), image);
        assert_eq!(remove_rare_colors(&image, 100).unwrap(), image);
    }

    #[test]
    fn test_layout_preserved() {
        let image = row(&[(Color::new(9, 9, 9), 1), (Color::new(0, 0, 0), 4)])
            .to_layout(Layout::Planar);
        let out = remove_rare_colors(&image, 1).unwrap();
        assert_eq!(out.layout(), Layout::Planar);
        assert!(out.pixels().all(|c| c == Color::new(0, 0, 0)));
    }
}
