//! Color histogram
//!
//! Counts how often each distinct color occurs and orders the colors
//! from rarest to most frequent. Colors with equal counts keep the
//! order in which they first appear in a row-major scan, so the
//! ranking is reproducible.

use imtool_core::{Color, Image};
use std::collections::HashMap;

/// One distinct color and the number of pixels that have it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramEntry {
    pub color: Color,
    pub count: usize,
}

/// Distinct colors of an image sorted by ascending count
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    entries: Vec<HistogramEntry>,
}

impl ColorHistogram {
    /// Count the colors of `image`.
    pub fn from_image(image: &Image) -> Self {
        let mut slots: HashMap<Color, usize> = HashMap::new();
        let mut entries: Vec<HistogramEntry> = Vec::new();
        for color in image.pixels() {
            let slot = *slots.entry(color).or_insert_with(|| {
                entries.push(HistogramEntry { color, count: 0 });
                entries.len() - 1
            });
            entries[slot].count += 1;
        }
        // Stable: ties stay in first-occurrence order
        entries.sort_by_key(|e| e.count);
        Self { entries }
    }

    /// Entries from rarest to most frequent
    pub fn entries(&self) -> &[HistogramEntry] {
        &self.entries
    }

    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of pixels counted
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Occurrence count of `color` (0 if absent)
    pub fn count_of(&self, color: Color) -> usize {
        self.entries
            .iter()
            .find(|e| e.color == color)
            .map_or(0, |e| e.count)
    }

    /// Split into the `n` rarest entries and the rest.
    ///
    /// If `n` exceeds the number of distinct colors, every entry is rare.
    pub fn split_rarest(&self, n: usize) -> (&[HistogramEntry], &[HistogramEntry]) {
        self.entries.split_at(n.min(self.entries.len()))
    }
}

/// Count the colors of `image`, rarest first.
pub fn color_histogram(image: &Image) -> ColorHistogram {
    ColorHistogram::from_image(image)
}
