//! Physical pixel storage
//!
//! Two layouts hold the same logical pixel sequence:
//!
//! - [`Layout::Interleaved`]: one `Color` record per pixel
//! - [`Layout::Planar`]: three parallel channel arrays
//!
//! Both are indexed row-major (`y * width + x`). Only this module
//! matches on the layout; everything above it goes through
//! [`PixelStore`]'s accessors.

use super::Layout;
use crate::color::Color;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub(crate) enum PixelStore {
    Interleaved(Vec<Color>),
    Planar {
        red: Vec<u16>,
        green: Vec<u16>,
        blue: Vec<u16>,
    },
}

impl PixelStore {
    pub(crate) fn filled(layout: Layout, len: usize, color: Color) -> Self {
        match layout {
            Layout::Interleaved => PixelStore::Interleaved(vec![color; len]),
            Layout::Planar => PixelStore::Planar {
                red: vec![color.red; len],
                green: vec![color.green; len],
                blue: vec![color.blue; len],
            },
        }
    }

    pub(crate) fn from_colors(layout: Layout, colors: Vec<Color>) -> Self {
        match layout {
            Layout::Interleaved => PixelStore::Interleaved(colors),
            Layout::Planar => {
                let mut red = Vec::with_capacity(colors.len());
                let mut green = Vec::with_capacity(colors.len());
                let mut blue = Vec::with_capacity(colors.len());
                for c in colors {
                    red.push(c.red);
                    green.push(c.green);
                    blue.push(c.blue);
                }
                PixelStore::Planar { red, green, blue }
            }
        }
    }

    /// Build a store of `len` pixels, computing pixel `i` with `f(i)`.
    pub(crate) fn from_fn<F>(layout: Layout, len: usize, f: F) -> Self
    where
        F: Fn(usize) -> Color + Sync,
    {
        #[cfg(feature = "rayon")]
        let colors: Vec<Color> = (0..len).into_par_iter().map(&f).collect();
        #[cfg(not(feature = "rayon"))]
        let colors: Vec<Color> = (0..len).map(&f).collect();

        Self::from_colors(layout, colors)
    }

    pub(crate) fn layout(&self) -> Layout {
        match self {
            PixelStore::Interleaved(_) => Layout::Interleaved,
            PixelStore::Planar { .. } => Layout::Planar,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            PixelStore::Interleaved(data) => data.len(),
            PixelStore::Planar { red, .. } => red.len(),
        }
    }

    /// Get pixel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Color {
        match self {
            PixelStore::Interleaved(data) => data[index],
            PixelStore::Planar { red, green, blue } => {
                Color::new(red[index], green[index], blue[index])
            }
        }
    }

    /// Set pixel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub(crate) fn set(&mut self, index: usize, color: Color) {
        match self {
            PixelStore::Interleaved(data) => data[index] = color,
            PixelStore::Planar { red, green, blue } => {
                red[index] = color.red;
                green[index] = color.green;
                blue[index] = color.blue;
            }
        }
    }

    pub(crate) fn to_vec(&self) -> Vec<Color> {
        match self {
            PixelStore::Interleaved(data) => data.clone(),
            PixelStore::Planar { red, green, blue } => red
                .iter()
                .zip(green)
                .zip(blue)
                .map(|((&r, &g), &b)| Color::new(r, g, b))
                .collect(),
        }
    }

    /// Replace every pixel with `f(pixel)`.
    ///
    /// Pixels are independent, so with the `rayon` feature the map is
    /// spread across worker threads; each thread writes disjoint slots.
    pub(crate) fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(Color) -> Color + Sync,
    {
        match self {
            PixelStore::Interleaved(data) => {
                #[cfg(feature = "rayon")]
                data.par_iter_mut().for_each(|c| *c = f(*c));
                #[cfg(not(feature = "rayon"))]
                data.iter_mut().for_each(|c| *c = f(*c));
            }
            PixelStore::Planar { red, green, blue } => {
                let apply = |((r, g), b): ((&mut u16, &mut u16), &mut u16)| {
                    let c = f(Color::new(*r, *g, *b));
                    *r = c.red;
                    *g = c.green;
                    *b = c.blue;
                };
                #[cfg(feature = "rayon")]
                red.par_iter_mut()
                    .zip(green.par_iter_mut())
                    .zip(blue.par_iter_mut())
                    .for_each(apply);
                #[cfg(not(feature = "rayon"))]
                red.iter_mut()
                    .zip(green.iter_mut())
                    .zip(blue.iter_mut())
                    .for_each(apply);
            }
        }
    }

    /// Largest channel value over all pixels (0 for an empty store).
    pub(crate) fn max_channel(&self) -> u16 {
        match self {
            PixelStore::Interleaved(data) => {
                data.iter().map(|c| c.max_channel()).max().unwrap_or(0)
            }
            PixelStore::Planar { red, green, blue } => red
                .iter()
                .chain(green)
                .chain(blue)
                .copied()
                .max()
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Color> {
        vec![
            Color::new(1, 2, 3),
            Color::new(4, 5, 6),
            Color::new(7, 8, 9),
        ]
    }

    #[test]
    fn test_layouts_agree_on_get() {
        let a = PixelStore::from_colors(Layout::Interleaved, sample());
        let b = PixelStore::from_colors(Layout::Planar, sample());
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
        for i in 0..3 {
            assert_eq!(a.get(i), b.get(i));
        }
        assert_eq!(a.to_vec(), b.to_vec());
    }

    #[test]
    fn test_set_planar() {
        let mut store = PixelStore::from_colors(Layout::Planar, sample());
        store.set(1, Color::new(40, 50, 60));
        assert_eq!(store.get(1), Color::new(40, 50, 60));
        assert_eq!(store.get(0), Color::new(1, 2, 3));
    }

    #[test]
    fn test_map_in_place_both_layouts() {
        for layout in [Layout::Interleaved, Layout::Planar] {
            let mut store = PixelStore::from_colors(layout, sample());
            store.map_in_place(|c| c.map_channels(|v| v * 2));
            assert_eq!(store.get(2), Color::new(14, 16, 18));
            assert_eq!(store.layout(), layout);
        }
    }

    #[test]
    fn test_from_fn_and_max_channel() {
        let store = PixelStore::from_fn(Layout::Planar, 4, |i| Color::new(i as u16, 0, 0));
        assert_eq!(store.get(3), Color::new(3, 0, 0));
        assert_eq!(store.max_channel(), 3);
    }
}
