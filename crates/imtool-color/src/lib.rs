//! imtool Color - Color processing
//!
//! This crate provides:
//!
//! - **Intensity rescaling** ([`levels`]): move every channel to a new maximum value
//! - **Color histogram** ([`histogram`]): distinct colors ranked by frequency
//! - **Spatial index** ([`kdtree`]): exact nearest-color lookup
//! - **Rare-color removal** ([`quantize`]): replace the least frequent colors

pub mod error;
pub mod histogram;
pub mod kdtree;
pub mod levels;
pub mod quantize;

// Re-export core types
pub use imtool_core;

pub use error::{ColorError, ColorResult};
pub use histogram::{ColorHistogram, HistogramEntry, color_histogram};
pub use kdtree::{ColorTree, Nearest};
pub use levels::rescale_max_value;
pub use quantize::{rare_color_replacements, remove_rare_colors};
