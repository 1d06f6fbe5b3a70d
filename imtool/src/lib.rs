//! imtool - Raw pixel-map image processing
//!
//! Decodes binary PPM (`P6`) images and applies one of four operations:
//!
//! - Intensity rescaling to a new maximum channel value
//! - Bilinear resize
//! - Rare-color removal (nearest common color via a k-d tree)
//! - Compact indexed-color encoding (`C6`)
//!
//! # Example
//!
//! ```
//! use imtool::{Image, Layout};
//!
//! let image = Image::new(4, 4, 255, Layout::Planar).unwrap();
//! let smaller = imtool::transform::resize(&image, 2, 2).unwrap();
//! assert_eq!(smaller.dimensions(), (2, 2));
//! ```

pub mod ops;

// Re-export core types (primary data structures used everywhere)
pub use imtool_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use imtool_color as color;
pub use imtool_io as io;
pub use imtool_transform as transform;

pub use ops::{Operation, Outcome, ToolError, ToolResult, run};
