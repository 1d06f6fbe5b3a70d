//! imtool-transform - Geometric transformations for imtool
//!
//! This crate provides:
//!
//! - Bilinear resampling to arbitrary target dimensions

mod error;
pub mod resize;

pub use error::{TransformError, TransformResult};
pub use resize::{RatioMode, ResizeOptions, resize, resize_with_options};
