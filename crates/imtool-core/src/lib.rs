//! imtool Core - Basic data structures for image processing
//!
//! This crate provides the fundamental data structures used throughout
//! the imtool library:
//!
//! - [`Image`] - RGB image with 16-bit channels and a declared maximum value
//! - [`Layout`] - Interleaved or planar pixel storage
//! - [`Color`] / [`Channel`] - A pixel's color and its channel axes
//! - [`ChannelDepth`] - One- or two-byte channel encoding on disk

pub mod color;
pub mod error;
pub mod image;

pub use color::{
    Channel, ChannelDepth, Color, MAX_CHANNEL_VALUE, MAX_ONE_BYTE_VALUE, validate_max_value,
};
pub use error::{Error, Result};
pub use image::{Image, ImageInfo, Layout, Pixels};
