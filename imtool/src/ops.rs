//! Single-image operations
//!
//! One run reads one input image, applies one [`Operation`], and writes
//! at most one output file. Any failure aborts the run.

use imtool_color::{ColorError, remove_rare_colors, rescale_max_value};
use imtool_io::{DecodeOptions, ImageFormat, ImageHeader, IoError, read_image_header};
use imtool_transform::{TransformError, resize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from running an operation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Result type for operations
pub type ToolResult<T> = Result<T, ToolError>;

/// What to do with the input image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Report width, height and maximum value
    Info,
    /// Rescale channels to a new maximum value
    MaxLevel { output: PathBuf, level: u16 },
    /// Bilinear resize
    Resize {
        output: PathBuf,
        width: u32,
        height: u32,
    },
    /// Replace the `count` least frequent colors
    CutFreq { output: PathBuf, count: usize },
    /// Write the compact indexed-color format
    Compress { output: PathBuf },
}

impl Operation {
    /// Short name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Info => "info",
            Operation::MaxLevel { .. } => "maxlevel",
            Operation::Resize { .. } => "resize",
            Operation::CutFreq { .. } => "cutfreq",
            Operation::Compress { .. } => "compress",
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Header of the input image
    Info(ImageHeader),
    /// An output file was written
    Written { path: PathBuf, format: ImageFormat },
}

/// Run `operation` on the image at `input`.
pub fn run(input: &Path, operation: &Operation, options: &DecodeOptions) -> ToolResult<Outcome> {
    tracing::info!(
        operation = operation.name(),
        input = %input.display(),
        layout = ?options.layout,
        "running"
    );

    let load = || imtool_io::read_image_with_options(input, options);
    let (output, result, format) = match operation {
        Operation::Info => return Ok(Outcome::Info(read_image_header(input)?)),
        Operation::MaxLevel { output, level } => {
            (output, rescale_max_value(&load()?, *level)?, ImageFormat::Ppm)
        }
        Operation::Resize {
            output,
            width,
            height,
        } => (output, resize(&load()?, *width, *height)?, ImageFormat::Ppm),
        Operation::CutFreq { output, count } => {
            (output, remove_rare_colors(&load()?, *count)?, ImageFormat::Ppm)
        }
        Operation::Compress { output } => (output, load()?, ImageFormat::Compact),
    };

    imtool_io::write_image(&result, output, format)?;
    tracing::info!(output = %output.display(), %format, "wrote image");
    Ok(Outcome::Written {
        path: output.clone(),
        format,
    })
}
