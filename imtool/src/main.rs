use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imtool::io::DecodeOptions;
use imtool::{Layout, Operation, Outcome};

#[derive(Parser)]
#[command(name = "imtool")]
#[command(about = "Rescale, resize, reduce colors of, or compress binary PPM images")]
struct Cli {
    /// In-memory pixel layout
    #[arg(long, global = true, value_enum, default_value_t = LayoutArg::Interleaved)]
    layout: LayoutArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// One record per pixel
    Interleaved,
    /// One array per channel
    Planar,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Interleaved => Layout::Interleaved,
            LayoutArg::Planar => Layout::Planar,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print width, height and maximum color value
    Info {
        /// Input PPM file
        input: PathBuf,
    },
    /// Rescale every channel to a new maximum color value
    Maxlevel {
        /// Input PPM file
        input: PathBuf,
        /// Output PPM file
        output: PathBuf,
        /// New maximum color value (0-65535)
        level: u16,
    },
    /// Resize with bilinear interpolation
    Resize {
        /// Input PPM file
        input: PathBuf,
        /// Output PPM file
        output: PathBuf,
        /// Target width in pixels
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,
        /// Target height in pixels
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,
    },
    /// Replace the least frequent colors with their nearest common color
    Cutfreq {
        /// Input PPM file
        input: PathBuf,
        /// Output PPM file
        output: PathBuf,
        /// Number of colors to remove
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
    },
    /// Write the compact indexed-color format
    Compress {
        /// Input PPM file
        input: PathBuf,
        /// Output compact file
        output: PathBuf,
    },
}

impl Commands {
    fn into_operation(self) -> (PathBuf, Operation) {
        match self {
            Commands::Info { input } => (input, Operation::Info),
            Commands::Maxlevel {
                input,
                output,
                level,
            } => (input, Operation::MaxLevel { output, level }),
            Commands::Resize {
                input,
                output,
                width,
                height,
            } => (
                input,
                Operation::Resize {
                    output,
                    width,
                    height,
                },
            ),
            Commands::Cutfreq {
                input,
                output,
                count,
            } => (
                input,
                Operation::CutFreq {
                    output,
                    count: count as usize,
                },
            ),
            Commands::Compress { input, output } => (input, Operation::Compress { output }),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imtool=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let options = DecodeOptions::with_layout(cli.layout.into());
    let (input, operation) = cli.command.into_operation();

    let outcome = imtool::run(&input, &operation, &options)
        .with_context(|| format!("{} failed for '{}'", operation.name(), input.display()))?;

    if let Outcome::Info(header) = outcome {
        println!("{}", header.info());
    }
    Ok(())
}
