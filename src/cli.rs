//! Command line surface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which extraction path to take
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Pull the icon resource out of an executable
    Exe,
    /// Ask the shell for the icon associated with the file
    Default,
}

/// Extract the icon of a file and save it as a square image.
#[derive(Debug, Parser)]
#[command(name = "file_to_image", version, about, long_about = None)]
pub struct Cli {
    /// Extraction mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Source file (an executable in exe mode; need not exist in default mode)
    pub source: PathBuf,

    /// Output image; the extension selects the format
    pub output: PathBuf,

    /// Edge length of the output image in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// Icon index inside the executable (exe mode)
    #[arg(long, default_value_t = 0)]
    pub index: u32,

    /// Configuration file to use instead of the standard locations
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Log to standard error when no log file is configured
    #[arg(short, long)]
    pub verbose: bool,
}
