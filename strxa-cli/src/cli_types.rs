//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "strxa")]
#[command(about = "Find and extract STR video, XA audio and TIM images from PS1 disc images", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `strxa scan`.
#[derive(Args, Clone)]
pub(crate) struct ScanArgs {
    /// Disc image (BIN, ISO, CHD or CUE)
    pub image: PathBuf,

    /// First sector to scan
    #[arg(long)]
    pub start: Option<u64>,

    /// Last sector to scan (inclusive)
    #[arg(long)]
    pub end: Option<u64>,

    /// Write the item index to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the TIM image search on unrecognized sectors
    #[arg(long)]
    pub no_tim: bool,
}

/// Arguments for `strxa audio`.
#[derive(Args, Clone)]
pub(crate) struct AudioArgs {
    /// Disc image the index was made from
    pub image: PathBuf,

    /// Index file written by `strxa scan -o`
    pub index: PathBuf,

    /// Item number in the index (as shown by `strxa items`)
    #[arg(short, long)]
    pub item: usize,

    /// Output WAV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Volume scale (defaults to the settings file value)
    #[arg(long)]
    pub volume: Option<f64>,

    /// Only decode this XA channel
    #[arg(short, long)]
    pub channel: Option<u8>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan a disc image for STR, XA and TIM items
    Scan(ScanArgs),

    /// List the items in an index file
    Items {
        /// Index file written by `strxa scan -o`
        index: PathBuf,
    },

    /// Decode an item's audio to a WAV file
    Audio(AudioArgs),

    /// Show or initialize the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
