// brighter-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use brighter_core::config::{DEFAULT_BRIGHTNESS, DEFAULT_OUTPUT_NAME};
use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Brighter: batch video brightness tool",
    long_about = "Creates a brighter copy of a video using ffmpeg via the brighter-core library."
)]
pub struct Cli {
    /// Path, name and filetype of the video to make brighter (mp4 or avi)
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_PATH")]
    pub input: PathBuf,

    /// Path, name and filetype of the output file
    #[arg(
        short = 'o',
        long = "output",
        default_value = DEFAULT_OUTPUT_NAME,
        value_name = "OUTPUT_PATH"
    )]
    pub output: PathBuf,

    /// A number from 1-9 where 1 is the current brightness
    #[arg(
        short = 'b',
        long = "brightness",
        default_value_t = DEFAULT_BRIGHTNESS,
        value_name = "FACTOR"
    )]
    pub brightness: u32,
}
