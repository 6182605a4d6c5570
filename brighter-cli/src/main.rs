// brighter-cli/src/main.rs
//
// Entry point for the brighter CLI. Parses arguments, sets up logging,
// builds the run configuration, and invokes the core pipeline. Exits
// non-zero on any fatal pipeline error.

mod cli;

use brighter_core::{RunConfig, run_pipeline};
use clap::Parser;
use cli::Cli;
use log::error;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = RunConfig::new(cli.input, cli.output, cli.brightness);

    match run_pipeline(&config) {
        Ok(summary) => {
            println!(
                "Wrote {} ({} frames at {:.3} fps) in {:.1}s",
                summary.output_path.display(),
                summary.frames,
                summary.frame_rate,
                summary.duration.as_secs_f64()
            );
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
