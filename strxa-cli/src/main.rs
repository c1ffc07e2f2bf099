//! strxa CLI
//!
//! Command-line interface for finding and extracting PS1 STR/XA/TIM media.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands, ConfigAction};
use commands::audio::run_audio;
use commands::config::{run_config_init, run_config_path, run_config_show};
use commands::items::run_items;
use commands::scan::run_scan;
use error::CliError;

/// Install the logger. Normal output goes through `log::info!` as bare
/// lines; `--verbose` switches to the timestamped format.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .parse_default_env();
    if !verbose {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = strxa_lib::load_settings();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Scan(args) => run_scan(args, &settings, quiet),
        Commands::Items { index } => run_items(&index),
        Commands::Audio(args) => run_audio(args, &settings, quiet),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                run_config_show();
                Ok(())
            }
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
            ConfigAction::Init { force } => run_config_init(force),
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
