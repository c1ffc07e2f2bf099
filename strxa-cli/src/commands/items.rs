use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use strxa_lib::read_index;

use crate::commands::describe_item;
use crate::error::CliError;

/// Pretty-print an index file, reporting lines that failed to parse.
pub(crate) fn run_items(path: &Path) -> Result<(), CliError> {
    let (items, errors) = read_index(BufReader::new(File::open(path)?))?;

    log::info!(
        "{} ({} items)",
        path.display().if_supports_color(Stdout, |t| t.bold()),
        items.len(),
    );
    for (number, item) in items.iter().enumerate() {
        log::info!("{}", describe_item(number, item));
    }

    if !errors.is_empty() {
        log::info!("");
        log::info!(
            "{} {} line(s) could not be parsed",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            errors.len(),
        );
        for error in &errors {
            log::info!("    {}", error.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}
