use std::fs::File;
use std::io::BufWriter;
use std::sync::mpsc;
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use strxa_core::SectorSource;
use strxa_lib::{
    ScanOptions, ScanProgress, Settings, open_image, scan_image_with_progress, write_index,
};

use crate::cli_types::ScanArgs;
use crate::commands::describe_item;
use crate::error::CliError;

fn scan_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} sectors  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

/// Scan an image and print (and optionally save) the items found.
pub(crate) fn run_scan(args: ScanArgs, settings: &Settings, quiet: bool) -> Result<(), CliError> {
    let mut source = open_image(&args.image)?;
    log::debug!(
        "{}: {} sectors of {} bytes",
        args.image.display(),
        source.sector_count(),
        source.raw_sector_size()
    );

    let mut segment = settings.scan.segment_options();
    if args.no_tim {
        segment.tim = false;
    }
    let options = ScanOptions {
        start: args.start,
        end: args.end,
        segment,
    };

    let pb = scan_bar(quiet);
    let (tx, rx) = mpsc::channel();
    let items = thread::scope(|s| {
        let pb = &pb;
        s.spawn(move || {
            let mut found = 0usize;
            for msg in rx {
                match msg {
                    ScanProgress::Started { start, end } => {
                        pb.set_length(end - start);
                    }
                    ScanProgress::Reading { sector, start, .. } => {
                        pb.set_position(sector - start);
                    }
                    ScanProgress::Found { item } => {
                        found += 1;
                        pb.set_message(format!("{} items, last {}", found, item.tag()));
                    }
                    ScanProgress::Completed { .. } => {
                        pb.finish_and_clear();
                    }
                }
            }
        });
        scan_image_with_progress(&mut source, &options, tx)
    })?;

    log::info!(
        "{} {} item(s) in {}",
        "Found".if_supports_color(Stdout, |t| t.bold()),
        items.len(),
        args.image.display(),
    );
    for (number, item) in items.iter().enumerate() {
        log::info!("{}", describe_item(number, item));
    }

    if let Some(output) = &args.output {
        let name = args
            .image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let writer = BufWriter::new(File::create(output)?);
        write_index(&items, name.as_deref(), writer)?;
        log::info!(
            "{} Index written to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            output.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}
