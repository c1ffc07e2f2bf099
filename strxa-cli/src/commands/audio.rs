use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use strxa_core::util::{format_bytes_approx, format_duration};
use strxa_demux::open_audio;
use strxa_lib::{Settings, open_image, read_index, select_item, write_wav};

use crate::cli_types::AudioArgs;
use crate::commands::describe_item;
use crate::error::CliError;

/// Decode one index item's audio into a WAV file.
pub(crate) fn run_audio(args: AudioArgs, settings: &Settings, quiet: bool) -> Result<(), CliError> {
    let (items, _) = read_index(BufReader::new(File::open(&args.index)?))?;
    let item = select_item(&items, args.item)?;
    log::info!("{}", describe_item(args.item, item));

    let volume = args.volume.unwrap_or(settings.audio.volume);
    if !volume.is_finite() || volume < 0.0 {
        return Err(CliError::config(format!("invalid volume {}", volume)));
    }

    let mut source = open_image(&args.image)?;
    let mut stream = open_audio(&mut source, item, args.channel, volume)?;
    let format = stream.format();
    log::debug!(
        "{} Hz, {} channel(s), {}-bit ADPCM, {} sector(s)",
        format.sample_rate,
        format.channels,
        format.bits_per_sample,
        stream.unit_count()
    );

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(stream.total_samples());
        pb.set_style(
            ProgressStyle::with_template("  {bar:40.cyan/blue} {percent}%  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb.set_message("Decoding...");
        pb
    };

    let writer = BufWriter::new(File::create(&args.output)?);
    let written = write_wav(&mut stream, writer, |samples| pb.set_position(samples))?;
    pb.finish_and_clear();

    let size = fs::metadata(&args.output).map(|m| m.len()).unwrap_or(0);
    log::info!(
        "{} Wrote {} ({} Hz, {} ch, {}, {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        args.output.display().if_supports_color(Stdout, |t| t.cyan()),
        format.sample_rate,
        format.channels,
        format_duration(written, format.sample_rate),
        format_bytes_approx(size),
    );
    Ok(())
}
