//! WAV export of decoded audio streams.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use strxa_core::SectorSource;
use strxa_demux::{AudioFormat, AudioStream};

use crate::error::StrxaError;

fn wav_spec(format: AudioFormat) -> hound::WavSpec {
    hound::WavSpec {
        channels: format.channels as u16,
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Decode `stream` into a 16-bit PCM WAV written to `writer`.
///
/// `on_progress` is called after each decoded sector with the samples per
/// channel written so far. Returns the total samples per channel.
pub fn write_wav<S, W, F>(
    stream: &mut AudioStream<'_, S>,
    writer: W,
    mut on_progress: F,
) -> Result<u64, StrxaError>
where
    S: SectorSource + ?Sized,
    W: Write + Seek,
    F: FnMut(u64),
{
    let mut wav = hound::WavWriter::new(writer, wav_spec(stream.format()))?;
    let mut written = 0u64;
    while let Some(samples) = stream.next_channel_frame()? {
        for sample in samples.interleaved() {
            wav.write_sample(sample)?;
        }
        written += samples.len() as u64;
        on_progress(written);
    }
    wav.finalize()?;

    if written != stream.total_samples() {
        log::warn!(
            "decoded {} samples, stream declared {}",
            written,
            stream.total_samples()
        );
    }
    Ok(written)
}

/// Decode `stream` into a WAV file at `path`.
pub fn export_wav<S: SectorSource + ?Sized>(
    stream: &mut AudioStream<'_, S>,
    path: &Path,
) -> Result<u64, StrxaError> {
    let file = BufWriter::new(File::create(path)?);
    let samples = write_wav(stream, file, |_| {})?;
    log::debug!("wrote {} samples to {}", samples, path.display());
    Ok(samples)
}
