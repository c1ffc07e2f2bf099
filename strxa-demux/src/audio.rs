//! Audio stream assembly.
//!
//! [`open_audio`] walks a disc item's sector range once to pick out the
//! sectors of one audio stream, so the stream's length is known before
//! anything is decoded. Sectors are then decoded one at a time on demand.

use std::collections::BTreeMap;

use strxa_core::SectorSource;

use crate::adpcm::{
    FF8_PAYLOAD_SIZE, FilterContext, PerChannelSamples, XA_PAYLOAD_SIZE, XaDecoder,
    decode_ff8_sector,
};
use crate::classify::{AudioChunk, FF8_SAMPLE_RATE, FF8_SAMPLES_PER_PAIR, Ff8Side, SectorKind};
use crate::cursor::SectorCursor;
use crate::error::DecodeError;
use crate::item::DiscItem;

/// Shape of the PCM a stream produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u8,
    /// Bits per compressed sample (4 or 8). Output is always 16-bit.
    pub bits_per_sample: u8,
}

enum StreamSectors {
    Xa {
        decoder: XaDecoder,
        sectors: Vec<u64>,
    },
    Ff8 {
        pairs: Vec<(u64, u64)>,
        left: FilterContext,
        right: FilterContext,
        volume: f64,
    },
}

/// One decodable audio stream over a borrowed sector source.
pub struct AudioStream<'a, S: SectorSource + ?Sized> {
    source: &'a mut S,
    format: AudioFormat,
    sectors: StreamSectors,
    total_samples: u64,
    next: usize,
    pending: Vec<i16>,
    pending_pos: usize,
}

impl<'a, S: SectorSource + ?Sized> AudioStream<'a, S> {
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Samples per channel the whole stream decodes to.
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Decode units in the stream: sectors, or sector pairs for FF8 audio.
    pub fn unit_count(&self) -> usize {
        match &self.sectors {
            StreamSectors::Xa { sectors, .. } => sectors.len(),
            StreamSectors::Ff8 { pairs, .. } => pairs.len(),
        }
    }

    /// Decode the next sector (or FF8 pair). `None` at the end of the stream.
    pub fn next_channel_frame(&mut self) -> Result<Option<PerChannelSamples>, DecodeError> {
        let index = self.next;
        let samples = match &mut self.sectors {
            StreamSectors::Xa { decoder, sectors } => {
                let Some(&number) = sectors.get(index) else {
                    return Ok(None);
                };
                let sector = self.source.read_sector(number)?;
                let payload = sector.user_data();
                decoder
                    .decode(payload)
                    .ok_or(DecodeError::Truncated {
                        sector: number,
                        needed: XA_PAYLOAD_SIZE,
                        actual: payload.len(),
                    })?
            }
            StreamSectors::Ff8 {
                pairs,
                left,
                right,
                volume,
            } => {
                let Some(&(left_sector, right_sector)) = pairs.get(index) else {
                    return Ok(None);
                };
                let mut channels = Vec::with_capacity(2);
                for (number, context) in [(left_sector, left), (right_sector, right)] {
                    let sector = self.source.read_sector(number)?;
                    let data = sector.user_data();
                    let (next, samples) = decode_ff8_sector(data, *context, *volume).ok_or(
                        DecodeError::Truncated {
                            sector: number,
                            needed: FF8_PAYLOAD_SIZE,
                            actual: data.len(),
                        },
                    )?;
                    *context = next;
                    channels.push(samples);
                }
                PerChannelSamples { channels }
            }
        };
        self.next += 1;
        Ok(Some(samples))
    }

    /// Fill `buf` with interleaved samples. Returns how many were written;
    /// 0 means the stream is exhausted.
    pub fn read_interleaved(&mut self, buf: &mut [i16]) -> Result<usize, DecodeError> {
        let mut written = 0;
        while written < buf.len() {
            if self.pending_pos >= self.pending.len() {
                match self.next_channel_frame()? {
                    Some(samples) => {
                        self.pending = samples.interleaved();
                        self.pending_pos = 0;
                    }
                    None => break,
                }
                continue;
            }
            let take = (buf.len() - written).min(self.pending.len() - self.pending_pos);
            buf[written..written + take]
                .copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + take]);
            written += take;
            self.pending_pos += take;
        }
        Ok(written)
    }
}

/// Does `chunk` belong to the stream started by `first`?
fn matches_stream(first: &AudioChunk, chunk: &AudioChunk) -> bool {
    first.file == chunk.file && first.channel == chunk.channel && first.same_format(chunk)
}

/// Open the audio of a STR or XA item.
///
/// `channel` picks the interleave channel; by default the first audio
/// channel in the item is used. Sectors on that channel whose file or
/// format disagrees with its first sector are left out of the stream.
pub fn open_audio<'a, S: SectorSource + ?Sized>(
    source: &'a mut S,
    item: &DiscItem,
    channel: Option<u8>,
    volume: f64,
) -> Result<AudioStream<'a, S>, DecodeError> {
    let channel = match item {
        DiscItem::Tim { .. } => return Err(DecodeError::no_audio("TIM items are images")),
        DiscItem::Xa { channels, .. } => match channel {
            Some(c) if channels.contains(&c) => Some(c),
            Some(c) => {
                return Err(DecodeError::no_audio(format!(
                    "channel {} is not part of this item",
                    c
                )));
            }
            None => channels.first().copied(),
        },
        DiscItem::Str { .. } => channel,
    };

    let mut first: Option<AudioChunk> = None;
    let mut xa_sectors = Vec::new();
    let mut ff8_frames: BTreeMap<u16, (Option<u64>, Option<u64>)> = BTreeMap::new();
    {
        let mut cursor =
            SectorCursor::bounded(&mut *source, item.start_sector(), item.end_sector() + 1);
        while let Some(sector) = cursor.peek()? {
            let number = sector.number();
            match sector.kind {
                SectorKind::AudioChunk(chunk) if channel.is_none_or(|c| c == chunk.channel) => {
                    match first {
                        None => {
                            first = Some(chunk);
                            xa_sectors.push(number);
                        }
                        Some(reference) if matches_stream(&reference, &chunk) => {
                            xa_sectors.push(number);
                        }
                        Some(reference) if reference.channel == chunk.channel => {
                            log::warn!(
                                "sector {}: audio does not match its stream, leaving it out",
                                number
                            );
                        }
                        Some(_) => {}
                    }
                }
                SectorKind::Ff8AudioChunk(chunk) => {
                    let pair = ff8_frames.entry(chunk.frame_number).or_default();
                    match chunk.side {
                        Ff8Side::Left => pair.0 = Some(number),
                        Ff8Side::Right => pair.1 = Some(number),
                    }
                }
                _ => {}
            }
            cursor.advance();
            cursor.release_behind();
        }
    }

    if let Some(first) = first {
        let format = AudioFormat {
            sample_rate: first.sample_rate,
            channels: first.channels,
            bits_per_sample: first.bits_per_sample,
        };
        let total_samples = xa_sectors.len() as u64 * first.samples_per_channel();
        log::debug!(
            "audio stream on channel {}: {} sectors, {} samples",
            first.channel,
            xa_sectors.len(),
            total_samples
        );
        return Ok(AudioStream {
            source,
            format,
            sectors: StreamSectors::Xa {
                decoder: XaDecoder::new(first.bits_per_sample, first.channels, volume),
                sectors: xa_sectors,
            },
            total_samples,
            next: 0,
            pending: Vec::new(),
            pending_pos: 0,
        });
    }

    let pairs: Vec<(u64, u64)> = ff8_frames
        .into_values()
        .filter_map(|pair| match pair {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        })
        .collect();
    if pairs.is_empty() {
        return Err(DecodeError::no_audio(format!(
            "no audio sectors in {} item at {}-{}",
            item.tag(),
            item.start_sector(),
            item.end_sector()
        )));
    }

    let total_samples = pairs.len() as u64 * FF8_SAMPLES_PER_PAIR;
    Ok(AudioStream {
        source,
        format: AudioFormat {
            sample_rate: FF8_SAMPLE_RATE,
            channels: 2,
            bits_per_sample: 4,
        },
        sectors: StreamSectors::Ff8 {
            pairs,
            left: FilterContext::default(),
            right: FilterContext::default(),
            volume,
        },
        total_samples,
        next: 0,
        pending: Vec::new(),
        pending_pos: 0,
    })
}

#[cfg(test)]
#[path = "tests/audio_tests.rs"]
mod tests;
