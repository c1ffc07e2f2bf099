//! Sector classification.
//!
//! [`classify`] runs a fixed, ordered list of trials over a sector and returns
//! the first kind whose structural checks pass. Trials never fail loudly: a
//! mismatch just falls through to the next candidate, and a sector nothing
//! accepts is [`SectorKind::Unknown`].

use strxa_core::util::{be_u32, le_u16, le_u32};
use strxa_core::{RawSector, Submode};

/// Magic at the start of every STR video chunk header (bytes `60 01 01 80`).
pub const FRAME_CHUNK_MAGIC: u32 = 0x6001_0180;

/// Size of the STR video chunk header.
pub const FRAME_CHUNK_HEADER_SIZE: usize = 32;

/// Video payload bytes following the chunk header.
pub const FRAME_CHUNK_PAYLOAD_SIZE: usize = 2016;

/// Value the chunk header's marker field normally holds.
pub const FRAME_CHUNK_MARKER: u16 = 0x3800;

/// FF8 movies are always this size.
pub const FF8_FRAME_WIDTH: u16 = 320;
pub const FF8_FRAME_HEIGHT: u16 = 224;

/// Size of the FF8 sector header ("SM" tag + group fields).
pub const FF8_HEADER_SIZE: usize = 8;

/// Samples per output channel in one FF8 left/right audio pair (2940 total).
pub const FF8_SAMPLES_PER_PAIR: u64 = 2940 / 2;

/// FF8 audio plays at 44100/2 Hz.
pub const FF8_SAMPLE_RATE: u32 = 44100 / 2;

/// ADPCM sound groups in one audio sector.
pub const SOUND_GROUPS: usize = 18;

/// Bytes per sound group: 16 parameter bytes + 112 data bytes.
pub const SOUND_GROUP_SIZE: usize = 128;

/// A STR video chunk: one sector's slice of a compressed video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameChunk {
    pub chunk_number: u16,
    pub chunks_in_frame: u16,
    pub frame_number: u32,
    pub used_demux_size: u32,
    pub width: u16,
    pub height: u16,
    /// Read but not validated; older encoders leave it zero.
    pub duration: u16,
    /// Read but not validated; normally [`FRAME_CHUNK_MARKER`].
    pub marker: u16,
    pub quantization_scale: u16,
    pub version: u16,
}

impl FrameChunk {
    /// Parse the 32-byte chunk header at the start of `data`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < FRAME_CHUNK_HEADER_SIZE + FRAME_CHUNK_PAYLOAD_SIZE {
            return None;
        }
        if be_u32(data, 0) != FRAME_CHUNK_MAGIC {
            return None;
        }
        let frame_number = le_u32(data, 8);
        if frame_number == u32::MAX {
            return None;
        }

        Some(Self {
            chunk_number: le_u16(data, 4),
            chunks_in_frame: le_u16(data, 6),
            frame_number,
            used_demux_size: le_u32(data, 12),
            width: le_u16(data, 16),
            height: le_u16(data, 18),
            duration: le_u16(data, 20),
            marker: le_u16(data, 22),
            quantization_scale: le_u16(data, 24),
            version: le_u16(data, 26),
        })
    }
}

/// An XA ADPCM audio sector (interleaved XA or audio embedded in a STR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioChunk {
    pub file: u8,
    pub channel: u8,
    pub sample_rate: u32,
    pub bits_per_sample: u8,
    pub channels: u8,
}

impl AudioChunk {
    /// Whether two sectors share sample rate, bit depth and channel count.
    pub fn same_format(&self, other: &AudioChunk) -> bool {
        self.sample_rate == other.sample_rate
            && self.bits_per_sample == other.bits_per_sample
            && self.channels == other.channels
    }

    /// Samples each output channel gets from one sector.
    pub fn samples_per_channel(&self) -> u64 {
        samples_per_sector(self.bits_per_sample) / self.channels as u64
    }
}

/// Samples (all channels together) carried by one XA audio sector.
///
/// 4-bit sectors hold 8 sound units per group, 8-bit sectors 4, each unit
/// 28 samples.
pub fn samples_per_sector(bits_per_sample: u8) -> u64 {
    let units = if bits_per_sample == 8 { 4 } else { 8 };
    (SOUND_GROUPS * units * 28) as u64
}

/// Which half of an FF8 audio pair a sector carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ff8Side {
    Left,
    Right,
}

/// An FF8 video chunk. Frame size is fixed at 320x224.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ff8FrameChunk {
    pub sector_in_group: u8,
    pub sectors_per_group: u8,
    pub frame_number: u16,
}

/// One channel of an FF8 paired audio frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ff8AudioChunk {
    pub side: Ff8Side,
    pub sector_in_group: u8,
    pub sectors_per_group: u8,
    pub frame_number: u16,
}

/// Header-less audio sector, recognized heuristically.
///
/// Channel count and sample rate cannot be recovered; treat it as audio of
/// unknown format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Audio2048 {
    pub bits_per_sample: u8,
}

/// What a sector structurally is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorKind {
    /// Submode zero: filler in an unused interleave channel.
    Null,
    FrameChunk(FrameChunk),
    AudioChunk(AudioChunk),
    Ff8FrameChunk(Ff8FrameChunk),
    Ff8AudioChunk(Ff8AudioChunk),
    Audio2048(Audio2048),
    Unknown,
}

impl SectorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::FrameChunk(_) => "FrameChunk",
            Self::AudioChunk(_) => "AudioChunk",
            Self::Ff8FrameChunk(_) => "FF8FrameChunk",
            Self::Ff8AudioChunk(_) => "FF8AudioChunk",
            Self::Audio2048(_) => "Audio2048",
            Self::Unknown => "Unknown",
        }
    }
}

/// One classification trial.
pub(crate) type Trial = fn(&RawSector) -> Option<SectorKind>;

/// Trials in priority order.
pub(crate) const TRIALS: &[(&str, Trial)] = &[
    ("Null", try_null),
    ("FrameChunk", try_frame_chunk),
    ("AudioChunk", try_audio_chunk),
    ("FF8FrameChunk", try_ff8_frame_chunk),
    ("FF8AudioChunk", try_ff8_audio_chunk),
    ("Audio2048", try_audio_2048),
];

/// Classify one sector. Pure: the same bytes always give the same kind.
pub fn classify(sector: &RawSector) -> SectorKind {
    let kind = TRIALS
        .iter()
        .find_map(|(_, trial)| trial(sector))
        .unwrap_or(SectorKind::Unknown);
    log::trace!("sector {}: {}", sector.sector_number(), kind.name());
    kind
}

fn try_null(sector: &RawSector) -> Option<SectorKind> {
    match sector.submode() {
        Some(submode) if submode.is_empty() => Some(SectorKind::Null),
        _ => None,
    }
}

fn try_frame_chunk(sector: &RawSector) -> Option<SectorKind> {
    if let Some(submode) = sector.submode()
        && (!submode.intersects(Submode::VIDEO | Submode::DATA)
            || submode.contains(Submode::AUDIO))
    {
        return None;
    }
    FrameChunk::parse(sector.user_data()).map(SectorKind::FrameChunk)
}

fn try_audio_chunk(sector: &RawSector) -> Option<SectorKind> {
    let header = sector.header()?;
    if !header.submode.contains(Submode::FORM2 | Submode::AUDIO) {
        return None;
    }
    let coding = header.coding;
    Some(SectorKind::AudioChunk(AudioChunk {
        file: header.file,
        channel: header.channel,
        sample_rate: coding.sample_rate()?,
        bits_per_sample: coding.bits_per_sample()?,
        channels: coding.channels()?,
    }))
}

/// Common FF8 header: `"SM" marker 0x01`, sector-in-group, sectors-per-group,
/// frame number (LE u16).
fn parse_ff8_header(sector: &RawSector) -> Option<(u8, u8, u8, u16)> {
    if sector
        .submode()
        .is_some_and(|s| s.contains(Submode::AUDIO))
    {
        return None;
    }
    let data = sector.user_data();
    if data.len() < FF8_HEADER_SIZE || &data[0..2] != b"SM" || data[3] != 0x01 {
        return None;
    }
    let sector_in_group = data[4];
    let sectors_per_group = data[5];
    if sectors_per_group == 0 || sector_in_group >= sectors_per_group {
        return None;
    }
    Some((data[2], sector_in_group, sectors_per_group, le_u16(data, 6)))
}

fn try_ff8_frame_chunk(sector: &RawSector) -> Option<SectorKind> {
    match parse_ff8_header(sector)? {
        (b'J', sector_in_group, sectors_per_group, frame_number) => {
            Some(SectorKind::Ff8FrameChunk(Ff8FrameChunk {
                sector_in_group,
                sectors_per_group,
                frame_number,
            }))
        }
        _ => None,
    }
}

fn try_ff8_audio_chunk(sector: &RawSector) -> Option<SectorKind> {
    let (marker, sector_in_group, sectors_per_group, frame_number) = parse_ff8_header(sector)?;
    let side = match marker {
        b'N' => Ff8Side::Left,
        b'R' => Ff8Side::Right,
        _ => return None,
    };
    Some(SectorKind::Ff8AudioChunk(Ff8AudioChunk {
        side,
        sector_in_group,
        sectors_per_group,
        frame_number,
    }))
}

/// A sound unit parameter byte: filter in bits 4-5, range 0-12 in bits 0-3.
fn is_plausible_param(param: u8) -> bool {
    param & 0xC0 == 0 && param & 0x0F <= 12
}

fn try_audio_2048(sector: &RawSector) -> Option<SectorKind> {
    if sector.has_header() {
        return None;
    }
    let data = sector.user_data();
    if data.len() < SOUND_GROUP_SIZE * 16 {
        return None;
    }

    // 4-bit groups repeat their parameters as [a b a b], 8-bit as [a a a a]
    let mut all_eight_bit = true;
    for window in data.chunks_exact(SOUND_GROUP_SIZE).take(16) {
        let params = &window[..16];
        if params.iter().all(|&b| b == 0) {
            return None;
        }
        if !params.iter().all(|&p| is_plausible_param(p)) {
            return None;
        }
        if params[0..4] != params[4..8] || params[8..12] != params[12..16] {
            return None;
        }
        if params[0..4] != params[8..12] {
            all_eight_bit = false;
        }
    }

    Some(SectorKind::Audio2048(Audio2048 {
        bits_per_sample: if all_eight_bit { 8 } else { 4 },
    }))
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
