//! XA ADPCM decoding.
//!
//! Each sound group is 16 parameter bytes followed by 112 data bytes. A group
//! holds 8 sound units of 4-bit samples or 4 units of 8-bit samples, 28
//! samples per unit. Unit `u` feeds output channel `u % channels`.
//!
//! Filter state is threaded explicitly: decoding takes the previous
//! [`FilterContext`]s and returns the updated ones.

use crate::classify::{FF8_HEADER_SIZE, SOUND_GROUP_SIZE, SOUND_GROUPS};

/// Predictor weight on the previous sample, by filter.
pub const K0: [f64; 4] = [0.0, 0.9375, 1.796875, 1.53125];
/// Predictor weight on the sample before that.
pub const K1: [f64; 4] = [0.0, 0.0, -0.8125, -0.859375];

/// Samples in one sound unit.
pub const SAMPLES_PER_UNIT: usize = 28;

/// Compressed bytes of one XA audio sector.
pub const XA_PAYLOAD_SIZE: usize = SOUND_GROUPS * SOUND_GROUP_SIZE;

/// FF8 audio blocks: 1 parameter byte, 1 flags byte, 14 data bytes.
const FF8_BLOCK_SIZE: usize = 16;
const FF8_BLOCKS: usize = 53;

/// Samples per channel decoded from one FF8 audio sector.
pub const FF8_SAMPLES_PER_SECTOR: usize = 1470;

/// Bytes an FF8 audio sector needs.
pub const FF8_PAYLOAD_SIZE: usize = FF8_HEADER_SIZE + FF8_BLOCKS * FF8_BLOCK_SIZE;

/// Predictor history of one output channel: the two most recent decoded
/// samples, before volume scaling and clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterContext {
    pub prev1: f64,
    pub prev2: f64,
}

impl FilterContext {
    /// Decode one sample. `raw` is the sample already placed in the top of a
    /// 16-bit word; `param` holds the range (bits 0-3) and filter (bits 4-5).
    pub fn decode(self, raw: i32, param: u8, volume: f64) -> (Self, i16) {
        let range = param & 0x0F;
        let filter = ((param >> 4) & 0x03) as usize;
        let value = (raw >> range) as f64 + K0[filter] * self.prev1 + K1[filter] * self.prev2;
        let next = Self {
            prev1: value,
            prev2: self.prev1,
        };
        let sample = (value * volume).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16;
        (next, sample)
    }
}

/// Decoded PCM, one sample vector per output channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerChannelSamples {
    pub channels: Vec<Vec<i16>>,
}

impl PerChannelSamples {
    pub fn with_channels(count: usize, capacity: usize) -> Self {
        Self {
            channels: (0..count).map(|_| Vec::with_capacity(capacity)).collect(),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples as frames: L R L R ... for stereo.
    pub fn interleaved(&self) -> Vec<i16> {
        let mut out = Vec::with_capacity(self.len() * self.channel_count());
        for i in 0..self.len() {
            for channel in &self.channels {
                out.push(channel[i]);
            }
        }
        out
    }
}

/// 4-bit sample: a signed nibble at the top of the word.
fn nibble_sample(nibble: u8) -> i32 {
    (((nibble as u16) << 12) as i16) as i32
}

/// 8-bit sample: the data byte taken unsigned and shifted up.
fn byte_sample(byte: u8) -> i32 {
    (byte as i32) << 8
}

/// Decode one XA audio sector's sound groups.
///
/// `contexts` holds one filter context per output channel. Returns the updated
/// contexts and the decoded samples, or `None` if `payload` is shorter than
/// [`XA_PAYLOAD_SIZE`].
pub fn decode_xa_sector(
    payload: &[u8],
    bits_per_sample: u8,
    contexts: &[FilterContext],
    volume: f64,
) -> Option<(Vec<FilterContext>, PerChannelSamples)> {
    if payload.len() < XA_PAYLOAD_SIZE || contexts.is_empty() {
        return None;
    }
    let channels = contexts.len();
    let units = if bits_per_sample == 8 { 4 } else { 8 };
    let mut contexts = contexts.to_vec();
    let mut out =
        PerChannelSamples::with_channels(channels, SOUND_GROUPS * units * SAMPLES_PER_UNIT / channels);

    for group in payload[..XA_PAYLOAD_SIZE].chunks_exact(SOUND_GROUP_SIZE) {
        let (params, data) = group.split_at(16);
        for unit in 0..units {
            let channel = unit % channels;
            let param = if units == 8 { params[4 + unit] } else { params[unit] };
            for j in 0..SAMPLES_PER_UNIT {
                let raw = if units == 8 {
                    let byte = data[j * 4 + unit / 2];
                    let nibble = if unit % 2 == 0 { byte & 0x0F } else { byte >> 4 };
                    nibble_sample(nibble)
                } else {
                    byte_sample(data[j * 4 + unit])
                };
                let (next, sample) = contexts[channel].decode(raw, param, volume);
                contexts[channel] = next;
                out.channels[channel].push(sample);
            }
        }
    }

    Some((contexts, out))
}

/// Decode one FF8 audio sector (one channel of a left/right pair).
///
/// The payload after the 8-byte header is a run of 16-byte blocks: parameter
/// byte, flags byte, then 28 nibbles, low nibble first. Returns `None` if
/// `data` is shorter than [`FF8_PAYLOAD_SIZE`].
pub fn decode_ff8_sector(
    data: &[u8],
    context: FilterContext,
    volume: f64,
) -> Option<(FilterContext, Vec<i16>)> {
    if data.len() < FF8_PAYLOAD_SIZE {
        return None;
    }
    let mut context = context;
    let mut out = Vec::with_capacity(FF8_BLOCKS * SAMPLES_PER_UNIT);

    for block in data[FF8_HEADER_SIZE..FF8_PAYLOAD_SIZE].chunks_exact(FF8_BLOCK_SIZE) {
        // Only the low two filter bits index K0/K1
        let param = block[0] & 0x3F;
        for &byte in &block[2..] {
            for nibble in [byte & 0x0F, byte >> 4] {
                let (next, sample) = context.decode(nibble_sample(nibble), param, volume);
                context = next;
                out.push(sample);
            }
        }
    }
    out.truncate(FF8_SAMPLES_PER_SECTOR);

    Some((context, out))
}

/// Stateful XA decoder for one audio stream.
#[derive(Debug, Clone)]
pub struct XaDecoder {
    bits_per_sample: u8,
    volume: f64,
    contexts: Vec<FilterContext>,
}

impl XaDecoder {
    pub fn new(bits_per_sample: u8, channels: u8, volume: f64) -> Self {
        Self {
            bits_per_sample,
            volume,
            contexts: vec![FilterContext::default(); channels.max(1) as usize],
        }
    }

    pub fn contexts(&self) -> &[FilterContext] {
        &self.contexts
    }

    /// Decode the next sector of the stream. `None` if the payload is short.
    pub fn decode(&mut self, payload: &[u8]) -> Option<PerChannelSamples> {
        let (contexts, samples) =
            decode_xa_sector(payload, self.bits_per_sample, &self.contexts, self.volume)?;
        self.contexts = contexts;
        Some(samples)
    }
}

#[cfg(test)]
#[path = "tests/adpcm_tests.rs"]
mod tests;
