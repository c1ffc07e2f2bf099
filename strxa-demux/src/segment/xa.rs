//! Interleaved XA audio runs.
//!
//! Each of the 32 interleave channels is tracked independently. A channel's
//! file and format are fixed by its first sector, and the gap between its
//! first two sectors fixes its period. A later sector breaking any of them
//! ends the run.

use std::collections::{BTreeMap, BTreeSet};

use strxa_core::{DiscError, SectorSource};

use super::{Extension, Run, SegmentOptions, grow};
use crate::classify::{AudioChunk, SOUND_GROUP_SIZE, SOUND_GROUPS, SectorKind};
use crate::cursor::{ClassifiedSector, SectorCursor};
use crate::item::DiscItem;

/// Per-channel state of an XA run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelContext {
    pub file: u8,
    pub bits_per_sample: u8,
    pub sample_rate: u32,
    pub channels: u8,
    pub last_sector: u64,
    /// Sector gap between consecutive sectors of this channel, once known.
    pub period: Option<u64>,
    pub sectors: u64,
    /// Per-channel samples from non-silent sectors.
    pub samples: u64,
}

impl ChannelContext {
    pub fn new(chunk: &AudioChunk, sector: u64, silent: bool) -> Self {
        Self {
            file: chunk.file,
            bits_per_sample: chunk.bits_per_sample,
            sample_rate: chunk.sample_rate,
            channels: chunk.channels,
            last_sector: sector,
            period: None,
            sectors: 1,
            samples: if silent { 0 } else { chunk.samples_per_channel() },
        }
    }

    /// The context after one more sector, or `None` if the sector breaks the
    /// channel's file, format or period.
    pub fn extend(self, chunk: &AudioChunk, sector: u64, silent: bool) -> Option<Self> {
        if chunk.file != self.file
            || chunk.bits_per_sample != self.bits_per_sample
            || chunk.sample_rate != self.sample_rate
            || chunk.channels != self.channels
        {
            return None;
        }
        let gap = sector.checked_sub(self.last_sector).filter(|&gap| gap > 0)?;
        let period = match self.period {
            None => gap,
            Some(period) if period == gap => period,
            Some(_) => return None,
        };
        Some(Self {
            last_sector: sector,
            period: Some(period),
            sectors: self.sectors + 1,
            samples: self.samples + if silent { 0 } else { chunk.samples_per_channel() },
            ..self
        })
    }
}

/// Whether an audio sector's sound groups are all zero.
fn is_silent(sector: &ClassifiedSector) -> bool {
    sector
        .sector
        .user_data()
        .iter()
        .take(SOUND_GROUPS * SOUND_GROUP_SIZE)
        .all(|&b| b == 0)
}

/// An XA run being grown from its first audio sector.
#[derive(Debug, Clone)]
pub struct XaRun {
    start_sector: u64,
    end_sector: u64,
    contexts: BTreeMap<u8, ChannelContext>,
}

impl XaRun {
    pub fn seed(sector: &ClassifiedSector) -> Option<Self> {
        let SectorKind::AudioChunk(chunk) = sector.kind else {
            return None;
        };
        let number = sector.number();
        let context = ChannelContext::new(&chunk, number, is_silent(sector));
        Some(Self {
            start_sector: number,
            end_sector: number,
            contexts: BTreeMap::from([(chunk.channel, context)]),
        })
    }

    pub fn contexts(&self) -> &BTreeMap<u8, ChannelContext> {
        &self.contexts
    }

    /// Audio sectors accepted across all channels.
    pub fn audio_sectors(&self) -> u64 {
        self.contexts.values().map(|c| c.sectors).sum()
    }

    /// The finished item, or `None` if no channel carried sound or the run
    /// is too short.
    pub fn into_item(self, options: &SegmentOptions) -> Option<DiscItem> {
        let channels: BTreeSet<u8> = self
            .contexts
            .iter()
            .filter(|(_, context)| context.samples > 0)
            .map(|(&channel, _)| channel)
            .collect();
        if channels.is_empty() || self.audio_sectors() < options.min_xa_sectors {
            log::debug!(
                "dropping XA run at {}-{}: {} sectors, {} audible channels",
                self.start_sector,
                self.end_sector,
                self.audio_sectors(),
                channels.len()
            );
            return None;
        }
        Some(DiscItem::Xa {
            start_sector: self.start_sector,
            end_sector: self.end_sector,
            channels,
        })
    }
}

impl Run for XaRun {
    fn extend(&mut self, sector: &ClassifiedSector) -> Extension {
        let number = sector.number();
        let chunk = match sector.kind {
            SectorKind::Null => return Extension::Skip,
            SectorKind::AudioChunk(chunk) => chunk,
            _ => return Extension::Stop,
        };
        let silent = is_silent(sector);

        let context = match self.contexts.get(&chunk.channel) {
            None => ChannelContext::new(&chunk, number, silent),
            Some(context) => match context.extend(&chunk, number, silent) {
                Some(context) => context,
                None => {
                    log::debug!(
                        "sector {}: channel {} breaks its file, format or period",
                        number,
                        chunk.channel
                    );
                    return Extension::Stop;
                }
            },
        };
        self.contexts.insert(chunk.channel, context);
        self.end_sector = number;
        Extension::Accept
    }

    fn end_sector(&self) -> u64 {
        self.end_sector
    }
}

/// Grow an XA run from the audio sector under the cursor.
pub fn segment<S>(cursor: &mut SectorCursor<'_, S>) -> Result<Option<XaRun>, DiscError>
where
    S: SectorSource + ?Sized,
{
    let Some(mut run) = cursor.peek()?.and_then(XaRun::seed) else {
        return Ok(None);
    };
    cursor.advance();
    grow(cursor, &mut run)?;
    Ok(Some(run))
}
