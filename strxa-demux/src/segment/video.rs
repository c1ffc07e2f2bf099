//! STR video runs.

use strxa_core::{DiscError, SectorSource};

use super::{Extension, Run, SegmentOptions, grow};
use crate::classify::{
    AudioChunk, FF8_FRAME_HEIGHT, FF8_FRAME_WIDTH, FF8_SAMPLES_PER_PAIR, Ff8Side, SectorKind,
};
use crate::cursor::{ClassifiedSector, SectorCursor};
use crate::item::DiscItem;

/// A STR run being grown from its first video chunk.
///
/// FF8 groups store their audio pair ahead of the video sectors, so an FF8
/// run may also start at an audio sector. Such a run only becomes an item
/// once a video sector joins it.
#[derive(Debug, Clone)]
pub struct StrRun {
    start_sector: u64,
    end_sector: u64,
    start_frame: u32,
    frame: u32,
    width: u16,
    height: u16,
    ff8: bool,
    has_video: bool,
    audio: Option<AudioChunk>,
    last_audio_sector: Option<u64>,
    audio_period: Option<u64>,
    audio_samples: u64,
    ff8_left: u64,
    ff8_right: u64,
}

impl StrRun {
    /// Start a run at a video chunk or an FF8 audio sector. Returns `None`
    /// for any other kind.
    pub fn seed(sector: &ClassifiedSector) -> Option<Self> {
        let (frame, width, height, ff8, has_video) = match sector.kind {
            SectorKind::FrameChunk(chunk) => {
                (chunk.frame_number, chunk.width, chunk.height, false, true)
            }
            SectorKind::Ff8FrameChunk(chunk) => (
                chunk.frame_number as u32,
                FF8_FRAME_WIDTH,
                FF8_FRAME_HEIGHT,
                true,
                true,
            ),
            SectorKind::Ff8AudioChunk(chunk) => (
                chunk.frame_number as u32,
                FF8_FRAME_WIDTH,
                FF8_FRAME_HEIGHT,
                true,
                false,
            ),
            _ => return None,
        };
        let number = sector.number();
        let mut run = Self {
            start_sector: number,
            end_sector: number,
            start_frame: frame,
            frame,
            width,
            height,
            ff8,
            has_video,
            audio: None,
            last_audio_sector: None,
            audio_period: None,
            audio_samples: 0,
            ff8_left: 0,
            ff8_right: 0,
        };
        if let SectorKind::Ff8AudioChunk(chunk) = sector.kind {
            run.accept_ff8_audio(chunk.side, number);
        }
        Some(run)
    }

    pub fn frame_count(&self) -> u64 {
        (self.frame - self.start_frame) as u64 + 1
    }

    /// Per-channel samples of the run's audio stream.
    pub fn audio_samples(&self) -> u64 {
        if self.ff8 {
            self.ff8_left.min(self.ff8_right) * FF8_SAMPLES_PER_PAIR
        } else {
            self.audio_samples
        }
    }

    /// The finished item, or `None` if the run is too short to report.
    pub fn into_item(self, options: &SegmentOptions) -> Option<DiscItem> {
        if !self.has_video {
            log::debug!(
                "dropping FF8 audio at {}-{}: no video follows",
                self.start_sector,
                self.end_sector
            );
            return None;
        }
        if self.frame_count() < options.min_str_frames as u64 {
            log::debug!(
                "dropping STR run at {}-{}: {} frames",
                self.start_sector,
                self.end_sector,
                self.frame_count()
            );
            return None;
        }
        Some(DiscItem::Str {
            start_sector: self.start_sector,
            end_sector: self.end_sector,
            start_frame: self.start_frame,
            end_frame: self.frame,
            audio_samples: self.audio_samples(),
        })
    }

    fn accept_frame(&mut self, frame: u32, width: u16, height: u16, number: u64) -> Extension {
        if width != self.width || height != self.height {
            log::debug!(
                "sector {}: frame size {}x{} ends {}x{} run",
                number,
                width,
                height,
                self.width,
                self.height
            );
            return Extension::Stop;
        }
        if frame != self.frame && Some(frame) != self.frame.checked_add(1) {
            log::debug!(
                "sector {}: frame {} does not follow {}",
                number,
                frame,
                self.frame
            );
            return Extension::Stop;
        }
        if !self.has_video {
            self.has_video = true;
            self.start_frame = frame;
        }
        self.frame = frame;
        self.end_sector = number;
        Extension::Accept
    }

    fn accept_ff8_audio(&mut self, side: Ff8Side, number: u64) -> Extension {
        match side {
            Ff8Side::Left => self.ff8_left += 1,
            Ff8Side::Right => self.ff8_right += 1,
        }
        self.end_sector = number;
        Extension::Accept
    }

    fn accept_audio(&mut self, chunk: AudioChunk, number: u64) -> Extension {
        match self.audio {
            None => self.audio = Some(chunk),
            // Other channels are separate streams
            Some(reference) if reference.file != chunk.file || reference.channel != chunk.channel => {
                return Extension::Skip;
            }
            Some(reference) if !reference.same_format(&chunk) => {
                log::debug!("sector {}: audio format changed mid-stream", number);
                return Extension::Stop;
            }
            Some(_) => {}
        }

        if let Some(last) = self.last_audio_sector {
            let gap = number - last;
            match self.audio_period {
                None => self.audio_period = Some(gap),
                Some(period) if period != gap => {
                    log::debug!(
                        "sector {}: audio gap {} differs from period {}",
                        number,
                        gap,
                        period
                    );
                }
                Some(_) => {}
            }
        }
        self.last_audio_sector = Some(number);
        self.audio_samples += chunk.samples_per_channel();
        self.end_sector = number;
        Extension::Accept
    }
}

impl Run for StrRun {
    fn extend(&mut self, sector: &ClassifiedSector) -> Extension {
        let number = sector.number();
        match sector.kind {
            SectorKind::Null | SectorKind::Audio2048(_) => Extension::Skip,
            SectorKind::FrameChunk(chunk) if !self.ff8 => {
                self.accept_frame(chunk.frame_number, chunk.width, chunk.height, number)
            }
            SectorKind::Ff8FrameChunk(chunk) if self.ff8 => self.accept_frame(
                chunk.frame_number as u32,
                FF8_FRAME_WIDTH,
                FF8_FRAME_HEIGHT,
                number,
            ),
            SectorKind::AudioChunk(chunk) if !self.ff8 => self.accept_audio(chunk, number),
            SectorKind::Ff8AudioChunk(chunk) if self.ff8 => {
                self.accept_ff8_audio(chunk.side, number)
            }
            _ => Extension::Stop,
        }
    }

    fn end_sector(&self) -> u64 {
        self.end_sector
    }
}

/// Grow a STR run from the video chunk (or FF8 audio sector) under the
/// cursor.
///
/// Leaves the cursor just past the run. Returns `None` without moving if the
/// current sector cannot seed a run.
pub fn segment<S>(cursor: &mut SectorCursor<'_, S>) -> Result<Option<StrRun>, DiscError>
where
    S: SectorSource + ?Sized,
{
    let Some(mut run) = cursor.peek()?.and_then(StrRun::seed) else {
        return Ok(None);
    };
    cursor.advance();
    grow(cursor, &mut run)?;
    Ok(Some(run))
}
