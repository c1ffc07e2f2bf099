//! Media segmentation: grouping classified sectors into disc items.
//!
//! The sector under the cursor picks the algorithm:
//! - a video chunk (or an FF8 audio sector) seeds a STR run ([`video`])
//! - an XA audio chunk seeds an interleaved audio run ([`xa`])
//! - an unknown sector gets a TIM trial decode ([`tim`])
//!
//! Anything else is stepped over.

pub mod tim;
pub mod video;
pub mod xa;

use strxa_core::{DiscError, SectorSource};

use crate::classify::SectorKind;
use crate::cursor::{ClassifiedSector, SectorCursor};
use crate::item::DiscItem;

/// What a run does with the next sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// The sector belongs to the run and moves its end.
    Accept,
    /// The sector is stepped over without ending the run.
    Skip,
    /// The run ends before this sector.
    Stop,
}

/// A run of sectors being grown one sector at a time.
pub(crate) trait Run {
    fn extend(&mut self, sector: &ClassifiedSector) -> Extension;
    fn end_sector(&self) -> u64;
}

/// Grow `run` from the cursor position until a sector stops it or the cursor
/// runs out, then leave the cursor just past the last accepted sector.
pub(crate) fn grow<S, R>(cursor: &mut SectorCursor<'_, S>, run: &mut R) -> Result<(), DiscError>
where
    S: SectorSource + ?Sized,
    R: Run,
{
    while let Some(sector) = cursor.peek()? {
        match run.extend(sector) {
            Extension::Accept | Extension::Skip => {
                cursor.advance();
            }
            Extension::Stop => break,
        }
    }
    // Trailing skipped sectors are left for the caller
    cursor.seek(run.end_sector() + 1);
    Ok(())
}

/// Outcome of one [`Segmenter::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An item ended at the cursor.
    Item(DiscItem),
    /// Sectors were stepped over without producing an item.
    Skipped,
    /// The cursor is at its upper bound.
    End,
}

/// Tunables for a segmentation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Shortest STR item reported, in frames.
    pub min_str_frames: u32,
    /// Shortest XA item reported, in audio sectors.
    pub min_xa_sectors: u64,
    /// Attempt TIM trial decodes on unknown sectors.
    pub tim: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_str_frames: 1,
            min_xa_sectors: 1,
            tim: true,
        }
    }
}

/// Splits a sector range into disc items.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: SegmentOptions,
}

impl Segmenter {
    pub fn new(options: SegmentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Take one segmentation step from the cursor position: grow an item
    /// from the sector there, or step over it.
    pub fn step<S>(&self, cursor: &mut SectorCursor<'_, S>) -> Result<Step, DiscError>
    where
        S: SectorSource + ?Sized,
    {
        let Some(sector) = cursor.peek()? else {
            return Ok(Step::End);
        };
        let kind = sector.kind;

        let item = match kind {
            SectorKind::FrameChunk(_)
            | SectorKind::Ff8FrameChunk(_)
            | SectorKind::Ff8AudioChunk(_) => {
                video::segment(cursor)?.and_then(|run| run.into_item(&self.options))
            }
            SectorKind::AudioChunk(_) => {
                xa::segment(cursor)?.and_then(|run| run.into_item(&self.options))
            }
            SectorKind::Unknown if self.options.tim => {
                let item = tim::segment(cursor)?;
                if item.is_none() {
                    cursor.advance();
                }
                item
            }
            _ => {
                cursor.advance();
                None
            }
        };
        cursor.release_behind();

        Ok(match item {
            Some(item) => {
                log::debug!(
                    "{} item at sectors {}-{}",
                    item.tag(),
                    item.start_sector(),
                    item.end_sector()
                );
                Step::Item(item)
            }
            None => Step::Skipped,
        })
    }

    /// Advance the cursor to the end of the next disc item and return it.
    /// Returns `None` once the cursor reaches its upper bound.
    pub fn next_item<S>(
        &self,
        cursor: &mut SectorCursor<'_, S>,
    ) -> Result<Option<DiscItem>, DiscError>
    where
        S: SectorSource + ?Sized,
    {
        loop {
            match self.step(cursor)? {
                Step::Item(item) => return Ok(Some(item)),
                Step::Skipped => {}
                Step::End => return Ok(None),
            }
        }
    }

    /// Segment everything between the cursor and its upper bound.
    pub fn segment<S>(&self, cursor: &mut SectorCursor<'_, S>) -> Result<Vec<DiscItem>, DiscError>
    where
        S: SectorSource + ?Sized,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_item(cursor)? {
            items.push(item);
        }
        Ok(items)
    }
}

/// Segment with default options.
pub fn segment<S>(cursor: &mut SectorCursor<'_, S>) -> Result<Vec<DiscItem>, DiscError>
where
    S: SectorSource + ?Sized,
{
    Segmenter::default().segment(cursor)
}

#[cfg(test)]
#[path = "../tests/segment_tests.rs"]
mod tests;
