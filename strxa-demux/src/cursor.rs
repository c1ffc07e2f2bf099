//! Bounded, bidirectional walk over a sector source.
//!
//! The cursor classifies each sector once when it is first loaded and keeps a
//! sliding window of classified sectors, so peeking, stepping back and
//! restoring a mark do not go back to the source.

use std::collections::VecDeque;

use strxa_core::{DiscError, RawSector, SectorSource};

use crate::classify::{SectorKind, classify};

/// Classified sectors kept around the current position.
const MAX_CACHED_SECTORS: usize = 256;

/// A sector together with its classification.
#[derive(Debug, Clone)]
pub struct ClassifiedSector {
    pub sector: RawSector,
    pub kind: SectorKind,
}

impl ClassifiedSector {
    pub fn new(sector: RawSector) -> Self {
        let kind = classify(&sector);
        Self { sector, kind }
    }

    pub fn number(&self) -> u64 {
        self.sector.sector_number()
    }
}

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMark(u64);

/// Cursor over sectors `[start, end)` of a source it borrows.
pub struct SectorCursor<'a, S: SectorSource + ?Sized> {
    source: &'a mut S,
    start: u64,
    end: u64,
    position: u64,
    cache: VecDeque<ClassifiedSector>,
    cache_start: u64,
    sectors_read: u64,
}

impl<'a, S: SectorSource + ?Sized> SectorCursor<'a, S> {
    /// Cursor over the whole source.
    pub fn new(source: &'a mut S) -> Self {
        let end = source.sector_count();
        Self::bounded(source, 0, end)
    }

    /// Cursor over sectors `[start, end)`, clamped to the source.
    pub fn bounded(source: &'a mut S, start: u64, end: u64) -> Self {
        let end = end.min(source.sector_count());
        let start = start.min(end);
        Self {
            source,
            start,
            end,
            position: start,
            cache: VecDeque::new(),
            cache_start: start,
            sectors_read: 0,
        }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.end
    }

    /// How many sectors were fetched from the source so far.
    pub fn sectors_read(&self) -> u64 {
        self.sectors_read
    }

    /// The sector at the current position, or `None` at the upper bound.
    pub fn peek(&mut self) -> Result<Option<&ClassifiedSector>, DiscError> {
        self.get(self.position)
    }

    /// The sector at absolute index `index`, or `None` outside the bounds.
    pub fn get(&mut self, index: u64) -> Result<Option<&ClassifiedSector>, DiscError> {
        if index < self.start || index >= self.end {
            return Ok(None);
        }
        self.load(index)?;
        Ok(self.cache.get((index - self.cache_start) as usize))
    }

    /// Step forward one sector. Returns false at the upper bound.
    pub fn advance(&mut self) -> bool {
        if self.position < self.end {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Step back one sector. Returns false at the lower bound.
    pub fn back(&mut self) -> bool {
        if self.position > self.start {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Move to `index`, clamped to `[start, end]`.
    pub fn seek(&mut self, index: u64) {
        self.position = index.clamp(self.start, self.end);
    }

    pub fn mark(&self) -> CursorMark {
        CursorMark(self.position)
    }

    pub fn restore(&mut self, mark: CursorMark) {
        self.seek(mark.0);
    }

    /// Drop cached sectors before the current position.
    pub fn release_behind(&mut self) {
        while self.cache_start < self.position && !self.cache.is_empty() {
            self.cache.pop_front();
            self.cache_start += 1;
        }
        if self.cache.is_empty() {
            self.cache_start = self.position;
        }
    }

    fn load(&mut self, index: u64) -> Result<(), DiscError> {
        let cache_end = self.cache_start + self.cache.len() as u64;
        if index >= self.cache_start && index < cache_end {
            return Ok(());
        }

        let sector = ClassifiedSector::new(self.source.read_sector(index)?);
        self.sectors_read += 1;

        if !self.cache.is_empty() && index == cache_end {
            self.cache.push_back(sector);
            if self.cache.len() > MAX_CACHED_SECTORS {
                self.cache.pop_front();
                self.cache_start += 1;
            }
        } else if !self.cache.is_empty() && index + 1 == self.cache_start {
            self.cache.push_front(sector);
            self.cache_start = index;
            if self.cache.len() > MAX_CACHED_SECTORS {
                self.cache.pop_back();
            }
        } else {
            self.cache.clear();
            self.cache.push_back(sector);
            self.cache_start = index;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod tests;
