//! TIM image trial decoding.
//!
//! A TIM has no sector-level marker, so every 4-byte aligned tag in an
//! unknown sector is tried as the start of one. The trial reads the header
//! and pixel blocks through the cursor, crossing sector boundaries, and is
//! abandoned at the first structural mismatch.

use strxa_core::util::{be_u32, le_u16, le_u32};
use strxa_core::{DiscError, SectorSource};

use crate::cursor::SectorCursor;
use crate::item::DiscItem;

/// First word of every TIM (big-endian read of `10 00 00 00`).
pub const TIM_TAG: u32 = 0x1000_0000;

/// Bits of the flags word that must be clear.
pub const TIM_FLAGS_MASK: u32 = 0xF4FF_FFFF;

/// Flags bit set when a CLUT block precedes the pixel block.
pub const TIM_HAS_CLUT: u32 = 0x0800_0000;

/// VRAM bounds in 16-bit units.
const VRAM_WIDTH: u16 = 1024;
const VRAM_HEIGHT: u16 = 512;

/// Header bytes of a CLUT or pixel block: length, x, y, width, height.
const BLOCK_HEADER_SIZE: u64 = 12;

/// Byte-level reader over consecutive sectors' user data.
struct ByteScan<'c, 'a, S: SectorSource + ?Sized> {
    cursor: &'c mut SectorCursor<'a, S>,
    sector: u64,
    offset: usize,
}

impl<'c, 'a, S: SectorSource + ?Sized> ByteScan<'c, 'a, S> {
    fn new(cursor: &'c mut SectorCursor<'a, S>, sector: u64, offset: usize) -> Self {
        Self {
            cursor,
            sector,
            offset,
        }
    }

    /// Sector holding the last byte consumed.
    fn last_sector(&self) -> u64 {
        self.sector
    }

    /// Fill `out`, or return false if the data ends first.
    fn read_into(&mut self, out: &mut [u8]) -> Result<bool, DiscError> {
        let mut filled = 0;
        while filled < out.len() {
            let data = match self.cursor.get(self.sector) {
                Ok(Some(sector)) => sector.sector.user_data(),
                Ok(None) | Err(DiscError::Truncated { .. }) => return Ok(false),
                Err(e) => return Err(e),
            };
            if self.offset >= data.len() {
                self.sector += 1;
                self.offset = 0;
                continue;
            }
            let take = (out.len() - filled).min(data.len() - self.offset);
            out[filled..filled + take].copy_from_slice(&data[self.offset..self.offset + take]);
            filled += take;
            self.offset += take;
        }
        Ok(true)
    }

    fn read<const N: usize>(&mut self) -> Result<Option<[u8; N]>, DiscError> {
        let mut buf = [0u8; N];
        Ok(self.read_into(&mut buf)?.then_some(buf))
    }

    /// Step over `count` bytes, or return false if the data ends first.
    fn skip(&mut self, mut count: u64) -> Result<bool, DiscError> {
        while count > 0 {
            let len = match self.cursor.get(self.sector) {
                Ok(Some(sector)) => sector.sector.user_data().len(),
                Ok(None) | Err(DiscError::Truncated { .. }) => return Ok(false),
                Err(e) => return Err(e),
            };
            if self.offset >= len {
                self.sector += 1;
                self.offset = 0;
                continue;
            }
            let take = count.min((len - self.offset) as u64);
            self.offset += take as usize;
            count -= take;
        }
        Ok(true)
    }
}

/// Check one CLUT or pixel block and step over it.
fn scan_block<S: SectorSource + ?Sized>(scan: &mut ByteScan<'_, '_, S>) -> Result<bool, DiscError> {
    let Some(header) = scan.read::<12>()? else {
        return Ok(false);
    };
    let length = le_u32(&header, 0) as u64;
    let width = le_u16(&header, 8);
    let height = le_u16(&header, 10);

    if width == 0 || height == 0 || width > VRAM_WIDTH || height > VRAM_HEIGHT {
        return Ok(false);
    }
    if length != BLOCK_HEADER_SIZE + width as u64 * height as u64 * 2 {
        return Ok(false);
    }
    scan.skip(length - BLOCK_HEADER_SIZE)
}

/// Trial-decode a whole TIM. Ok(false) is a structural rejection.
fn scan_tim<S: SectorSource + ?Sized>(scan: &mut ByteScan<'_, '_, S>) -> Result<bool, DiscError> {
    let Some(header) = scan.read::<8>()? else {
        return Ok(false);
    };
    if be_u32(&header, 0) != TIM_TAG {
        return Ok(false);
    }
    let flags = be_u32(&header, 4);
    if flags & TIM_FLAGS_MASK != 0 {
        return Ok(false);
    }
    if flags & TIM_HAS_CLUT != 0 && !scan_block(scan)? {
        return Ok(false);
    }
    scan_block(scan)
}

/// Try to decode a TIM starting in the sector under the cursor.
///
/// On success the cursor is left past the image's last sector. On failure it
/// is back where it started.
pub fn segment<S>(cursor: &mut SectorCursor<'_, S>) -> Result<Option<DiscItem>, DiscError>
where
    S: SectorSource + ?Sized,
{
    let start = cursor.position();
    let candidates: Vec<usize> = {
        let Some(sector) = cursor.peek()? else {
            return Ok(None);
        };
        let data = sector.sector.user_data();
        (0..data.len().saturating_sub(3))
            .step_by(4)
            .filter(|&offset| be_u32(data, offset) == TIM_TAG)
            .collect()
    };

    for offset in candidates {
        let mark = cursor.mark();
        let mut scan = ByteScan::new(cursor, start, offset);
        if scan_tim(&mut scan)? {
            let end = scan.last_sector();
            log::debug!("TIM at sector {} offset {}", start, offset);
            cursor.seek(end + 1);
            return Ok(Some(DiscItem::Tim {
                start_sector: start,
                end_sector: end,
                start_offset: offset as u32,
            }));
        }
        log::trace!("sector {} offset {}: not a TIM", start, offset);
        cursor.restore(mark);
    }
    Ok(None)
}
