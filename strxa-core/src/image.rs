//! Flat disc image sources (`.iso`, `.bin`, `.img`).
//!
//! Detects the sector layout from the CD sync pattern, the ISO 9660 volume
//! descriptor and the file length, then serves sectors by index.

use std::io::{Read, Seek, SeekFrom};

use crate::sector::{RawSector, SectorLayout};
use crate::{DiscError, SectorSource};

/// CD sync pattern at the start of every raw (2352-byte) sector.
pub const CD_SYNC_PATTERN: [u8; 12] = [
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
];

/// ISO 9660 Primary Volume Descriptor is always at sector 16.
const PVD_SECTOR: u64 = 16;

/// Detect the sector layout of a flat image.
pub fn detect_layout<R: Read + Seek + ?Sized>(reader: &mut R) -> Result<SectorLayout, DiscError> {
    let len = reader.seek(SeekFrom::End(0))?;
    if len < 2048 {
        return Err(DiscError::TooSmall {
            expected: 2048,
            actual: len,
        });
    }

    let mut buf = [0u8; 12];
    reader.seek(SeekFrom::Start(0))?;
    reader.read_exact(&mut buf)?;

    // Raw sectors: tell 2352 from 2448 by where the second sync pattern sits
    if buf == CD_SYNC_PATTERN {
        let layout = if has_sync_at(reader, 2448)? && !has_sync_at(reader, 2352)? {
            SectorLayout::Raw2448
        } else if len % 2352 != 0 && len % 2448 == 0 {
            SectorLayout::Raw2448
        } else {
            SectorLayout::Raw2352
        };
        reader.seek(SeekFrom::Start(0))?;
        return Ok(layout);
    }

    // Cooked images: look for the CD001 signature of the PVD
    for layout in [SectorLayout::Iso2048, SectorLayout::Mode2_2336] {
        let offset = PVD_SECTOR * layout.raw_size() as u64 + layout.data_offset() as u64 + 1;
        if offset + 5 <= len {
            reader.seek(SeekFrom::Start(offset))?;
            let mut cd001 = [0u8; 5];
            reader.read_exact(&mut cd001)?;
            if &cd001 == b"CD001" {
                reader.seek(SeekFrom::Start(0))?;
                return Ok(layout);
            }
        }
    }

    reader.seek(SeekFrom::Start(0))?;
    // No filesystem: fall back to the file length (STR/XA rips)
    if len % 2048 == 0 {
        Ok(SectorLayout::Iso2048)
    } else if len % 2336 == 0 {
        Ok(SectorLayout::Mode2_2336)
    } else if len % 2352 == 0 {
        Ok(SectorLayout::Raw2352)
    } else {
        Err(DiscError::invalid_format(
            "Not a recognized CD image sector layout",
        ))
    }
}

fn has_sync_at<R: Read + Seek + ?Sized>(reader: &mut R, offset: u64) -> Result<bool, DiscError> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = [0u8; 12];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(buf == CD_SYNC_PATTERN),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(DiscError::Io(e)),
    }
}

/// A disc image stored as consecutive fixed-size sectors.
pub struct FlatImage<R> {
    reader: R,
    layout: SectorLayout,
    sector_count: u64,
}

impl<R: Read + Seek> FlatImage<R> {
    /// Open an image, detecting its layout.
    pub fn open(mut reader: R) -> Result<Self, DiscError> {
        let layout = detect_layout(&mut reader)?;
        Self::with_layout(reader, layout)
    }

    /// Open an image with a known layout.
    pub fn with_layout(mut reader: R, layout: SectorLayout) -> Result<Self, DiscError> {
        let len = reader.seek(SeekFrom::End(0))?;
        let size = layout.raw_size() as u64;
        let sector_count = len / size;
        if len % size != 0 {
            log::debug!(
                "Image length {} is not a multiple of {}; ignoring {} trailing bytes",
                len,
                size,
                len % size
            );
        }
        Ok(Self {
            reader,
            layout,
            sector_count,
        })
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> SectorSource for FlatImage<R> {
    fn sector_count(&self) -> u64 {
        self.sector_count
    }

    fn read_sector(&mut self, index: u64) -> Result<RawSector, DiscError> {
        if index >= self.sector_count {
            return Err(DiscError::SectorOutOfRange {
                sector: index,
                count: self.sector_count,
            });
        }

        let size = self.layout.raw_size();
        self.reader.seek(SeekFrom::Start(index * size as u64))?;
        let mut data = vec![0u8; size];
        let mut filled = 0;
        while filled < size {
            match self.reader.read(&mut data[filled..])? {
                0 => return Err(DiscError::truncated(index, size, filled)),
                n => filled += n,
            }
        }
        RawSector::new(index, self.layout, data)
    }

    fn layout(&self) -> SectorLayout {
        self.layout
    }
}

#[cfg(test)]
#[path = "tests/image_tests.rs"]
mod tests;
