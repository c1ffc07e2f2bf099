//! CHD (MAME Compressed Hunks of Data) CD image source.
//!
//! CD images in CHD store each frame as a raw 2352-byte sector followed by 96
//! bytes of subchannel data, packed into fixed-size hunks.

use std::io::{Read, Seek};

use crate::sector::{RawSector, SectorLayout};
use crate::{DiscError, SectorSource};

/// CHD file magic bytes.
pub const CHD_MAGIC: &[u8; 8] = b"MComprHD";

/// CD frame size within CHD: raw sector (2352) + subchannel (96).
const CHD_CD_FRAME_SIZE: u64 = 2448;

/// A CHD CD image. Keeps the most recently decompressed hunk cached, since
/// sequential sector reads mostly land in the same hunk.
pub struct ChdImage<R: Read + Seek> {
    chd: chd::Chd<R>,
    hunk_size: u64,
    sector_count: u64,
    cached_hunk: Option<u32>,
    hunk_buf: Vec<u8>,
    cmp_buf: Vec<u8>,
}

impl<R: Read + Seek> ChdImage<R> {
    pub fn open(reader: R) -> Result<Self, DiscError> {
        let chd = chd::Chd::open(reader, None)
            .map_err(|e| DiscError::other(format!("Failed to open CHD: {}", e)))?;

        let header = chd.header();
        let hunk_size = header.hunk_size() as u64;
        if hunk_size == 0 || hunk_size % CHD_CD_FRAME_SIZE != 0 {
            return Err(DiscError::unsupported(format!(
                "CHD hunk size {} is not a whole number of CD frames",
                hunk_size
            )));
        }
        let sector_count = header.logical_bytes() / CHD_CD_FRAME_SIZE;
        log::debug!(
            "CHD v{}: {} hunks of {} bytes, {} sectors",
            header.version() as u32,
            header.hunk_count(),
            hunk_size,
            sector_count
        );

        let hunk_buf = chd.get_hunksized_buffer();
        Ok(Self {
            chd,
            hunk_size,
            sector_count,
            cached_hunk: None,
            hunk_buf,
            cmp_buf: Vec::new(),
        })
    }

    fn load_hunk(&mut self, hunk_num: u32) -> Result<(), DiscError> {
        if self.cached_hunk == Some(hunk_num) {
            return Ok(());
        }
        self.cached_hunk = None;

        let mut hunk = self.chd.hunk(hunk_num).map_err(|e| {
            DiscError::other(format!("Failed to get CHD hunk {}: {}", hunk_num, e))
        })?;
        hunk.read_hunk_in(&mut self.cmp_buf, &mut self.hunk_buf)
            .map_err(|e| {
                DiscError::other(format!("Failed to decompress CHD hunk {}: {}", hunk_num, e))
            })?;

        self.cached_hunk = Some(hunk_num);
        Ok(())
    }
}

impl<R: Read + Seek> SectorSource for ChdImage<R> {
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

        let byte_offset = index * CHD_CD_FRAME_SIZE;
        let hunk_num = (byte_offset / self.hunk_size) as u32;
        let offset_in_hunk = (byte_offset % self.hunk_size) as usize;
        self.load_hunk(hunk_num)?;

        let end = offset_in_hunk + CHD_CD_FRAME_SIZE as usize;
        if end > self.hunk_buf.len() {
            return Err(DiscError::truncated(
                index,
                CHD_CD_FRAME_SIZE as usize,
                self.hunk_buf.len().saturating_sub(offset_in_hunk),
            ));
        }
        RawSector::new(
            index,
            SectorLayout::Raw2448,
            self.hunk_buf[offset_in_hunk..end].to_vec(),
        )
    }

    fn layout(&self) -> SectorLayout {
        SectorLayout::Raw2448
    }
}
