//! Typed view over one raw CD sector.
//!
//! A [`RawSector`] carries the sector's bytes as read from the image plus the
//! fields derived from its XA subheader (file, channel, submode, coding info)
//! when the image layout stores one.

use bitflags::bitflags;

use crate::DiscError;

/// User data bytes in a Mode 2 Form 1 sector (and every ISO sector).
pub const FORM1_DATA_SIZE: usize = 2048;

/// User data bytes in a Mode 2 Form 2 sector.
pub const FORM2_DATA_SIZE: usize = 2324;

/// Number of XA interleave channels addressable by the subheader.
pub const XA_CHANNEL_COUNT: u8 = 32;

/// How sectors are laid out in an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorLayout {
    /// User data only (`.iso`). No subheader.
    Iso2048,
    /// Mode 2 sector without sync and header: subheader + data + EDC/ECC.
    Mode2_2336,
    /// Full raw sector: sync + header + subheader + data + EDC/ECC.
    Raw2352,
    /// Raw sector followed by 96 bytes of subchannel data.
    Raw2448,
}

impl SectorLayout {
    /// Size of one sector in the image file.
    pub fn raw_size(&self) -> usize {
        match self {
            Self::Iso2048 => 2048,
            Self::Mode2_2336 => 2336,
            Self::Raw2352 => 2352,
            Self::Raw2448 => 2448,
        }
    }

    /// Offset of the 8-byte XA subheader, if the layout stores one.
    pub fn subheader_offset(&self) -> Option<usize> {
        match self {
            Self::Iso2048 => None,
            Self::Mode2_2336 => Some(0),
            Self::Raw2352 | Self::Raw2448 => Some(16),
        }
    }

    /// Offset of the first user data byte.
    pub fn data_offset(&self) -> usize {
        match self {
            Self::Iso2048 => 0,
            Self::Mode2_2336 => 8,
            Self::Raw2352 | Self::Raw2448 => 24,
        }
    }

    pub fn has_header(&self) -> bool {
        self.subheader_offset().is_some()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Iso2048 => "ISO (2048)",
            Self::Mode2_2336 => "Mode 2 (2336)",
            Self::Raw2352 => "Raw BIN (2352)",
            Self::Raw2448 => "Raw BIN + subchannel (2448)",
        }
    }
}

bitflags! {
    /// XA subheader submode byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Submode: u8 {
        const END_OF_RECORD = 0x01;
        const VIDEO = 0x02;
        const AUDIO = 0x04;
        const DATA = 0x08;
        const TRIGGER = 0x10;
        const FORM2 = 0x20;
        const REAL_TIME = 0x40;
        const END_OF_FILE = 0x80;
    }
}

/// XA subheader coding information byte.
///
/// Only meaningful for Form 2 audio sectors. Each accessor returns `None` for
/// the reserved code values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodingInfo(pub u8);

impl CodingInfo {
    /// Sample rate in Hz (bits 2-3).
    pub fn sample_rate(&self) -> Option<u32> {
        match (self.0 >> 2) & 0x3 {
            0 => Some(37800),
            1 => Some(18900),
            _ => None,
        }
    }

    /// ADPCM bits per sample (bits 4-5).
    pub fn bits_per_sample(&self) -> Option<u8> {
        match (self.0 >> 4) & 0x3 {
            0 => Some(4),
            1 => Some(8),
            _ => None,
        }
    }

    /// Output channel count (bits 0-1).
    pub fn channels(&self) -> Option<u8> {
        match self.0 & 0x3 {
            0 => Some(1),
            1 => Some(2),
            _ => None,
        }
    }

    /// Emphasis flag (bit 6).
    pub fn emphasis(&self) -> bool {
        self.0 & 0x40 != 0
    }
}

/// Decoded XA subheader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubHeader {
    pub file: u8,
    /// Interleave channel, masked to 0-31.
    pub channel: u8,
    pub submode: Submode,
    pub coding: CodingInfo,
}

impl SubHeader {
    fn parse(bytes: &[u8]) -> Self {
        Self {
            file: bytes[0],
            channel: bytes[1] & (XA_CHANNEL_COUNT - 1),
            submode: Submode::from_bits_retain(bytes[2]),
            coding: CodingInfo(bytes[3]),
        }
    }
}

/// One sector read from an image, immutable once constructed.
#[derive(Debug, Clone)]
pub struct RawSector {
    number: u64,
    layout: SectorLayout,
    bytes: Vec<u8>,
    header: Option<SubHeader>,
}

impl RawSector {
    /// Wrap the bytes of sector `number`.
    ///
    /// Fails with [`DiscError::Truncated`] if fewer than `layout.raw_size()`
    /// bytes are supplied. Extra bytes are dropped.
    pub fn new(number: u64, layout: SectorLayout, mut bytes: Vec<u8>) -> Result<Self, DiscError> {
        let size = layout.raw_size();
        if bytes.len() < size {
            return Err(DiscError::truncated(number, size, bytes.len()));
        }
        bytes.truncate(size);

        let header = layout
            .subheader_offset()
            .map(|off| SubHeader::parse(&bytes[off..off + 4]));

        Ok(Self {
            number,
            layout,
            bytes,
            header,
        })
    }

    /// Absolute sector index within the image.
    pub fn sector_number(&self) -> u64 {
        self.number
    }

    pub fn layout(&self) -> SectorLayout {
        self.layout
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn header(&self) -> Option<&SubHeader> {
        self.header.as_ref()
    }

    /// File number from the subheader (0 for headerless sectors).
    pub fn file(&self) -> u8 {
        self.header.map_or(0, |h| h.file)
    }

    /// Interleave channel from the subheader (0 for headerless sectors).
    pub fn channel(&self) -> u8 {
        self.header.map_or(0, |h| h.channel)
    }

    pub fn submode(&self) -> Option<Submode> {
        self.header.map(|h| h.submode)
    }

    pub fn coding_info(&self) -> Option<CodingInfo> {
        self.header.map(|h| h.coding)
    }

    pub fn is_form2(&self) -> bool {
        self.submode().is_some_and(|s| s.contains(Submode::FORM2))
    }

    /// The whole sector as stored in the image.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// User data: 2324 bytes for Form 2 sectors, 2048 otherwise.
    pub fn user_data(&self) -> &[u8] {
        let start = self.layout.data_offset();
        let len = if self.is_form2() {
            FORM2_DATA_SIZE
        } else {
            FORM1_DATA_SIZE
        };
        let end = (start + len).min(self.bytes.len());
        &self.bytes[start..end]
    }
}

#[cfg(test)]
#[path = "tests/sector_tests.rs"]
mod tests;
