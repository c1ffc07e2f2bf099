//! Disc items: contiguous sector ranges recognized as one media stream.

use std::collections::BTreeSet;

/// One media stream found on the disc.
///
/// Sector ranges are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscItem {
    /// Video frames, possibly with interleaved audio.
    Str {
        start_sector: u64,
        end_sector: u64,
        start_frame: u32,
        end_frame: u32,
        /// Audio samples per channel carried by the item (0 if silent).
        audio_samples: u64,
    },
    /// Interleaved XA audio.
    Xa {
        start_sector: u64,
        end_sector: u64,
        /// Channels that carried non-silent audio.
        channels: BTreeSet<u8>,
    },
    /// A TIM still image.
    Tim {
        start_sector: u64,
        end_sector: u64,
        /// Byte offset into the start sector's user data.
        start_offset: u32,
    },
}

impl DiscItem {
    pub fn start_sector(&self) -> u64 {
        match self {
            Self::Str { start_sector, .. }
            | Self::Xa { start_sector, .. }
            | Self::Tim { start_sector, .. } => *start_sector,
        }
    }

    pub fn end_sector(&self) -> u64 {
        match self {
            Self::Str { end_sector, .. }
            | Self::Xa { end_sector, .. }
            | Self::Tim { end_sector, .. } => *end_sector,
        }
    }

    pub fn sector_count(&self) -> u64 {
        self.end_sector() - self.start_sector() + 1
    }

    /// Tag used in the textual index.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Str { .. } => "STR",
            Self::Xa { .. } => "XA",
            Self::Tim { .. } => "TIM",
        }
    }

    /// Whether [`open_audio`](crate::audio::open_audio) can decode this item.
    pub fn has_audio(&self) -> bool {
        match self {
            Self::Str { audio_samples, .. } => *audio_samples > 0,
            Self::Xa { channels, .. } => !channels.is_empty(),
            Self::Tim { .. } => false,
        }
    }

    /// Whether two items share any sector.
    pub fn overlaps(&self, other: &DiscItem) -> bool {
        self.start_sector() <= other.end_sector() && other.start_sector() <= self.end_sector()
    }
}
