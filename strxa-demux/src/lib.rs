//! Demultiplexing of PlayStation STR, XA and TIM media from disc sectors.
//!
//! The pipeline runs in three stages:
//! - [`classify`] decides what each sector structurally is
//! - [`Segmenter`] walks a [`SectorCursor`] and groups sectors into
//!   [`DiscItem`]s
//! - [`open_audio`] turns an item back into a lazily decoded PCM stream
//!
//! Items round-trip through a one-line-per-item text index ([`parse_index`]).

pub mod adpcm;
pub mod audio;
pub mod classify;
pub mod cursor;
pub mod error;
pub mod index;
pub mod item;
pub mod segment;

pub use adpcm::{FilterContext, PerChannelSamples, XaDecoder, decode_xa_sector};
pub use audio::{AudioFormat, AudioStream, open_audio};
pub use classify::{SectorKind, classify};
pub use cursor::{ClassifiedSector, CursorMark, SectorCursor};
pub use error::{DecodeError, IndexParseError, IndexParseErrorKind};
pub use index::{format_index, parse_index};
pub use item::DiscItem;
pub use segment::{SegmentOptions, Segmenter, Step, segment};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod test_fixtures;
