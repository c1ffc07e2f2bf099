//! Core types shared by the strxa crates.
//!
//! - [`RawSector`]: one sector's bytes plus its XA subheader fields
//! - [`SectorSource`]: random-access sector reader over a disc image
//! - [`FlatImage`] and [`ChdImage`]: the image formats read from disk

pub mod chd;
pub mod error;
pub mod image;
pub mod sector;
pub mod util;

pub use chd::ChdImage;
pub use error::DiscError;
pub use image::FlatImage;
pub use sector::{
    CodingInfo, FORM1_DATA_SIZE, FORM2_DATA_SIZE, RawSector, SectorLayout, SubHeader, Submode,
    XA_CHANNEL_COUNT,
};

/// Random-access reader of sectors from a disc image.
///
/// Implementors own the underlying file handle; sector cursors borrow the
/// source for the duration of a pass.
pub trait SectorSource {
    /// Number of whole sectors in the image.
    fn sector_count(&self) -> u64;

    /// Read the sector at absolute index `index`.
    fn read_sector(&mut self, index: u64) -> Result<RawSector, DiscError>;

    /// How sectors are stored in the image.
    fn layout(&self) -> SectorLayout;

    /// Whether sectors carry an XA subheader (false only for 2048-byte images).
    fn has_sector_header(&self) -> bool {
        self.layout().has_header()
    }

    /// Bytes per sector as stored in the image.
    fn raw_sector_size(&self) -> usize {
        self.layout().raw_size()
    }
}

impl<S: SectorSource + ?Sized> SectorSource for &mut S {
    fn sector_count(&self) -> u64 {
        (**self).sector_count()
    }

    fn read_sector(&mut self, index: u64) -> Result<RawSector, DiscError> {
        (**self).read_sector(index)
    }

    fn layout(&self) -> SectorLayout {
        (**self).layout()
    }
}

impl<S: SectorSource + ?Sized> SectorSource for Box<S> {
    fn sector_count(&self) -> u64 {
        (**self).sector_count()
    }

    fn read_sector(&mut self, index: u64) -> Result<RawSector, DiscError> {
        (**self).read_sector(index)
    }

    fn layout(&self) -> SectorLayout {
        (**self).layout()
    }
}
