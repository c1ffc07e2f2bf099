//! Opening disc images by path.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use strxa_core::chd::CHD_MAGIC;
use strxa_core::{ChdImage, FlatImage, SectorSource};

use crate::cue::{looks_like_cue, parse_cue};
use crate::error::StrxaError;

/// Container format of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Sectors stored back to back (ISO, BIN, 2336 or 2448-byte images).
    Flat,
    /// MAME compressed hunks.
    Chd,
    /// A CUE sheet pointing at a BIN file.
    Cue,
}

impl ImageFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "Raw image",
            Self::Chd => "CHD",
            Self::Cue => "CUE sheet",
        }
    }
}

/// Sniff a file's container format from its first bytes.
pub fn detect_format(path: &Path) -> Result<ImageFormat, StrxaError> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; 512];
    let mut n = 0;
    while n < buf.len() {
        let read = file.read(&mut buf[n..])?;
        if read == 0 {
            break;
        }
        n += read;
    }
    let head = &buf[..n];

    if head.starts_with(CHD_MAGIC) {
        Ok(ImageFormat::Chd)
    } else if looks_like_cue(head) {
        Ok(ImageFormat::Cue)
    } else {
        Ok(ImageFormat::Flat)
    }
}

/// Follow a CUE sheet to the file holding its data track.
pub fn resolve_image_path(path: &Path) -> Result<(PathBuf, ImageFormat), StrxaError> {
    match detect_format(path)? {
        ImageFormat::Cue => {
            let sheet = parse_cue(&std::fs::read_to_string(path)?)?;
            let bin = sheet.resolve_data_file(path)?;
            log::debug!("{} -> {}", path.display(), bin.display());
            match detect_format(&bin)? {
                ImageFormat::Cue => Err(StrxaError::invalid_cue(format!(
                    "{} points at another CUE sheet",
                    path.display()
                ))),
                format => Ok((bin, format)),
            }
        }
        format => Ok((path.to_path_buf(), format)),
    }
}

/// Open a disc image: a flat image, a CHD, or a CUE sheet.
pub fn open_image(path: &Path) -> Result<Box<dyn SectorSource>, StrxaError> {
    let (path, format) = resolve_image_path(path)?;
    let reader = BufReader::new(File::open(&path)?);

    let source: Box<dyn SectorSource> = match format {
        ImageFormat::Chd => Box::new(ChdImage::open(reader)?),
        _ => Box::new(FlatImage::open(reader)?),
    };
    log::debug!(
        "opened {}: {} sectors, {}",
        path.display(),
        source.sector_count(),
        source.layout().name()
    );
    Ok(source)
}
