use thiserror::Error;

use strxa_core::DiscError;
use strxa_demux::DecodeError;

/// Errors from the application layer: opening images, scanning, exporting.
#[derive(Debug, Error)]
pub enum StrxaError {
    /// I/O error on an image, index or output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The disc image could not be read
    #[error(transparent)]
    Disc(#[from] DiscError),

    /// Audio decoding failed after the item was opened
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The WAV writer failed
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// The CUE sheet is malformed or names no usable track
    #[error("Invalid CUE sheet: {0}")]
    InvalidCue(String),

    /// An item number outside the index
    #[error("Item {index} not found: index has {count} items")]
    ItemNotFound { index: usize, count: usize },
}

impl StrxaError {
    pub fn invalid_cue(msg: impl Into<String>) -> Self {
        Self::InvalidCue(msg.into())
    }
}
