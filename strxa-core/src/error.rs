use thiserror::Error;

/// Errors raised while reading sectors from a disc image.
#[derive(Debug, Error)]
pub enum DiscError {
    /// I/O error while reading the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image layout is not recognized
    #[error("Invalid image format: {0}")]
    InvalidFormat(String),

    /// The image is too small to contain a single sector
    #[error("Image too small: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: u64, actual: u64 },

    /// A sector index past the end of the image was requested
    #[error("Sector {sector} is out of range (image has {count} sectors)")]
    SectorOutOfRange { sector: u64, count: u64 },

    /// The source returned fewer bytes than a committed read requires
    #[error("Sector {sector} truncated: needed {needed} bytes, got {actual}")]
    Truncated {
        sector: u64,
        needed: usize,
        actual: usize,
    },

    /// Unsupported image variant (e.g. a CHD that is not a CD image)
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl DiscError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedVariant(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub fn truncated(sector: u64, needed: usize, actual: usize) -> Self {
        Self::Truncated {
            sector,
            needed,
            actual,
        }
    }
}
