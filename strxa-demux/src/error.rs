use thiserror::Error;

use strxa_core::DiscError;

/// Errors raised while decoding a committed disc item.
///
/// Structural mismatches during classification and segmentation are never
/// errors; they only shorten or reject candidate items.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The sector source failed
    #[error(transparent)]
    Disc(#[from] DiscError),

    /// A committed audio sector is shorter than its format requires
    #[error("Sector {sector} truncated: ADPCM needs {needed} bytes, got {actual}")]
    Truncated {
        sector: u64,
        needed: usize,
        actual: usize,
    },

    /// The requested item carries no decodable audio
    #[error("No audio: {0}")]
    NoAudio(String),
}

impl DecodeError {
    pub fn no_audio(msg: impl Into<String>) -> Self {
        Self::NoAudio(msg.into())
    }
}

/// Why one line of a textual index could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexParseErrorKind {
    #[error("unknown item tag '{0}'")]
    UnknownTag(String),

    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: &'static str, actual: usize },

    #[error("invalid range '{0}'")]
    InvalidRange(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("channel {0} is out of range (0-31)")]
    InvalidChannel(u8),
}

/// A failure to parse one index line. Carries the 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct IndexParseError {
    pub line: usize,
    pub kind: IndexParseErrorKind,
}
