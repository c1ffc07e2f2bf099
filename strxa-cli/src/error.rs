use thiserror::Error;

use strxa_demux::DecodeError;
use strxa_lib::StrxaError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Opening, scanning or exporting failed
    #[error("{0}")]
    Library(#[from] StrxaError),

    /// The item could not be decoded as audio
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
