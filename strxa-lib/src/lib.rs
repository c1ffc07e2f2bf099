//! Shared application layer for strxa frontends.
//!
//! Provides the pieces a frontend needs on top of the decoder:
//! - [`settings`]: the user settings file
//! - [`open_image`]: open a BIN/ISO, CHD or CUE by path
//! - [`scan_image`]: segment a whole image, with progress updates
//! - [`export_wav`]: decode an item's audio to a WAV file

pub mod cue;
pub mod error;
pub mod export;
pub mod open;
pub mod progress;
pub mod scan;
pub mod settings;

pub use error::StrxaError;
pub use export::{export_wav, write_wav};
pub use open::{ImageFormat, detect_format, open_image};
pub use progress::ScanProgress;
pub use scan::{
    ScanOptions, read_index, scan_image, scan_image_with_progress, select_item, write_index,
};
pub use settings::{Settings, load_settings, save_settings, settings_path};
