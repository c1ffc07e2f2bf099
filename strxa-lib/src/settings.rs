//! User settings stored in `~/.config/strxa/settings.toml`.
//!
//! Missing files and missing keys fall back to defaults, so a fresh install
//! needs no config at all.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strxa_demux::SegmentOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub scan: ScanSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Scale applied to decoded samples before clamping.
    #[serde(default = "default_volume")]
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    #[serde(default = "default_one")]
    pub min_str_frames: u32,
    #[serde(default = "default_one_u64")]
    pub min_xa_sectors: u64,
    #[serde(default = "default_true")]
    pub tim: bool,
}

fn default_volume() -> f64 {
    1.0
}

fn default_one() -> u32 {
    1
}

fn default_one_u64() -> u64 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            min_str_frames: default_one(),
            min_xa_sectors: default_one_u64(),
            tim: default_true(),
        }
    }
}

impl ScanSettings {
    pub fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            min_str_frames: self.min_str_frames,
            min_xa_sectors: self.min_xa_sectors,
            tim: self.tim,
        }
    }
}

/// Returns `~/.config/strxa/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("strxa").join("settings.toml")
}

/// Load settings from the default location.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings to the default location.
pub fn save_settings(settings: &Settings) -> io::Result<()> {
    save_settings_to(settings, &settings_path())
}

/// Save settings to `path` atomically (write to temp, then rename).
pub fn save_settings_to(settings: &Settings, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
