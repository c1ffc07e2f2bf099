use std::fs;

use strxa_lib::settings::{Settings, load_settings_from, save_settings_to};
use tempfile::TempDir;

#[test]
fn missing_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let settings = load_settings_from(&tmp.path().join("settings.toml"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn save_then_load() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("strxa").join("settings.toml");

    let mut settings = Settings::default();
    settings.audio.volume = 0.75;
    settings.scan.min_str_frames = 12;
    settings.scan.tim = false;
    save_settings_to(&settings, &path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(load_settings_from(&path), settings);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[scan]"));
    assert!(text.contains("min_str_frames = 12"));
}

#[test]
fn corrupt_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    fs::write(&path, "[scan\nmin_str_frames = ").unwrap();
    assert_eq!(load_settings_from(&path), Settings::default());
}
