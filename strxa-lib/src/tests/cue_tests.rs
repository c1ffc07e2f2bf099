use super::*;

#[test]
fn test_single_track() {
    let cue = "FILE \"game.bin\" BINARY\n  TRACK 01 MODE2/2352\n    INDEX 01 00:00:00\n";
    let sheet = parse_cue(cue).unwrap();
    assert_eq!(sheet.files.len(), 1);
    assert_eq!(sheet.files[0].filename, "game.bin");
    assert_eq!(sheet.files[0].file_type, "BINARY");
    assert_eq!(sheet.files[0].tracks[0].number, 1);
    assert_eq!(sheet.files[0].tracks[0].mode, "MODE2/2352");
}

#[test]
fn test_data_file_skips_audio_tracks() {
    let cue = r#"FILE "intro (Track 1).bin" BINARY
  TRACK 01 AUDIO
    INDEX 01 00:00:00
FILE "game (Track 2).bin" BINARY
  TRACK 02 MODE2/2352
    INDEX 01 00:00:00
"#;
    let sheet = parse_cue(cue).unwrap();
    assert_eq!(sheet.files.len(), 2);
    assert_eq!(sheet.data_file().unwrap().filename, "game (Track 2).bin");

    let resolved = sheet
        .resolve_data_file(Path::new("/discs/game.cue"))
        .unwrap();
    assert_eq!(resolved, PathBuf::from("/discs/game (Track 2).bin"));
}

#[test]
fn test_unquoted_filename() {
    let sheet = parse_cue("FILE game.bin BINARY\nTRACK 1 MODE1/2048\n").unwrap();
    assert_eq!(sheet.files[0].filename, "game.bin");
    assert!(sheet.files[0].tracks[0].is_data());
}

#[test]
fn test_errors() {
    assert!(parse_cue("REM nothing here\n").is_err());
    assert!(parse_cue("FILE \"broken.bin BINARY\n").is_err());
    assert!(parse_cue("FILE \"a.bin\" BINARY\nTRACK xx MODE2/2352\n").is_err());

    let audio_only = parse_cue("FILE \"a.bin\" BINARY\nTRACK 01 AUDIO\n").unwrap();
    assert!(audio_only.resolve_data_file(Path::new("a.cue")).is_err());
}

#[test]
fn test_looks_like_cue() {
    assert!(looks_like_cue(b"FILE \"game.bin\" BINARY\r\n  TRACK 01 MODE2/2352\r\n"));
    assert!(!looks_like_cue(b"\x00\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\x00"));
    assert!(!looks_like_cue(b"just some text"));
    assert!(!looks_like_cue(b""));
}
