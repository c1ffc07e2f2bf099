//! CUE sheet parsing.
//!
//! Only FILE and TRACK lines matter here: the sheet is used to find the BIN
//! file holding the disc's data track.

use std::path::{Path, PathBuf};

use crate::error::StrxaError;

/// A parsed CUE sheet.
#[derive(Debug, Clone)]
pub struct CueSheet {
    pub files: Vec<CueFile>,
}

/// A FILE entry in a CUE sheet.
#[derive(Debug, Clone)]
pub struct CueFile {
    pub filename: String,
    pub file_type: String,
    pub tracks: Vec<CueTrack>,
}

/// A TRACK entry in a CUE sheet.
#[derive(Debug, Clone)]
pub struct CueTrack {
    pub number: u8,
    pub mode: String,
}

impl CueTrack {
    pub fn is_data(&self) -> bool {
        self.mode.to_uppercase().starts_with("MODE")
    }
}

impl CueSheet {
    /// The first FILE holding a data track.
    pub fn data_file(&self) -> Option<&CueFile> {
        self.files
            .iter()
            .find(|f| f.tracks.iter().any(CueTrack::is_data))
    }

    /// Path of the data track's file, relative to the sheet's directory.
    pub fn resolve_data_file(&self, cue_path: &Path) -> Result<PathBuf, StrxaError> {
        let file = self
            .data_file()
            .ok_or_else(|| StrxaError::invalid_cue("no data track"))?;
        let dir = cue_path.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(&file.filename))
    }
}

/// Whether `buf` (the start of a file) looks like a CUE sheet.
pub fn looks_like_cue(buf: &[u8]) -> bool {
    if buf.is_empty() {
        return false;
    }
    // CUE files are text; check for non-text bytes (ignoring common whitespace)
    let has_binary = buf
        .iter()
        .any(|&b| b < 0x09 || (b > 0x0D && b < 0x20 && b != 0x1A));
    if has_binary {
        return false;
    }
    let text = String::from_utf8_lossy(buf).to_uppercase();
    text.contains("FILE ") && text.contains("TRACK ")
}

/// Parse a CUE sheet from its text content.
pub fn parse_cue(content: &str) -> Result<CueSheet, StrxaError> {
    let mut files = Vec::new();
    let mut current_file: Option<CueFile> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let upper = line.to_uppercase();

        if upper.starts_with("FILE ") {
            if let Some(f) = current_file.take() {
                files.push(f);
            }
            let (filename, file_type) = parse_file_line(line)?;
            current_file = Some(CueFile {
                filename,
                file_type,
                tracks: Vec::new(),
            });
        } else if upper.starts_with("TRACK ")
            && let Some(ref mut f) = current_file
        {
            let (number, mode) = parse_track_line(line)?;
            f.tracks.push(CueTrack { number, mode });
        }
        // INDEX, PREGAP, REM and friends carry nothing we need
    }

    if let Some(f) = current_file.take() {
        files.push(f);
    }
    if files.is_empty() {
        return Err(StrxaError::invalid_cue("no FILE entries"));
    }
    Ok(CueSheet { files })
}

/// `FILE "name.bin" BINARY` or `FILE name.bin BINARY`
fn parse_file_line(line: &str) -> Result<(String, String), StrxaError> {
    let rest = &line[5..];

    if let Some(after_quote) = rest.strip_prefix('"') {
        let end_quote = after_quote
            .find('"')
            .ok_or_else(|| StrxaError::invalid_cue("unterminated quote in FILE line"))?;
        Ok((
            after_quote[..end_quote].to_string(),
            after_quote[end_quote + 1..].trim().to_string(),
        ))
    } else {
        let (filename, file_type) = rest.split_once(' ').unwrap_or((rest, ""));
        Ok((filename.to_string(), file_type.trim().to_string()))
    }
}

/// `TRACK 01 MODE2/2352`
fn parse_track_line(line: &str) -> Result<(u8, String), StrxaError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(StrxaError::invalid_cue(format!("bad TRACK line '{}'", line)));
    }
    let number = parts[1]
        .parse()
        .map_err(|_| StrxaError::invalid_cue(format!("bad track number '{}'", parts[1])))?;
    Ok((number, parts[2].to_string()))
}

#[cfg(test)]
#[path = "tests/cue_tests.rs"]
mod tests;
