//! Textual index of disc items, one item per line:
//!
//! ```text
//! STR:<start>-<end>:<startFrame>-<endFrame>[:<audioSamples>]
//! XA:<start>-<end>:<chan>,<chan>,...
//! TIM:<start>-<end>:<startByteOffset>
//! ```
//!
//! Lines starting with `#` and blank lines are ignored. The audio sample
//! count of a STR item is only written when nonzero.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use strxa_core::XA_CHANNEL_COUNT;

use crate::error::{IndexParseError, IndexParseErrorKind};
use crate::item::DiscItem;

impl fmt::Display for DiscItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str {
                start_sector,
                end_sector,
                start_frame,
                end_frame,
                audio_samples,
            } => {
                write!(
                    f,
                    "STR:{}-{}:{}-{}",
                    start_sector, end_sector, start_frame, end_frame
                )?;
                if *audio_samples > 0 {
                    write!(f, ":{}", audio_samples)?;
                }
                Ok(())
            }
            Self::Xa {
                start_sector,
                end_sector,
                channels,
            } => {
                let channels: Vec<String> = channels.iter().map(u8::to_string).collect();
                write!(
                    f,
                    "XA:{}-{}:{}",
                    start_sector,
                    end_sector,
                    channels.join(",")
                )
            }
            Self::Tim {
                start_sector,
                end_sector,
                start_offset,
            } => write!(f, "TIM:{}-{}:{}", start_sector, end_sector, start_offset),
        }
    }
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, IndexParseErrorKind> {
    s.trim()
        .parse()
        .map_err(|_| IndexParseErrorKind::InvalidNumber(s.to_string()))
}

/// Parse `a-b` with `a <= b`.
fn parse_range<T: FromStr + PartialOrd>(s: &str) -> Result<(T, T), IndexParseErrorKind> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| IndexParseErrorKind::InvalidRange(s.to_string()))?;
    let start: T = parse_number(start)?;
    let end: T = parse_number(end)?;
    if start > end {
        return Err(IndexParseErrorKind::InvalidRange(s.to_string()));
    }
    Ok((start, end))
}

fn parse_channels(s: &str) -> Result<BTreeSet<u8>, IndexParseErrorKind> {
    if s.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    s.split(',')
        .map(|c| {
            let channel: u8 = parse_number(c)?;
            if channel >= XA_CHANNEL_COUNT {
                return Err(IndexParseErrorKind::InvalidChannel(channel));
            }
            Ok(channel)
        })
        .collect()
}

impl FromStr for DiscItem {
    type Err = IndexParseErrorKind;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim().split(':').collect();
        let tag = fields[0].trim();

        let expect = |expected: &'static str, ok: bool| {
            if ok {
                Ok(())
            } else {
                Err(IndexParseErrorKind::FieldCount {
                    expected,
                    actual: fields.len(),
                })
            }
        };

        match tag {
            "STR" => {
                expect("3 or 4", fields.len() == 3 || fields.len() == 4)?;
                let (start_sector, end_sector) = parse_range(fields[1])?;
                let (start_frame, end_frame) = parse_range(fields[2])?;
                let audio_samples = match fields.get(3) {
                    Some(samples) => parse_number(samples)?,
                    None => 0,
                };
                Ok(Self::Str {
                    start_sector,
                    end_sector,
                    start_frame,
                    end_frame,
                    audio_samples,
                })
            }
            "XA" => {
                expect("3", fields.len() == 3)?;
                let (start_sector, end_sector) = parse_range(fields[1])?;
                Ok(Self::Xa {
                    start_sector,
                    end_sector,
                    channels: parse_channels(fields[2])?,
                })
            }
            "TIM" => {
                expect("3", fields.len() == 3)?;
                let (start_sector, end_sector) = parse_range(fields[1])?;
                Ok(Self::Tim {
                    start_sector,
                    end_sector,
                    start_offset: parse_number(fields[2])?,
                })
            }
            other => Err(IndexParseErrorKind::UnknownTag(other.to_string())),
        }
    }
}

/// Parse a whole index. Bad lines are collected rather than ending the parse.
pub fn parse_index(text: &str) -> (Vec<DiscItem>, Vec<IndexParseError>) {
    let mut items = Vec::new();
    let mut errors = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<DiscItem>() {
            Ok(item) => items.push(item),
            Err(kind) => errors.push(IndexParseError { line: i + 1, kind }),
        }
    }

    (items, errors)
}

/// Serialize items one per line.
pub fn format_index(items: &[DiscItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "tests/index_tests.rs"]
mod tests;
