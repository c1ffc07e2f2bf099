//! Whole-image scans and the on-disk index.

use std::io::{self, Read, Write};
use std::sync::mpsc::Sender;

use strxa_core::SectorSource;
use strxa_demux::{
    DiscItem, IndexParseError, SectorCursor, SegmentOptions, Segmenter, Step, format_index,
    parse_index,
};

use crate::error::StrxaError;
use crate::progress::ScanProgress;

/// Sectors between `Reading` progress updates.
const PROGRESS_INTERVAL: u64 = 256;

/// Sector range and segmentation tunables for a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// First sector to scan.
    pub start: Option<u64>,
    /// Last sector to scan, inclusive.
    pub end: Option<u64>,
    pub segment: SegmentOptions,
}

/// Scan a disc image for STR, XA and TIM items.
pub fn scan_image<S: SectorSource + ?Sized>(
    source: &mut S,
    options: &ScanOptions,
) -> Result<Vec<DiscItem>, StrxaError> {
    scan(source, options, None)
}

/// Scan a disc image, sending progress updates through `progress_tx`.
///
/// A closed channel does not stop the scan.
pub fn scan_image_with_progress<S: SectorSource + ?Sized>(
    source: &mut S,
    options: &ScanOptions,
    progress_tx: Sender<ScanProgress>,
) -> Result<Vec<DiscItem>, StrxaError> {
    scan(source, options, Some(&progress_tx))
}

fn scan<S: SectorSource + ?Sized>(
    source: &mut S,
    options: &ScanOptions,
    progress_tx: Option<&Sender<ScanProgress>>,
) -> Result<Vec<DiscItem>, StrxaError> {
    let send = |msg: ScanProgress| {
        if let Some(tx) = progress_tx {
            let _ = tx.send(msg);
        }
    };

    let start = options.start.unwrap_or(0);
    let end = options
        .end
        .map_or(u64::MAX, |end| end.saturating_add(1));
    let mut cursor = SectorCursor::bounded(source, start, end);
    let (start, end) = (cursor.start(), cursor.end());
    log::debug!("scanning sectors {}..{}", start, end);
    send(ScanProgress::Started { start, end });

    let segmenter = Segmenter::new(options.segment.clone());
    let mut items = Vec::new();
    let mut reported = start;
    loop {
        let step = segmenter.step(&mut cursor)?;
        let sector = cursor.position();
        if sector >= reported + PROGRESS_INTERVAL || matches!(step, Step::Item(_)) {
            send(ScanProgress::Reading { sector, start, end });
            reported = sector;
        }
        match step {
            Step::Item(item) => {
                send(ScanProgress::Found { item: item.clone() });
                items.push(item);
            }
            Step::Skipped => {}
            Step::End => break,
        }
    }

    log::debug!(
        "scan found {} items, read {} sectors",
        items.len(),
        cursor.sectors_read()
    );
    send(ScanProgress::Completed {
        items: items.len(),
        sectors_read: cursor.sectors_read(),
    });
    Ok(items)
}

/// Write an index: a `#` comment header, then one item per line.
pub fn write_index<W: Write>(
    items: &[DiscItem],
    source_name: Option<&str>,
    mut writer: W,
) -> io::Result<()> {
    writeln!(writer, "# strxa {}", env!("CARGO_PKG_VERSION"))?;
    if let Some(name) = source_name {
        writeln!(writer, "# source: {}", name)?;
    }
    writeln!(writer, "# items: {}", items.len())?;
    writer.write_all(format_index(items).as_bytes())?;
    writer.flush()
}

/// Read an index. Lines that fail to parse are logged and returned
/// alongside the items that did parse.
pub fn read_index<R: Read>(
    mut reader: R,
) -> Result<(Vec<DiscItem>, Vec<IndexParseError>), StrxaError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let (items, errors) = parse_index(&text);
    for error in &errors {
        log::warn!("index {}", error);
    }
    Ok((items, errors))
}

/// Pick the `index`-th item (0-based).
pub fn select_item(items: &[DiscItem], index: usize) -> Result<&DiscItem, StrxaError> {
    items.get(index).ok_or(StrxaError::ItemNotFound {
        index,
        count: items.len(),
    })
}
