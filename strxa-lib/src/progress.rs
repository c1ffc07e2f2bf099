use strxa_demux::DiscItem;

/// Progress update sent during an image scan.
///
/// Sent over an MPSC channel so a frontend can draw a progress bar while the
/// scan runs.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// The scan has started over sectors `[start, end)`
    Started { start: u64, end: u64 },

    /// The cursor has reached `sector`
    Reading { sector: u64, start: u64, end: u64 },

    /// A disc item was found
    Found { item: DiscItem },

    /// The scan finished
    Completed { items: usize, sectors_read: u64 },
}

impl ScanProgress {
    /// Returns the progress fraction (0.0 to 1.0) if calculable.
    pub fn percentage(&self) -> Option<f64> {
        match self {
            Self::Reading { sector, start, end } if end > start => {
                Some((sector - start) as f64 / (end - start) as f64)
            }
            Self::Completed { .. } => Some(1.0),
            _ => None,
        }
    }
}
