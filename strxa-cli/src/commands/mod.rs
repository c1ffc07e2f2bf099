pub(crate) mod audio;
pub(crate) mod config;
pub(crate) mod items;
pub(crate) mod scan;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use strxa_demux::DiscItem;

/// One index item as a single display line.
pub(crate) fn describe_item(number: usize, item: &DiscItem) -> String {
    let range = format!(
        "{}-{} ({} sectors)",
        item.start_sector(),
        item.end_sector(),
        item.sector_count()
    );
    let detail = match item {
        DiscItem::Str {
            start_frame,
            end_frame,
            audio_samples,
            ..
        } => {
            let audio = if *audio_samples > 0 {
                format!(", {} audio samples", audio_samples)
            } else {
                String::new()
            };
            format!("frames {}-{}{}", start_frame, end_frame, audio)
        }
        DiscItem::Xa { channels, .. } => {
            let list: Vec<String> = channels.iter().map(|c| c.to_string()).collect();
            format!("channels {}", list.join(","))
        }
        DiscItem::Tim { start_offset, .. } => format!("offset {}", start_offset),
    };

    format!(
        "  {}  {}  {}  {}",
        format!("{:>4}", number).if_supports_color(Stdout, |t| t.dimmed()),
        format!("{:<3}", item.tag()).if_supports_color(Stdout, |t| t.cyan()),
        range,
        detail,
    )
}
