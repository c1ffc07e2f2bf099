use super::*;
use crate::test_fixtures::*;

fn accepting_trials(sector: &RawSector) -> Vec<&'static str> {
    TRIALS
        .iter()
        .filter(|(_, trial)| trial(sector).is_some())
        .map(|(name, _)| *name)
        .collect()
}

#[test]
fn test_null_sector() {
    assert_eq!(classify(&null_sector(0)), SectorKind::Null);
}

#[test]
fn test_headerless_zero_sector_is_not_null() {
    assert_eq!(classify(&iso_sector(0, &[])), SectorKind::Unknown);
}

#[test]
fn test_frame_chunk_fields() {
    let kind = classify(&frame_sector(0, 42, 320, 240));
    let SectorKind::FrameChunk(chunk) = kind else {
        panic!("expected FrameChunk, got {:?}", kind);
    };
    assert_eq!(chunk.frame_number, 42);
    assert_eq!(chunk.width, 320);
    assert_eq!(chunk.height, 240);
    assert_eq!(chunk.chunks_in_frame, 1);
    assert_eq!(chunk.quantization_scale, 4);
    assert_eq!(chunk.version, 2);
    assert_eq!(chunk.marker, FRAME_CHUNK_MARKER);
}

#[test]
fn test_frame_chunk_bad_magic() {
    let mut data = frame_chunk_data(1, 0, 1, 320, 240);
    data[0] = 0x61;
    let sector = raw_sector(0, 1, SM_VIDEO, 0, &data);
    assert_eq!(classify(&sector), SectorKind::Unknown);
}

#[test]
fn test_frame_chunk_overflow_frame_number() {
    let sector = frame_sector(0, u32::MAX, 320, 240);
    assert_eq!(classify(&sector), SectorKind::Unknown);
}

#[test]
fn test_frame_chunk_without_marker_accepted() {
    let mut data = frame_chunk_data(3, 0, 1, 320, 240);
    data[20..24].fill(0);
    let sector = raw_sector(0, 1, SM_VIDEO, 0, &data);
    assert!(matches!(classify(&sector), SectorKind::FrameChunk(c) if c.marker == 0));
}

#[test]
fn test_frame_chunk_requires_video_or_data_submode() {
    let data = frame_chunk_data(1, 0, 1, 320, 240);
    let sector = raw_sector(0, 1, 0x40, 0, &data);
    assert_eq!(classify(&sector), SectorKind::Unknown);
    let sector = raw_sector(0, 1, 0x02, 0, &data);
    assert!(matches!(classify(&sector), SectorKind::FrameChunk(_)));
}

#[test]
fn test_frame_chunk_in_headerless_sector() {
    let sector = iso_sector(0, &frame_chunk_data(9, 0, 1, 256, 240));
    assert!(matches!(classify(&sector), SectorKind::FrameChunk(c) if c.frame_number == 9));
}

#[test]
fn test_audio_chunk_formats() {
    let cases = [
        (4, 37800, 1),
        (4, 37800, 2),
        (4, 18900, 1),
        (8, 18900, 2),
    ];
    for (bits, rate, channels) in cases {
        let sector = audio_sector(0, 3, coding(bits, rate, channels), 0);
        let SectorKind::AudioChunk(chunk) = classify(&sector) else {
            panic!("expected audio for {:?}", (bits, rate, channels));
        };
        assert_eq!(chunk.channel, 3);
        assert_eq!(chunk.bits_per_sample, bits);
        assert_eq!(chunk.sample_rate, rate);
        assert_eq!(chunk.channels, channels);
    }
}

#[test]
fn test_audio_chunk_reserved_coding_rejected() {
    for bad in [0x02, 0x08, 0x20] {
        let sector = audio_sector(0, 0, bad, 0);
        assert_eq!(classify(&sector), SectorKind::Unknown, "coding {:#x}", bad);
    }
}

#[test]
fn test_audio_chunk_requires_form2() {
    let sector = raw_sector(0, 0, 0x44, 0, &[0; 2048]);
    assert_eq!(classify(&sector), SectorKind::Unknown);
}

#[test]
fn test_samples_per_channel() {
    let mono4 = AudioChunk {
        file: 1,
        channel: 0,
        sample_rate: 37800,
        bits_per_sample: 4,
        channels: 1,
    };
    assert_eq!(mono4.samples_per_channel(), 4032);
    let stereo4 = AudioChunk { channels: 2, ..mono4 };
    assert_eq!(stereo4.samples_per_channel(), 2016);
    let stereo8 = AudioChunk {
        bits_per_sample: 8,
        ..stereo4
    };
    assert_eq!(stereo8.samples_per_channel(), 1008);
}

#[test]
fn test_ff8_chunks() {
    let video = classify(&ff8_sector(0, b'J', 3, 10, 77));
    assert_eq!(
        video,
        SectorKind::Ff8FrameChunk(Ff8FrameChunk {
            sector_in_group: 3,
            sectors_per_group: 10,
            frame_number: 77,
        })
    );
    let left = classify(&ff8_sector(0, b'N', 0, 10, 77));
    assert!(matches!(left, SectorKind::Ff8AudioChunk(c) if c.side == Ff8Side::Left));
    let right = classify(&ff8_sector(0, b'R', 1, 10, 77));
    assert!(matches!(right, SectorKind::Ff8AudioChunk(c) if c.side == Ff8Side::Right));
}

#[test]
fn test_ff8_zero_group_size_rejected() {
    assert_eq!(classify(&ff8_sector(0, b'J', 0, 0, 1)), SectorKind::Unknown);
    assert_eq!(classify(&ff8_sector(0, b'X', 0, 10, 1)), SectorKind::Unknown);
}

fn audio_2048_data(params: [u8; 16]) -> Vec<u8> {
    let mut data = vec![0u8; 2048];
    for window in data.chunks_exact_mut(128) {
        window[..16].copy_from_slice(&params);
        window[16..].fill(0x5A);
    }
    data
}

#[test]
fn test_audio_2048_four_bit() {
    let params = [1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8, 5, 6, 7, 8];
    let sector = iso_sector(0, &audio_2048_data(params));
    assert_eq!(
        classify(&sector),
        SectorKind::Audio2048(Audio2048 { bits_per_sample: 4 })
    );
}

#[test]
fn test_audio_2048_eight_bit() {
    let params = [0x12, 3, 4, 5, 0x12, 3, 4, 5, 0x12, 3, 4, 5, 0x12, 3, 4, 5];
    let sector = iso_sector(0, &audio_2048_data(params));
    assert_eq!(
        classify(&sector),
        SectorKind::Audio2048(Audio2048 { bits_per_sample: 8 })
    );
}

#[test]
fn test_audio_2048_rejects_inconsistent_pattern() {
    let params = [1, 2, 3, 4, 1, 2, 3, 9, 5, 6, 7, 8, 5, 6, 7, 8];
    let sector = iso_sector(0, &audio_2048_data(params));
    assert_eq!(classify(&sector), SectorKind::Unknown);
}

#[test]
fn test_audio_2048_rejects_zero_window() {
    let params = [1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8, 5, 6, 7, 8];
    let mut data = audio_2048_data(params);
    data[128 * 5..128 * 5 + 16].fill(0);
    let sector = iso_sector(0, &data);
    assert_eq!(classify(&sector), SectorKind::Unknown);
}

#[test]
fn test_audio_2048_needs_headerless_sector() {
    let params = [1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8, 5, 6, 7, 8];
    let sector = raw_sector(0, 0, SM_DATA, 0, &audio_2048_data(params));
    assert_eq!(classify(&sector), SectorKind::Unknown);
}

#[test]
fn test_classify_is_repeatable() {
    let sectors = [
        null_sector(0),
        frame_sector(1, 5, 320, 240),
        audio_sector(2, 0, coding(4, 37800, 2), 0x11),
        ff8_sector(3, b'J', 2, 10, 1),
        iso_sector(4, &[0x10, 0, 0, 0]),
    ];
    for sector in &sectors {
        assert_eq!(classify(sector), classify(sector));
    }
}

#[test]
fn test_trials_are_mutually_exclusive() {
    let params = [1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8, 5, 6, 7, 8];
    let sectors = [
        null_sector(0),
        frame_sector(0, 5, 320, 240),
        iso_sector(0, &frame_chunk_data(5, 0, 1, 320, 240)),
        audio_sector(0, 0, coding(4, 37800, 2), 0x11),
        ff8_sector(0, b'J', 2, 10, 1),
        ff8_sector(0, b'N', 0, 10, 1),
        iso_sector(0, &audio_2048_data(params)),
        raw_sector(0, 0, 0x66, 0, &frame_chunk_data(5, 0, 1, 320, 240)),
    ];
    for sector in &sectors {
        let accepted = accepting_trials(sector);
        assert!(accepted.len() <= 1, "accepted by {:?}", accepted);
    }
}
