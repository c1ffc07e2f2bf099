use super::*;
use crate::test_fixtures::adpcm_payload;

fn fresh(channels: usize) -> Vec<FilterContext> {
    vec![FilterContext::default(); channels]
}

#[test]
fn test_eight_bit_unsigned_max_clamps() {
    let payload = adpcm_payload([0x00; 16], 0x80);
    let (contexts, samples) = decode_xa_sector(&payload, 8, &fresh(1), 1.0).unwrap();
    assert_eq!(samples.channel_count(), 1);
    assert_eq!(samples.len(), 2016);
    assert!(samples.channels[0].iter().all(|&s| s == 32767));
    // History keeps the unclamped value
    assert_eq!(contexts[0].prev1, 32768.0);
}

#[test]
fn test_four_bit_stereo_alternates_units() {
    // Low nibble feeds even units (left), high nibble odd units (right)
    let payload = adpcm_payload([0x00; 16], 0x21);
    let (_, samples) = decode_xa_sector(&payload, 4, &fresh(2), 1.0).unwrap();
    assert_eq!(samples.channel_count(), 2);
    assert_eq!(samples.len(), 2016);
    assert!(samples.channels[0].iter().all(|&s| s == 4096));
    assert!(samples.channels[1].iter().all(|&s| s == 8192));

    let interleaved = samples.interleaved();
    assert_eq!(&interleaved[..4], &[4096, 8192, 4096, 8192]);
}

#[test]
fn test_four_bit_mono_length_and_sign() {
    let payload = adpcm_payload([0x00; 16], 0xFF);
    let (_, samples) = decode_xa_sector(&payload, 4, &fresh(1), 1.0).unwrap();
    assert_eq!(samples.len(), 4032);
    assert!(samples.channels[0].iter().all(|&s| s == -4096));
}

#[test]
fn test_four_bit_params_come_from_bytes_4_to_11() {
    let mut params = [0x0C; 16];
    params[4..12].fill(0x04);
    let payload = adpcm_payload(params, 0x11);
    let (_, samples) = decode_xa_sector(&payload, 4, &fresh(1), 1.0).unwrap();
    assert!(samples.channels[0].iter().all(|&s| s == 4096 >> 4));
}

#[test]
fn test_eight_bit_params_come_from_bytes_0_to_3() {
    let mut params = [0x0C; 16];
    params[0..4].fill(0x02);
    let payload = adpcm_payload(params, 0x10);
    let (_, samples) = decode_xa_sector(&payload, 8, &fresh(1), 1.0).unwrap();
    assert!(samples.channels[0].iter().all(|&s| s == 4096 >> 2));
}

#[test]
fn test_volume_scale() {
    let payload = adpcm_payload([0x00; 16], 0x10);
    let (_, samples) = decode_xa_sector(&payload, 8, &fresh(1), 0.5).unwrap();
    assert!(samples.channels[0].iter().all(|&s| s == 2048));
}

#[test]
fn test_filter_uses_history() {
    let context = FilterContext {
        prev1: 100.0,
        prev2: 50.0,
    };
    let (next, sample) = context.decode(0, 0x20, 1.0);
    assert_eq!(sample, 139);
    assert_eq!(next.prev1, 139.0625);
    assert_eq!(next.prev2, 100.0);

    let context = FilterContext {
        prev1: 1000.0,
        prev2: 0.0,
    };
    let (_, sample) = context.decode(0, 0x10, 1.0);
    assert_eq!(sample, 938);
}

#[test]
fn test_filter_saturates() {
    let payload = adpcm_payload([0x10; 16], 0x77);
    let (_, samples) = decode_xa_sector(&payload, 4, &fresh(1), 1.0).unwrap();
    assert_eq!(*samples.channels[0].last().unwrap(), 32767);
}

#[test]
fn test_decode_is_deterministic() {
    let mut params = [0u8; 16];
    for (i, p) in params.iter_mut().enumerate() {
        *p = ((i as u8 % 4) << 4) | (i as u8 % 13);
    }
    let payload = adpcm_payload(params, 0x9C);
    let a = decode_xa_sector(&payload, 4, &fresh(2), 1.0).unwrap();
    let b = decode_xa_sector(&payload, 4, &fresh(2), 1.0).unwrap();
    assert_eq!(a.1, b.1);
    assert_eq!(a.0, b.0);
}

#[test]
fn test_short_payload_rejected() {
    let payload = adpcm_payload([0; 16], 0x11);
    assert!(decode_xa_sector(&payload[..XA_PAYLOAD_SIZE - 1], 4, &fresh(1), 1.0).is_none());
    assert!(decode_xa_sector(&payload, 4, &[], 1.0).is_none());
}

#[test]
fn test_decoder_carries_state_across_sectors() {
    let mut decoder = XaDecoder::new(8, 1, 1.0);
    decoder.decode(&adpcm_payload([0x00; 16], 0x80)).unwrap();
    assert_eq!(decoder.contexts()[0].prev1, 32768.0);

    let samples = decoder.decode(&adpcm_payload([0x10; 16], 0x00)).unwrap();
    assert_eq!(samples.channels[0][0], 30720);
}

#[test]
fn test_ff8_sector() {
    let mut data = vec![0x11u8; 2048];
    data[..FF8_HEADER_SIZE].copy_from_slice(b"SMN\x01\x00\x0a\x01\x00");
    for block in data[FF8_HEADER_SIZE..FF8_PAYLOAD_SIZE].chunks_exact_mut(16) {
        block[0] = 0x00;
        block[1] = 0x00;
    }
    let (context, samples) = decode_ff8_sector(&data, FilterContext::default(), 1.0).unwrap();
    assert_eq!(samples.len(), FF8_SAMPLES_PER_SECTOR);
    assert!(samples.iter().all(|&s| s == 4096));
    assert_eq!(context.prev1, 4096.0);

    assert!(decode_ff8_sector(&data[..FF8_PAYLOAD_SIZE - 1], context, 1.0).is_none());
}
