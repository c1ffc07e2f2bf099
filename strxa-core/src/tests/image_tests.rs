use super::*;
use std::io::Cursor;

/// Build a raw 2352-byte Mode 2 sector with a subheader and a fill byte.
fn make_raw_sector(submode: u8, fill: u8) -> Vec<u8> {
    let mut sector = vec![fill; 2352];
    sector[0..12].copy_from_slice(&CD_SYNC_PATTERN);
    sector[12..16].copy_from_slice(&[0, 2, 0, 2]);
    sector[18] = submode;
    sector[22] = submode;
    sector
}

fn make_raw_bin(count: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| make_raw_sector(0x08, i as u8))
        .collect()
}

/// 16 empty sectors followed by a sector carrying the CD001 signature.
fn make_iso(sector_size: usize, data_offset: usize) -> Vec<u8> {
    let mut data = vec![0u8; 17 * sector_size];
    let pvd = 16 * sector_size + data_offset;
    data[pvd] = 0x01;
    data[pvd + 1..pvd + 6].copy_from_slice(b"CD001");
    data
}

#[test]
fn test_detect_raw_2352() {
    let mut cursor = Cursor::new(make_raw_bin(3));
    assert_eq!(detect_layout(&mut cursor).unwrap(), SectorLayout::Raw2352);
}

#[test]
fn test_detect_raw_2448() {
    let mut data = Vec::new();
    for _ in 0..3 {
        data.extend_from_slice(&make_raw_sector(0x08, 0));
        data.extend_from_slice(&[0u8; 96]);
    }
    let mut cursor = Cursor::new(data);
    assert_eq!(detect_layout(&mut cursor).unwrap(), SectorLayout::Raw2448);
}

#[test]
fn test_detect_iso() {
    let mut cursor = Cursor::new(make_iso(2048, 0));
    assert_eq!(detect_layout(&mut cursor).unwrap(), SectorLayout::Iso2048);
}

#[test]
fn test_detect_mode2_2336() {
    let mut cursor = Cursor::new(make_iso(2336, 8));
    assert_eq!(detect_layout(&mut cursor).unwrap(), SectorLayout::Mode2_2336);
}

#[test]
fn test_detect_too_small() {
    let mut cursor = Cursor::new(vec![0u8; 100]);
    assert!(matches!(
        detect_layout(&mut cursor),
        Err(DiscError::TooSmall { .. })
    ));
}

#[test]
fn test_detect_unknown_length() {
    let mut cursor = Cursor::new(vec![0x55u8; 2049]);
    assert!(detect_layout(&mut cursor).is_err());
}

#[test]
fn test_read_sectors() {
    let mut image = FlatImage::open(Cursor::new(make_raw_bin(4))).unwrap();
    assert_eq!(image.sector_count(), 4);
    assert!(image.has_sector_header());

    let sector = image.read_sector(2).unwrap();
    assert_eq!(sector.sector_number(), 2);
    assert_eq!(sector.user_data()[0], 2);
}

#[test]
fn test_read_out_of_range() {
    let mut image = FlatImage::open(Cursor::new(make_raw_bin(2))).unwrap();
    assert!(matches!(
        image.read_sector(2),
        Err(DiscError::SectorOutOfRange { sector: 2, count: 2 })
    ));
}

#[test]
fn test_partial_trailing_sector_ignored() {
    let mut data = make_raw_bin(2);
    data.extend_from_slice(&[0u8; 100]);
    let image = FlatImage::with_layout(Cursor::new(data), SectorLayout::Raw2352).unwrap();
    assert_eq!(image.sector_count(), 2);
}

#[test]
fn test_chd_open_rejects_non_chd() {
    let err = crate::ChdImage::open(Cursor::new(make_raw_bin(2)))
        .err()
        .expect("raw bin opened as CHD");
    assert!(matches!(err, DiscError::Other(_)));
}
