use super::*;

/// Build a raw 2352-byte sector with the given subheader.
fn make_raw(file: u8, channel: u8, submode: u8, coding: u8) -> Vec<u8> {
    let mut sector = vec![0u8; 2352];
    sector[0..12].copy_from_slice(&crate::image::CD_SYNC_PATTERN);
    sector[15] = 0x02;
    for copy in [16, 20] {
        sector[copy] = file;
        sector[copy + 1] = channel;
        sector[copy + 2] = submode;
        sector[copy + 3] = coding;
    }
    sector
}

#[test]
fn test_layout_offsets() {
    assert_eq!(SectorLayout::Iso2048.subheader_offset(), None);
    assert_eq!(SectorLayout::Mode2_2336.subheader_offset(), Some(0));
    assert_eq!(SectorLayout::Raw2352.data_offset(), 24);
    assert_eq!(SectorLayout::Raw2448.raw_size(), 2448);
    assert!(!SectorLayout::Iso2048.has_header());
}

#[test]
fn test_subheader_fields() {
    let sector = RawSector::new(7, SectorLayout::Raw2352, make_raw(1, 0x23, 0x64, 0x11)).unwrap();
    assert_eq!(sector.sector_number(), 7);
    assert!(sector.has_header());
    assert_eq!(sector.file(), 1);
    // channel is masked to 5 bits
    assert_eq!(sector.channel(), 3);
    let submode = sector.submode().unwrap();
    assert!(submode.contains(Submode::AUDIO | Submode::FORM2 | Submode::REAL_TIME));
    assert!(!submode.contains(Submode::VIDEO));
    assert!(sector.is_form2());
    assert_eq!(sector.user_data().len(), FORM2_DATA_SIZE);
}

#[test]
fn test_coding_info() {
    let info = CodingInfo(0x11);
    assert_eq!(info.channels(), Some(2));
    assert_eq!(info.sample_rate(), Some(37800));
    assert_eq!(info.bits_per_sample(), Some(8));

    let info = CodingInfo(0x04);
    assert_eq!(info.channels(), Some(1));
    assert_eq!(info.sample_rate(), Some(18900));
    assert_eq!(info.bits_per_sample(), Some(4));

    assert_eq!(CodingInfo(0x02).channels(), None);
    assert_eq!(CodingInfo(0x08).sample_rate(), None);
    assert_eq!(CodingInfo(0x20).bits_per_sample(), None);
    assert!(CodingInfo(0x40).emphasis());
}

#[test]
fn test_form1_user_data() {
    let sector = RawSector::new(0, SectorLayout::Raw2352, make_raw(0, 0, 0x08, 0)).unwrap();
    assert_eq!(sector.user_data().len(), FORM1_DATA_SIZE);
}

#[test]
fn test_headerless_sector() {
    let sector = RawSector::new(3, SectorLayout::Iso2048, vec![0xAA; 2048]).unwrap();
    assert!(!sector.has_header());
    assert_eq!(sector.submode(), None);
    assert_eq!(sector.coding_info(), None);
    assert_eq!(sector.channel(), 0);
    assert_eq!(sector.user_data(), &[0xAA; 2048][..]);
}

#[test]
fn test_mode2_2336_sector() {
    let mut bytes = vec![0u8; 2336];
    bytes[0] = 2;
    bytes[1] = 5;
    bytes[2] = 0x24;
    bytes[8] = 0x77;
    let sector = RawSector::new(0, SectorLayout::Mode2_2336, bytes).unwrap();
    assert_eq!(sector.file(), 2);
    assert_eq!(sector.channel(), 5);
    assert_eq!(sector.user_data()[0], 0x77);
    assert_eq!(sector.user_data().len(), FORM2_DATA_SIZE);
}

#[test]
fn test_truncated_sector_is_error() {
    let err = RawSector::new(9, SectorLayout::Raw2352, vec![0u8; 1000]).unwrap_err();
    assert!(matches!(
        err,
        DiscError::Truncated {
            sector: 9,
            needed: 2352,
            actual: 1000
        }
    ));
}
