/// Read a little-endian `u16` at `offset`.
pub fn le_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

/// Read a little-endian `u32` at `offset`.
pub fn le_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Read a big-endian `u32` at `offset`.
pub fn be_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Format a byte count with fractional KB/MB (e.g., "1.5 KB", "2.3 MB").
pub fn format_bytes_approx(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a sample count at `rate` Hz as `m:ss.mmm`.
pub fn format_duration(samples: u64, rate: u32) -> String {
    if rate == 0 {
        return "?".to_string();
    }
    let millis = samples * 1000 / rate as u64;
    format!(
        "{}:{:02}.{:03}",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_readers() {
        let buf = [0x34, 0x12, 0x78, 0x56];
        assert_eq!(le_u16(&buf, 0), 0x1234);
        assert_eq!(le_u32(&buf, 0), 0x5678_1234);
        assert_eq!(be_u32(&buf, 0), 0x3412_7856);
    }

    #[test]
    fn test_format_bytes_approx() {
        assert_eq!(format_bytes_approx(0), "0 B");
        assert_eq!(format_bytes_approx(512), "512 B");
        assert_eq!(format_bytes_approx(1536), "1.5 KB");
        assert_eq!(format_bytes_approx(1048576), "1.0 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(37800, 37800), "0:01.000");
        assert_eq!(format_duration(18900 * 61 + 9450, 18900), "1:01.500");
        assert_eq!(format_duration(100, 0), "?");
    }
}
