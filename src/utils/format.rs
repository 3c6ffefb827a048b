//! Human-readable formatting helpers shared by rules and report output.

/// Convert a byte count into a formatted string (e.g. "2.5 MB")
///
/// **Public** - used in finding messages and the report header
pub fn format_bytes(bytes: u64) -> String {
    const TAGS: &[&str] = &["bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

    let mut value = bytes as f64;
    let mut index = 0;

    while index < TAGS.len() - 1 && value >= 1024.0 {
        value /= 1024.0;
        index += 1;
    }

    if index == 0 {
        format!("{} {}", bytes, TAGS[index])
    } else {
        format!("{:.2} {}", value, TAGS[index])
    }
}

/// Percentage of `part` over `total`, zero when `total` is zero
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_small() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(512), "512 bytes");
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(5, 0), 0.0);
    }
}
