//! src/util/humanize.rs

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Format a byte count with 1024-based units, two decimals above one KB.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(10), "10 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * MB), "5.00 MB");
        assert_eq!(format_size(3 * GB / 2), "1.50 GB");
    }

    #[test]
    fn test_gb_is_largest_unit() {
        assert_eq!(format_size(2048 * GB), "2048.00 GB");
    }
}
