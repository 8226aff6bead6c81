/// Size formatting utilities: human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.
use thiserror::Error;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count into a human-readable string with appropriate unit.
///
/// Uses binary units (KiB = 1024) but labels them with the common short forms
/// (KB, MB, GB, TB) because that is what users expect in a disk tool.
/// Whole bytes are printed without decimals, everything larger with one.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Error returned by [`parse_size`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid size '{0}': expected a number with an optional B/KB/MB/GB/TB suffix")]
pub struct ParseSizeError(pub String);

/// Parse a size such as `"512"`, `"500KB"`, `"1.5 MB"` or `"2gb"` into bytes.
///
/// A bare number is taken as bytes. Fractional values are truncated to whole
/// bytes after scaling.
pub fn parse_size(input: &str) -> Result<u64, ParseSizeError> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(split);

    let multiplier: u64 = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => 1 << 10,
        "M" | "MB" => 1 << 20,
        "G" | "GB" => 1 << 30,
        "T" | "TB" => 1 << 40,
        _ => return Err(ParseSizeError(input.to_string())),
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| ParseSizeError(input.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ParseSizeError(input.to_string()));
    }

    Ok((value * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(500 * 1_048_576), "500.0 MB");
    }

    #[test]
    fn test_format_size_gb_and_tb() {
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
        assert_eq!(format_size(1_099_511_627_776), "1.0 TB");
    }

    #[test]
    fn test_format_size_caps_at_largest_unit() {
        assert_eq!(format_size(u64::MAX), "16384.0 PB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("512"), Ok(512));
        assert_eq!(parse_size("1KB"), Ok(1024));
        assert_eq!(parse_size("10MB"), Ok(10 * 1_048_576));
        assert_eq!(parse_size("1.5 mb"), Ok(1_572_864));
        assert_eq!(parse_size(" 2G "), Ok(2 * 1_073_741_824));
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("ten MB").is_err());
        assert!(parse_size("10XB").is_err());
        assert!(parse_size("-5KB").is_err());
    }
}
